//! Property tests for the password age and history providers.

use std::sync::Arc;

use proptest::prelude::*;

use credpolicy::domain::entities::HashedPassword;
use credpolicy::domain::policies::{AGE_ERROR_MESSAGE, HISTORY_ERROR_MESSAGE};
use credpolicy::domain::ports::{PasswordHashProvider, MILLIS_PER_DAY};
use credpolicy::infrastructure::Pbkdf2Sha256HashProvider;
use credpolicy::{
    CredentialRecord, CredentialRepository, EvaluationContext, FixedClock, HashProviderRegistry,
    InMemoryCredentialStore, PasswordPolicy, PolicyError, PolicyEvaluator, PolicyProviderRegistry,
    PolicySession, Realm, UserIdentity,
};

/// 2024-06-01T00:00:00Z
const NOW: i64 = 1_717_200_000_000;

struct Bench {
    store: Arc<InMemoryCredentialStore>,
    evaluator: PolicyEvaluator,
    hasher: Pbkdf2Sha256HashProvider,
    user: UserIdentity,
}

impl Bench {
    fn new() -> Self {
        let hasher = Pbkdf2Sha256HashProvider::with_default_iterations(1);
        let mut hashes = HashProviderRegistry::new();
        hashes.register(Arc::new(hasher.clone())).unwrap();

        let store = Arc::new(InMemoryCredentialStore::new());
        let session = PolicySession::new(
            Arc::new(FixedClock::at(NOW)),
            Arc::new(hashes),
            store.clone(),
        );

        Self {
            store,
            evaluator: PolicyEvaluator::new(session),
            hasher,
            user: UserIdentity::new("prop-user", "prop-user"),
        }
    }

    fn hash(&self, password: &str) -> HashedPassword {
        self.hasher.encode(password, None).unwrap()
    }

    fn add(&self, password: &str, created_at: i64, history: bool) {
        let record = CredentialRecord::new_password(self.hash(password), created_at);
        let record = if history { record.into_history() } else { record };
        self.store.insert(&self.user.id, record).unwrap();
    }

    fn evaluate(&self, spec: &str, candidate: &str) -> Result<(), PolicyError> {
        let policy = PasswordPolicy::parse(spec, &PolicyProviderRegistry::with_defaults()).unwrap();
        let realm = Realm::new("props").with_password_policy(policy);
        self.evaluator
            .evaluate(&EvaluationContext::new(&realm, &self.user, candidate))
    }
}

fn password() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9!?]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: passwordAge(-1) accepts every candidate, even the current password.
    #[test]
    fn property_disabled_age_accepts_everything(
        current in password(),
        history in proptest::collection::vec((password(), 0i64..60), 0..4),
        reuse_current in any::<bool>(),
        other in password(),
    ) {
        let bench = Bench::new();
        bench.add(&current, NOW - MILLIS_PER_DAY, false);
        for (pw, hours_ago) in &history {
            bench.add(pw, NOW - hours_ago * 3_600_000, true);
        }

        let candidate = if reuse_current { current.clone() } else { other };
        prop_assert!(bench.evaluate("passwordAge(-1)", &candidate).is_ok());
    }

    /// PROPERTY: reusing the current password fails for every active age, whatever its value.
    #[test]
    fn property_active_age_rejects_current(
        days in (-400i32..400).prop_filter("-1 disables the policy", |d| *d != -1),
        current in password(),
        created_hours_ago in 0i64..(24 * 800),
    ) {
        let bench = Bench::new();
        bench.add(&current, NOW - created_hours_ago * 3_600_000, false);

        let err = bench.evaluate(&format!("passwordAge({days})"), &current).unwrap_err();
        prop_assert_eq!(err.message_key(), AGE_ERROR_MESSAGE);
        prop_assert_eq!(err.parameters(), &[credpolicy::PolicyParam::Int(i64::from(days))][..]);
    }

    /// PROPERTY: a reused history password is rejected exactly while it is
    /// younger than the configured number of days.
    #[test]
    fn property_age_window_boundary(
        days in 1i32..60,
        age_ms in 0i64..(61 * MILLIS_PER_DAY),
    ) {
        let bench = Bench::new();
        bench.add("current-pw", NOW, false);
        bench.add("reused-pw", NOW - age_ms, true);

        let result = bench.evaluate(&format!("passwordAge({days})"), "reused-pw");
        let inside_window = age_ms < i64::from(days) * MILLIS_PER_DAY;

        match result {
            Err(e) => {
                prop_assert!(inside_window);
                prop_assert_eq!(e.message_key(), AGE_ERROR_MESSAGE);
            }
            Ok(()) => prop_assert!(!inside_window),
        }
    }

    /// PROPERTY: passwordHistory with a non-positive count never looks at history.
    #[test]
    fn property_non_positive_history_checks_nothing(
        count in -5i32..=0,
        history in proptest::collection::vec(password(), 1..4),
    ) {
        let bench = Bench::new();
        for (i, pw) in history.iter().enumerate() {
            bench.add(pw, NOW - (i as i64 + 1) * 1_000, true);
        }

        let expr = format!("passwordHistory({count})");
        prop_assert!(bench.evaluate(&expr, &history[0]).is_ok());
    }

    /// PROPERTY: passwordHistory(n) rejects a password among the n newest history records.
    #[test]
    fn property_history_rejects_recent_entries(
        count in 1i32..5,
        total in 1usize..6,
        pick in any::<prop::sample::Index>(),
    ) {
        let bench = Bench::new();
        let passwords: Vec<String> = (0..total).map(|i| format!("history-{i}")).collect();
        // index 0 is the newest
        for (i, pw) in passwords.iter().enumerate() {
            bench.add(pw, NOW - (i as i64 + 1) * 1_000, true);
        }

        let index = pick.index(total);
        let result = bench.evaluate(&format!("passwordHistory({count})"), &passwords[index]);
        if index < count as usize {
            let err = result.unwrap_err();
            prop_assert_eq!(err.message_key(), HISTORY_ERROR_MESSAGE);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
