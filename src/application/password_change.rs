//! Password Change Use Case
//!
//! Evaluates a candidate against the realm policy, hashes it, rotates the
//! current credential into history and prunes history nothing still needs.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{newest_first, CredentialRecord, Realm, UserIdentity};
use crate::domain::policies::{
    EvaluationContext, PasswordPolicy, PolicyEvaluator, PolicySession,
    DEFAULT_HASH_ALGORITHM, FORCE_EXPIRED_PASSWORD_CHANGE, HASH_ALGORITHM, HASH_ITERATIONS,
    PASSWORD_AGE, PASSWORD_HISTORY,
};
use crate::domain::ports::{
    days_to_millis, Clock, CredentialRepository, HashError, HashProviderRegistry, StoreError,
};
use crate::domain::value_objects::{CredentialType, PolicyError};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::hash::default_hash_registry;

#[derive(Debug, thiserror::Error)]
pub enum PasswordChangeError {
    #[error("{0}")]
    Policy(#[from] PolicyError),

    #[error("no hash provider registered for algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PasswordChangeError {
    /// The policy violation, if that is what stopped the change
    pub fn as_policy_error(&self) -> Option<&PolicyError> {
        match self {
            PasswordChangeError::Policy(e) => Some(e),
            _ => None,
        }
    }
}

pub struct PasswordChangeService<R>
where
    R: CredentialRepository + 'static,
{
    repository: Arc<R>,
    evaluator: PolicyEvaluator,
    default_algorithm: String,
}

impl<R> PasswordChangeService<R>
where
    R: CredentialRepository + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, hashes: Arc<HashProviderRegistry>) -> Self {
        let session = PolicySession::new(clock, hashes, repository.clone());
        Self {
            repository,
            evaluator: PolicyEvaluator::new(session),
            default_algorithm: DEFAULT_HASH_ALGORITHM.to_string(),
        }
    }

    /// Process-wide clock and the built-in hash providers
    pub fn with_defaults(repository: Arc<R>) -> Self {
        Self::new(
            repository,
            Arc::new(SystemClock::global()),
            Arc::new(default_hash_registry()),
        )
    }

    /// Algorithm used when the realm policy has no `hashAlgorithm` entry
    pub fn with_default_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.default_algorithm = algorithm.into();
        self
    }

    pub fn evaluator(&self) -> &PolicyEvaluator {
        &self.evaluator
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn session(&self) -> &PolicySession {
        self.evaluator.session()
    }

    /// Evaluate only; nothing is stored
    pub fn validate(
        &self,
        realm: &Realm,
        user: &UserIdentity,
        candidate: &str,
    ) -> Result<(), PolicyError> {
        self.evaluator
            .evaluate(&EvaluationContext::new(realm, user, candidate))
    }

    /// Make `candidate` the user's password if the realm policy allows it.
    ///
    /// Returns the new current record.
    pub fn update_password(
        &self,
        realm: &Realm,
        user: &UserIdentity,
        candidate: &str,
    ) -> Result<CredentialRecord, PasswordChangeError> {
        self.validate(realm, user, candidate)?;

        let policy = realm.password_policy();
        let algorithm = policy
            .str_config(HASH_ALGORITHM)
            .unwrap_or(self.default_algorithm.as_str());
        let hasher = self
            .session()
            .hashes()
            .verifier_for(algorithm)
            .ok_or_else(|| PasswordChangeError::UnknownAlgorithm(algorithm.to_string()))?;
        let iterations = policy
            .int_config(HASH_ITERATIONS)
            .map(|n| u32::try_from(n).unwrap_or(0));
        let hashed = hasher.encode(candidate, iterations)?;

        let now = self.session().clock().now_millis();
        let record = CredentialRecord::new_password(hashed, now);
        let prune_ids = self.expendable_history(policy, user, now);
        let pruned = self
            .repository
            .rotate(&user.id, record.clone(), &prune_ids)?;

        info!(
            realm = realm.name(),
            user_id = %user.id,
            credential_id = %record.id,
            algorithm = %record.algorithm,
            pruned,
            "password updated"
        );
        Ok(record)
    }

    /// Ids of the records neither `passwordHistory` nor `passwordAge` can
    /// still look at once the current password has been demoted.
    fn expendable_history(&self, policy: &PasswordPolicy, user: &UserIdentity, now: i64) -> Vec<String> {
        let keep_newest = policy
            .int_config(PASSWORD_HISTORY)
            .filter(|n| *n > 0)
            .map_or(0, |n| n as usize);
        let age_cutoff = policy
            .int_config(PASSWORD_AGE)
            .filter(|days| *days > 0)
            .map(|days| now - days_to_millis(i64::from(days)));

        let mut history = self.session().records(user, CredentialType::PasswordHistory);
        history.extend(self.session().records(user, CredentialType::Password));
        history.sort_by(newest_first);

        history
            .into_iter()
            .enumerate()
            .filter(|(index, record)| {
                let needed_by_history = *index < keep_newest;
                let needed_by_age = age_cutoff.is_some_and(|cutoff| record.created_at > cutoff);
                !(needed_by_history || needed_by_age)
            })
            .map(|(_, record)| {
                debug!(user_id = %user.id, credential_id = %record.id, "pruning password history");
                record.id
            })
            .collect()
    }

    /// Whether the current password is older than `forceExpiredPasswordChange`
    /// days. Always false when the policy is absent or the user has no password.
    pub fn is_password_expired(&self, realm: &Realm, user: &UserIdentity) -> bool {
        let Some(days) = realm
            .password_policy()
            .int_config(FORCE_EXPIRED_PASSWORD_CHANGE)
            .filter(|d| *d > 0)
        else {
            return false;
        };

        let now = self.session().clock().now_millis();
        self.session()
            .records(user, CredentialType::Password)
            .iter()
            .map(|r| r.created_at)
            .max()
            .is_some_and(|created| now - created >= days_to_millis(i64::from(days)))
    }
}
