//! Shared fixture for policy unit tests
//!
//! In-memory store, pinned clock and a cheap PBKDF2 configuration.

use std::sync::Arc;

use super::{PasswordPolicy, PolicyEvaluator, PolicyProviderRegistry, PolicySession};
use crate::domain::entities::{CredentialRecord, Realm, UserIdentity};
use crate::domain::ports::{CredentialRepository, HashProviderRegistry, PasswordHashProvider};
use crate::domain::value_objects::{CredentialType, PolicyError};
use crate::domain::policies::EvaluationContext;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::hash::Pbkdf2Sha256HashProvider;
use crate::infrastructure::repositories::InMemoryCredentialStore;

pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// 2024-06-01T00:00:00Z
const START: i64 = 1_717_200_000_000;
const TEST_ITERATIONS: u32 = 10;

pub struct Fixture {
    pub store: Arc<InMemoryCredentialStore>,
    pub clock: Arc<FixedClock>,
    pub hashes: Arc<HashProviderRegistry>,
    pub session: PolicySession,
    pub user: UserIdentity,
    hasher: Pbkdf2Sha256HashProvider,
    next_id: std::sync::atomic::AtomicU32,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryCredentialStore::new());
        let clock = Arc::new(FixedClock::at(START));
        let hasher = Pbkdf2Sha256HashProvider::with_default_iterations(TEST_ITERATIONS);

        let mut hashes = HashProviderRegistry::new();
        hashes
            .register(Arc::new(hasher.clone()))
            .expect("fresh registry");
        let hashes = Arc::new(hashes);

        let session = PolicySession::new(clock.clone(), hashes.clone(), store.clone());

        Self {
            store,
            clock,
            hashes,
            session,
            user: UserIdentity::new("alice", "alice").with_email("alice@example.test"),
            hasher,
            next_id: std::sync::atomic::AtomicU32::new(0),
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.millis()
    }

    fn hashed_record(&self, password: &str, created_at: i64) -> CredentialRecord {
        let hashed = self.hasher.encode(password, None).expect("hash");
        CredentialRecord::new_password(hashed, created_at)
    }

    fn next_id(&self) -> String {
        let n = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        format!("cred-{n:04}")
    }

    pub fn add_current(&self, password: &str, created_at: i64) {
        let user_id = self.user.id.clone();
        self.add_current_for(&user_id, password, created_at);
    }

    pub fn add_current_for(&self, user_id: &str, password: &str, created_at: i64) {
        let mut record = self.hashed_record(password, created_at);
        record.id = self.next_id();
        self.store.insert(user_id, record).expect("insert");
    }

    pub fn add_history(&self, password: &str, created_at: i64) {
        let id = self.next_id();
        self.add_history_with_id(&id, password, created_at);
    }

    pub fn add_history_with_id(&self, id: &str, password: &str, created_at: i64) {
        let mut record = self.hashed_record(password, created_at).into_history();
        record.id = id.to_string();
        self.store.insert(&self.user.id, record).expect("insert");
    }

    /// A record whose hash claims `algorithm`, created now
    pub fn add_record_with_algorithm(&self, password: &str, algorithm: &str, kind: CredentialType) {
        let mut record = self.hashed_record(password, self.now());
        record.id = self.next_id();
        record.algorithm = algorithm.to_string();
        record.kind = kind;
        self.store.insert(&self.user.id, record).expect("insert");
    }

    pub fn realm(&self, spec: &str) -> Realm {
        let registry = PolicyProviderRegistry::with_defaults();
        let policy = PasswordPolicy::parse(spec, &registry).expect("valid policy");
        Realm::new("test").with_password_policy(policy)
    }

    pub fn evaluator(&self) -> PolicyEvaluator {
        PolicyEvaluator::new(self.session.clone())
    }

    pub fn evaluate(&self, realm: &Realm, candidate: &str) -> Result<(), PolicyError> {
        self.evaluator()
            .evaluate(&EvaluationContext::new(realm, &self.user, candidate))
    }
}
