//! Common test utilities for credpolicy property and scenario tests.
//!
//! `TestRealm` wires a realm, an in-memory store and a private `SystemClock`
//! whose offset each test shifts independently of the others.

#![allow(dead_code)]

use std::sync::Arc;

use credpolicy::infrastructure::Pbkdf2Sha256HashProvider;
use credpolicy::{
    CredentialStore, CredentialType, HashProviderRegistry, InMemoryCredentialStore,
    PasswordChangeError, PasswordChangeService, PolicyConfigError, PolicyError,
    PolicyProviderRegistry, Realm, SystemClock, UserIdentity,
};

pub const HOUR_SECS: i64 = 60 * 60;
pub const DAY_SECS: i64 = 24 * HOUR_SECS;

/// Cheap hashing keeps scenario tests fast
pub const TEST_ITERATIONS: u32 = 10;

pub fn test_hashes() -> HashProviderRegistry {
    let mut hashes = HashProviderRegistry::new();
    hashes
        .register(Arc::new(Pbkdf2Sha256HashProvider::with_default_iterations(
            TEST_ITERATIONS,
        )))
        .unwrap();
    hashes
}

pub struct TestRealm {
    pub realm: Realm,
    pub registry: PolicyProviderRegistry,
    pub clock: Arc<SystemClock>,
    pub store: Arc<InMemoryCredentialStore>,
    pub service: PasswordChangeService<InMemoryCredentialStore>,
    pub user: UserIdentity,
}

impl TestRealm {
    pub fn new() -> Self {
        let clock = Arc::new(SystemClock::new());
        let store = Arc::new(InMemoryCredentialStore::new());
        let service =
            PasswordChangeService::new(store.clone(), clock.clone(), Arc::new(test_hashes()));

        Self {
            realm: Realm::new("test"),
            registry: PolicyProviderRegistry::with_defaults(),
            clock,
            store,
            service,
            user: UserIdentity::new("test_user", "test_user").with_email("test_user@email.test"),
        }
    }

    /// Replace the realm policy, as an administrator saving the realm would
    pub fn set_policy(&mut self, spec: &str) -> Result<(), PolicyConfigError> {
        self.realm.set_password_policy(spec, &self.registry)
    }

    pub fn set_offset(&self, seconds: i64) {
        self.clock.set_offset(seconds);
    }

    pub fn reset_password(&self, password: &str) -> Result<(), PasswordChangeError> {
        self.service
            .update_password(&self.realm, &self.user, password)
            .map(|_| ())
    }

    /// Expect the change to be rejected and return the violation
    pub fn rejected(&self, password: &str) -> PolicyError {
        match self.reset_password(password) {
            Err(PasswordChangeError::Policy(e)) => e,
            Err(other) => panic!("expected a policy violation for {password:?}, got {other}"),
            Ok(()) => panic!("expected {password:?} to be rejected"),
        }
    }

    pub fn history_len(&self) -> usize {
        self.store
            .records_by_type(&self.user.id, CredentialType::PasswordHistory)
            .len()
    }
}
