//! Hash capability port
//!
//! Maps an algorithm id to the provider able to encode new passwords and
//! verify candidates against stored records of that algorithm.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::{CredentialRecord, HashedPassword};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("hash algorithm '{0}' is already registered")]
    DuplicateAlgorithm(String),

    #[error("failed to hash password with '{algorithm}': {message}")]
    Encoding { algorithm: String, message: String },
}

pub trait PasswordHashProvider: Send + Sync {
    /// Algorithm id stored on every record this provider produces
    fn id(&self) -> &str;

    fn default_iterations(&self) -> u32;

    /// Hash `password` with a fresh salt. `None` uses the default iteration count.
    fn encode(&self, password: &str, iterations: Option<u32>) -> Result<HashedPassword, HashError>;

    /// Whether `candidate` hashes to the value stored in `record`
    fn verify(&self, candidate: &str, record: &CredentialRecord) -> bool;
}

/// Hash providers keyed by algorithm id. Immutable once built.
#[derive(Default, Clone)]
pub struct HashProviderRegistry {
    providers: BTreeMap<String, Arc<dyn PasswordHashProvider>>,
}

impl HashProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn PasswordHashProvider>) -> Result<(), HashError> {
        let id = provider.id().to_string();
        if self.providers.contains_key(&id) {
            return Err(HashError::DuplicateAlgorithm(id));
        }
        self.providers.insert(id, provider);
        Ok(())
    }

    pub fn verifier_for(&self, algorithm: &str) -> Option<&dyn PasswordHashProvider> {
        self.providers.get(algorithm).map(|p| p.as_ref())
    }

    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Verify against a single record.
    ///
    /// A record whose algorithm is not registered never matches.
    pub fn verifies(&self, candidate: &str, record: &CredentialRecord) -> bool {
        match self.verifier_for(&record.algorithm) {
            Some(provider) => provider.verify(candidate, record),
            None => {
                warn!(
                    algorithm = %record.algorithm,
                    credential_id = %record.id,
                    "no hash provider registered; treating credential as non-matching"
                );
                false
            }
        }
    }

    pub fn matches_any<'a>(
        &self,
        candidate: &str,
        records: impl IntoIterator<Item = &'a CredentialRecord>,
    ) -> bool {
        records.into_iter().any(|r| self.verifies(candidate, r))
    }
}

impl std::fmt::Debug for HashProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashProviderRegistry")
            .field("algorithms", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
