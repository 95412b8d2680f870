//! Password hash providers

mod pbkdf2_sha256;

use std::sync::Arc;

use crate::domain::ports::HashProviderRegistry;

pub use pbkdf2_sha256::{Pbkdf2Sha256HashProvider, DEFAULT_ITERATIONS, PBKDF2_SHA256};

/// Registry holding every built-in hash provider
pub fn default_hash_registry() -> HashProviderRegistry {
    let mut registry = HashProviderRegistry::new();
    // A fresh registry cannot already hold the id.
    let _ = registry.register(Arc::new(Pbkdf2Sha256HashProvider::new()));
    registry
}
