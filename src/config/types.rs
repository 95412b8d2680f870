//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Realm;
use crate::domain::policies::{PolicyConfigError, PolicyProviderRegistry, DEFAULT_HASH_ALGORITHM};
use crate::domain::ports::HashProviderRegistry;
use crate::error::CredPolicyResult;
use crate::infrastructure::hash::{Pbkdf2Sha256HashProvider, DEFAULT_ITERATIONS};

use super::loader;
use crate::domain::value_objects::ConfigWarning;

/// Realm whose credentials are managed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealmConfig {
    #[serde(default = "default_realm_name")]
    pub name: String,

    /// Policy specification, e.g. `passwordAge(30) passwordHistory(3)`
    #[serde(default)]
    pub password_policy: String,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            name: default_realm_name(),
            password_policy: String::new(),
        }
    }
}

fn default_realm_name() -> String {
    "default".to_string()
}

/// Hashing used for new passwords when the policy does not say otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashingConfig {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            iterations: default_iterations(),
        }
    }
}

fn default_algorithm() -> String {
    DEFAULT_HASH_ALGORITHM.to_string()
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

/// Credential store location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("credentials.toml")
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub realm: RealmConfig,

    #[serde(default)]
    pub hashing: HashingConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CredPolicyResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> CredPolicyResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (CREDPOLICY_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Build the realm, rejecting a policy that does not parse
    pub fn realm(&self, registry: &PolicyProviderRegistry) -> Result<Realm, PolicyConfigError> {
        let mut realm = Realm::new(&self.realm.name);
        realm.set_password_policy(&self.realm.password_policy, registry)?;
        Ok(realm)
    }

    /// Hash providers with the configured default iteration count
    pub fn hash_registry(&self) -> HashProviderRegistry {
        let mut registry = HashProviderRegistry::new();
        let provider = Pbkdf2Sha256HashProvider::with_default_iterations(self.hashing.iterations);
        // A fresh registry cannot already hold the id.
        let _ = registry.register(Arc::new(provider));
        registry
    }
}
