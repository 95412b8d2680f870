//! Configuration module for credpolicy
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CREDPOLICY_*)
//! 3. Project config (`credpolicy.toml`)
//! 4. User config (`<config dir>/credpolicy/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    apply_overrides, user_config_path, ENV_HASH_ALGORITHM, ENV_HASH_ITERATIONS,
    ENV_PASSWORD_POLICY, ENV_STORE, PROJECT_CONFIG_FILE,
};
pub use types::{Config, HashingConfig, RealmConfig, StoreConfig};
