//! Value Objects
//!
//! Immutable domain values with no identity of their own.

mod config_warning;
mod credential_type;
mod message_catalog;
mod policy_config;
mod policy_error;

pub use config_warning::ConfigWarning;
pub use credential_type::CredentialType;
pub use message_catalog::MessageCatalog;
pub use policy_config::{
    parse_integer, parse_string, ConfigType, InvalidConfigValue, PatternConfig, PolicyConfig,
};
pub use policy_error::{PolicyError, PolicyParam};
