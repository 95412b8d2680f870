//! credpolicy - composable password policy enforcement
//!
//! A realm carries a policy specification such as
//! `passwordAge(30) passwordHistory(3) length(12)`. At password-change time
//! the [`PolicyEvaluator`] runs each configured provider in order and returns
//! the first violation as a localizable [`PolicyError`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{PasswordChangeError, PasswordChangeService};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{CredentialRecord, Realm, UserIdentity};
pub use domain::policies::{
    EvaluationContext, PasswordPolicy, PolicyConfigError, PolicyEvaluator, PolicyProviderRegistry,
    PolicySession,
};
pub use domain::ports::{Clock, CredentialRepository, CredentialStore, HashProviderRegistry};
pub use domain::value_objects::{CredentialType, MessageCatalog, PolicyError, PolicyParam};
pub use error::{CredPolicyError, CredPolicyResult};
pub use infrastructure::{
    default_hash_registry, FixedClock, InMemoryCredentialStore, SystemClock,
    TomlCredentialRepository,
};
