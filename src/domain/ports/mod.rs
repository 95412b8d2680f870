//! Domain Ports (Interfaces)
//!
//! These traits define what the policy engine needs from the outside world.
//! Infrastructure layer provides concrete implementations.

pub mod clock;
pub mod credential_store;
pub mod hash_provider;

pub use clock::{days_to_millis, Clock, MILLIS_PER_DAY};
pub use credential_store::{CredentialRepository, CredentialStore, StoreError, StoreResult};
pub use hash_provider::{HashError, HashProviderRegistry, PasswordHashProvider};
