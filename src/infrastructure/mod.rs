//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//!
//! ## Structure
//!
//! - `clock` - System and fixed clocks
//! - `hash/` - Password hash providers (PBKDF2)
//! - `repositories/` - Credential stores (in-memory, TOML file)

pub mod clock;
pub mod hash;
pub mod repositories;

pub use clock::{FixedClock, SystemClock};
pub use hash::{default_hash_registry, Pbkdf2Sha256HashProvider};
pub use repositories::{InMemoryCredentialStore, TomlCredentialRepository};
