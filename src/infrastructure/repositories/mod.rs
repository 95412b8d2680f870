//! Credential store implementations

mod memory;
mod toml_store;

pub use memory::{CredentialTable, InMemoryCredentialStore};
pub use toml_store::TomlCredentialRepository;
