//! Error types for credpolicy
//!
//! Library errors use `thiserror`; each layer has its own enum. This one
//! covers loading the config file and the policy it names.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::policies::PolicyConfigError;

/// Result type alias for credpolicy operations
pub type CredPolicyResult<T> = Result<T, CredPolicyError>;

#[derive(Error, Debug)]
pub enum CredPolicyError {
    /// Config file is not valid TOML or has wrongly typed values
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    #[error("invalid password policy: {0}")]
    PolicyConfig(#[from] PolicyConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
