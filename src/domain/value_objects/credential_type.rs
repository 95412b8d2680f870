//! Credential Type Value Object
//!
//! Distinguishes the active password from superseded ones kept for reuse checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a stored credential record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialType {
    /// The currently active password
    Password,
    /// A password that has been replaced by a newer one
    PasswordHistory,
}

impl CredentialType {
    pub const PASSWORD: &'static str = "password";
    pub const PASSWORD_HISTORY: &'static str = "password-history";

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::Password => Self::PASSWORD,
            CredentialType::PasswordHistory => Self::PASSWORD_HISTORY,
        }
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PASSWORD => Ok(CredentialType::Password),
            Self::PASSWORD_HISTORY => Ok(CredentialType::PasswordHistory),
            other => Err(format!("unknown credential type '{}'", other)),
        }
    }
}
