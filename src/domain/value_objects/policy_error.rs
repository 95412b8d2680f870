//! Policy Error Value Object
//!
//! The machine-checkable outcome of a failed policy check: a message key plus
//! the parameters needed to render it for the user. Providers return these as
//! values; they are never used for control flow by unwinding.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::MessageCatalog;

/// Opaque interpolation argument carried by a [`PolicyError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyParam {
    Int(i64),
    Text(String),
}

impl fmt::Display for PolicyParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyParam::Int(n) => write!(f, "{}", n),
            PolicyParam::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for PolicyParam {
    fn from(n: i32) -> Self {
        PolicyParam::Int(i64::from(n))
    }
}

impl From<i64> for PolicyParam {
    fn from(n: i64) -> Self {
        PolicyParam::Int(n)
    }
}

impl From<&str> for PolicyParam {
    fn from(s: &str) -> Self {
        PolicyParam::Text(s.to_string())
    }
}

impl From<String> for PolicyParam {
    fn from(s: String) -> Self {
        PolicyParam::Text(s)
    }
}

/// A password policy violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("password rejected by policy: {message_key}")]
pub struct PolicyError {
    message_key: String,
    parameters: Vec<PolicyParam>,
}

impl PolicyError {
    pub fn new(message_key: impl Into<String>) -> Self {
        Self {
            message_key: message_key.into(),
            parameters: Vec::new(),
        }
    }

    /// Append an interpolation parameter
    pub fn with_param(mut self, param: impl Into<PolicyParam>) -> Self {
        self.parameters.push(param.into());
        self
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn parameters(&self) -> &[PolicyParam] {
        &self.parameters
    }

    /// Render the user-facing message using `catalog`
    pub fn render(&self, catalog: &MessageCatalog) -> String {
        catalog.format(&self.message_key, &self.parameters)
    }
}
