//! Policy configuration values
//!
//! Each provider declares the type of its configuration and parses the raw text
//! found between the parentheses of a specification token into a [`PolicyConfig`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Declared type of a provider's configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "String")]
    String,
    #[serde(rename = "none")]
    None,
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigType::Int => "int",
            ConfigType::String => "String",
            ConfigType::None => "none",
        })
    }
}

/// A raw config value the provider could not accept
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct InvalidConfigValue {
    pub reason: String,
}

impl InvalidConfigValue {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A compiled, whole-string regular expression plus its source text
#[derive(Debug, Clone)]
pub struct PatternConfig {
    source: String,
    regex: Regex,
}

impl PatternConfig {
    pub fn compile(source: &str) -> Result<Self, InvalidConfigValue> {
        let regex = Regex::new(&format!("^(?:{})$", source))
            .map_err(|e| InvalidConfigValue::new(format!("not a valid regex: {}", e)))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Parsed configuration of a single policy entry
#[derive(Clone)]
pub enum PolicyConfig {
    None,
    Int(i32),
    Text(String),
    Pattern(PatternConfig),
    /// Provider-defined value, recovered with [`PolicyConfig::downcast_ref`]
    Custom(Arc<dyn Any + Send + Sync>),
}

impl PolicyConfig {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            PolicyConfig::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PolicyConfig::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&PatternConfig> {
        match self {
            PolicyConfig::Pattern(p) => Some(p),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            PolicyConfig::Custom(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for PolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyConfig::None => f.write_str("None"),
            PolicyConfig::Int(n) => f.debug_tuple("Int").field(n).finish(),
            PolicyConfig::Text(s) => f.debug_tuple("Text").field(s).finish(),
            PolicyConfig::Pattern(p) => f.debug_tuple("Pattern").field(&p.source).finish(),
            PolicyConfig::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Parse an integer config, falling back to `default` when no value was given
pub fn parse_integer(raw: Option<&str>, default: i32) -> Result<PolicyConfig, InvalidConfigValue> {
    match raw {
        None => Ok(PolicyConfig::Int(default)),
        Some(value) => value
            .trim()
            .parse::<i32>()
            .map(PolicyConfig::Int)
            .map_err(|_| InvalidConfigValue::new(format!("'{}' is not a valid integer", value))),
    }
}

/// Parse a string config, falling back to `default` when no value was given
pub fn parse_string(raw: Option<&str>, default: &str) -> PolicyConfig {
    PolicyConfig::Text(raw.unwrap_or(default).to_string())
}
