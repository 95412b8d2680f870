//! Password policy specification
//!
//! Parses an administrator-authored string such as
//! `passwordAge(30) passwordHistory(3)` into an ordered [`PasswordPolicy`].
//!
//! ## Grammar
//!
//! - Tokens are separated by whitespace: `id` or `id(config)`.
//! - `config` is opaque to the parser and handed to the provider. Nested
//!   parentheses are balanced and `\` escapes the next character, so regular
//!   expressions can be used as config.
//! - Empty parentheses mean "no value" and select the provider default.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::provider::PasswordPolicyProviderFactory;
use super::registry::PolicyProviderRegistry;
use crate::domain::value_objects::PolicyConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyConfigError {
    #[error("malformed password policy at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    #[error("unknown password policy provider '{id}'")]
    UnknownProvider { id: String },

    #[error("invalid config for password policy '{id}': {reason}")]
    InvalidConfig {
        id: String,
        value: Option<String>,
        reason: String,
    },

    #[error("password policy '{id}' may only be configured once")]
    Duplicate { id: String },
}

/// One configured policy: provider id, raw text and parsed config
#[derive(Clone)]
pub struct PolicyEntry {
    id: String,
    raw: Option<String>,
    config: PolicyConfig,
    factory: Arc<dyn PasswordPolicyProviderFactory>,
}

impl PolicyEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn raw_config(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn factory(&self) -> &dyn PasswordPolicyProviderFactory {
        self.factory.as_ref()
    }
}

impl fmt::Debug for PolicyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyEntry")
            .field("id", &self.id)
            .field("raw", &self.raw)
            .field("config", &self.config)
            .finish()
    }
}

impl fmt::Display for PolicyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "{}({})", self.id, raw),
            None => f.write_str(&self.id),
        }
    }
}

/// The ordered set of policies active for a realm
#[derive(Debug, Clone, Default)]
pub struct PasswordPolicy {
    entries: Vec<PolicyEntry>,
}

impl PasswordPolicy {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `spec` against the providers in `registry`.
    ///
    /// Fails on unknown ids, config the provider rejects, repeated
    /// single-instance ids, and broken token syntax.
    pub fn parse(spec: &str, registry: &PolicyProviderRegistry) -> Result<Self, PolicyConfigError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for token in tokenize(spec)? {
            let factory = registry.factory(&token.id).ok_or_else(|| {
                PolicyConfigError::UnknownProvider {
                    id: token.id.clone(),
                }
            })?;

            if !factory.descriptor().is_multiple_supported() && !seen.insert(token.id.clone()) {
                return Err(PolicyConfigError::Duplicate { id: token.id });
            }

            let config = factory.parse_config(token.config.as_deref()).map_err(|e| {
                PolicyConfigError::InvalidConfig {
                    id: token.id.clone(),
                    value: token.config.clone(),
                    reason: e.reason,
                }
            })?;

            entries.push(PolicyEntry {
                id: token.id,
                raw: token.config,
                config,
                factory: Arc::clone(factory),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Config of the first entry with `id`
    pub fn config(&self, id: &str) -> Option<&PolicyConfig> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.config)
    }

    pub fn int_config(&self, id: &str) -> Option<i32> {
        self.config(id).and_then(PolicyConfig::as_int)
    }

    pub fn str_config(&self, id: &str) -> Option<&str> {
        self.config(id).and_then(PolicyConfig::as_str)
    }

    /// Serialize back to specification syntax
    pub fn to_spec_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PasswordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    id: String,
    config: Option<String>,
}

fn tokenize(spec: &str) -> Result<Vec<Token>, PolicyConfigError> {
    let mut tokens = Vec::new();
    let mut chars = spec.char_indices().peekable();

    loop {
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some(&(start, _)) = chars.peek() else {
            break;
        };

        let mut id = String::new();
        while let Some((_, c)) = chars.next_if(|(_, c)| !c.is_whitespace() && *c != '(' && *c != ')') {
            id.push(c);
        }

        let mut config = None;
        match chars.peek() {
            Some(&(offset, ')')) => {
                return Err(PolicyConfigError::Malformed {
                    offset,
                    reason: "unexpected ')'".to_string(),
                });
            }
            Some(&(offset, '(')) => {
                if id.is_empty() {
                    return Err(PolicyConfigError::Malformed {
                        offset,
                        reason: "missing policy id before '('".to_string(),
                    });
                }
                chars.next();
                config = Some(read_config(&mut chars, &id, offset)?);

                if let Some(&(offset, c)) = chars.peek() {
                    if !c.is_whitespace() {
                        return Err(PolicyConfigError::Malformed {
                            offset,
                            reason: format!("expected whitespace after '{}(...)'", id),
                        });
                    }
                }
            }
            _ => {}
        }

        if id.is_empty() {
            return Err(PolicyConfigError::Malformed {
                offset: start,
                reason: "missing policy id".to_string(),
            });
        }

        tokens.push(Token {
            id,
            config: config.filter(|c| !c.is_empty()),
        });
    }

    Ok(tokens)
}

/// Read up to the `)` matching an already consumed `(`
fn read_config(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    id: &str,
    open_offset: usize,
) -> Result<String, PolicyConfigError> {
    let mut config = String::new();
    let mut depth = 1usize;

    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                config.push(c);
                if let Some((_, escaped)) = chars.next() {
                    config.push(escaped);
                }
            }
            '(' => {
                depth += 1;
                config.push(c);
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(config.trim().to_string());
                }
                config.push(c);
            }
            _ => config.push(c),
        }
    }

    Err(PolicyConfigError::Malformed {
        offset: open_offset,
        reason: format!("unclosed '(' for policy '{}'", id),
    })
}
