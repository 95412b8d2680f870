//! Policy provider contract
//!
//! A provider implements one named rule. Providers are created per evaluation
//! from a [`PasswordPolicyProviderFactory`] and must not keep anything about the
//! candidate once `validate` returns.

use std::fmt;
use std::sync::Arc;

use crate::domain::entities::{CredentialRecord, Realm, UserIdentity};
use crate::domain::ports::{Clock, CredentialStore, HashProviderRegistry};
use crate::domain::value_objects::{
    parse_integer, parse_string, ConfigType, CredentialType, InvalidConfigValue, PolicyConfig,
    PolicyError,
};

pub trait PasswordPolicyProvider: Send + Sync {
    /// `None` means the password passes this rule
    fn validate(
        &self,
        realm: &Realm,
        user: &UserIdentity,
        password: &str,
        config: &PolicyConfig,
    ) -> Option<PolicyError>;
}

/// Services available to providers while a policy is evaluated
#[derive(Clone)]
pub struct PolicySession {
    clock: Arc<dyn Clock>,
    hashes: Arc<HashProviderRegistry>,
    credentials: Arc<dyn CredentialStore>,
}

impl PolicySession {
    pub fn new(
        clock: Arc<dyn Clock>,
        hashes: Arc<HashProviderRegistry>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            clock,
            hashes,
            credentials,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn hashes(&self) -> &HashProviderRegistry {
        &self.hashes
    }

    pub fn records(&self, user: &UserIdentity, kind: CredentialType) -> Vec<CredentialRecord> {
        self.credentials.records_by_type(&user.id, kind)
    }
}

impl fmt::Debug for PolicySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicySession")
            .field("hashes", &self.hashes)
            .finish_non_exhaustive()
    }
}

/// Static metadata a provider declares at registration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyProviderDescriptor {
    id: String,
    display_name: String,
    config_type: ConfigType,
    default_config_value: Option<String>,
    multiple_supported: bool,
}

impl PolicyProviderDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        config_type: ConfigType,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            config_type,
            default_config_value: None,
            multiple_supported: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_config_value = Some(value.into());
        self
    }

    /// Allow the id to appear more than once in a specification
    pub fn multiple(mut self) -> Self {
        self.multiple_supported = true;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn config_type(&self) -> ConfigType {
        self.config_type
    }

    pub fn default_config_value(&self) -> Option<&str> {
        self.default_config_value.as_deref()
    }

    pub fn is_multiple_supported(&self) -> bool {
        self.multiple_supported
    }
}

/// Registration unit: descriptor, config parser and provider constructor
pub trait PasswordPolicyProviderFactory: Send + Sync {
    fn descriptor(&self) -> &PolicyProviderDescriptor;

    /// Parse the text between the parentheses (`None` when absent).
    ///
    /// The default implementation follows the declared config type and falls
    /// back to the descriptor's default value.
    fn parse_config(&self, raw: Option<&str>) -> Result<PolicyConfig, InvalidConfigValue> {
        let descriptor = self.descriptor();
        match descriptor.config_type() {
            ConfigType::Int => {
                let default = match descriptor.default_config_value() {
                    Some(value) => value.trim().parse::<i32>().map_err(|_| {
                        InvalidConfigValue::new(format!(
                            "default value '{}' of {} is not an integer",
                            value,
                            descriptor.id()
                        ))
                    })?,
                    None => 0,
                };
                parse_integer(raw, default)
            }
            ConfigType::String => Ok(parse_string(
                raw,
                descriptor.default_config_value().unwrap_or_default(),
            )),
            ConfigType::None => Ok(PolicyConfig::None),
        }
    }

    fn create(&self, session: &PolicySession) -> Box<dyn PasswordPolicyProvider>;
}
