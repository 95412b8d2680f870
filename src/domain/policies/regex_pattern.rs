//! Regular expression policy (`regexPattern`)
//!
//! The whole password must match. May be configured several times; every
//! instance must match.

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
use crate::domain::entities::{Realm, UserIdentity};
use crate::domain::value_objects::{
    ConfigType, InvalidConfigValue, PatternConfig, PolicyConfig, PolicyError,
};

pub const REGEX_PATTERN: &str = "regexPattern";
const DEFAULT_PATTERN: &str = ".*";

pub struct RegexPatternPolicyProviderFactory {
    descriptor: PolicyProviderDescriptor,
}

impl RegexPatternPolicyProviderFactory {
    pub fn new() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                REGEX_PATTERN,
                "Regular Expression",
                ConfigType::String,
            )
            .with_default(DEFAULT_PATTERN)
            .multiple(),
        }
    }
}

impl Default for RegexPatternPolicyProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordPolicyProviderFactory for RegexPatternPolicyProviderFactory {
    fn descriptor(&self) -> &PolicyProviderDescriptor {
        &self.descriptor
    }

    fn parse_config(&self, raw: Option<&str>) -> Result<PolicyConfig, InvalidConfigValue> {
        PatternConfig::compile(raw.unwrap_or(DEFAULT_PATTERN)).map(PolicyConfig::Pattern)
    }

    fn create(&self, _session: &PolicySession) -> Box<dyn PasswordPolicyProvider> {
        Box::new(RegexPatternPolicyProvider)
    }
}

struct RegexPatternPolicyProvider;

impl PasswordPolicyProvider for RegexPatternPolicyProvider {
    fn validate(
        &self,
        _realm: &Realm,
        _user: &UserIdentity,
        password: &str,
        config: &PolicyConfig,
    ) -> Option<PolicyError> {
        let pattern = config.as_pattern()?;
        (!pattern.is_full_match(password)).then(|| {
            PolicyError::new("invalidPasswordRegexPatternMessage").with_param(pattern.source())
        })
    }
}
