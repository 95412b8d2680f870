//! Identity policies (`notUsername`, `notContainsUsername`, `notEmail`)
//!
//! Comparisons ignore case. A user without an email passes `notEmail`.

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
use crate::domain::entities::{Realm, UserIdentity};
use crate::domain::value_objects::{ConfigType, PolicyConfig, PolicyError};

pub const NOT_USERNAME: &str = "notUsername";
pub const NOT_CONTAINS_USERNAME: &str = "notContainsUsername";
pub const NOT_EMAIL: &str = "notEmail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRule {
    NotUsername,
    NotContainsUsername,
    NotEmail,
}

impl IdentityRule {
    fn descriptor(&self) -> PolicyProviderDescriptor {
        let (id, name) = match self {
            IdentityRule::NotUsername => (NOT_USERNAME, "Not Username"),
            IdentityRule::NotContainsUsername => (NOT_CONTAINS_USERNAME, "Not Contains Username"),
            IdentityRule::NotEmail => (NOT_EMAIL, "Not Email"),
        };
        PolicyProviderDescriptor::new(id, name, ConfigType::None)
    }

    fn violated_by(&self, user: &UserIdentity, password: &str) -> bool {
        let password = password.to_lowercase();
        match self {
            IdentityRule::NotUsername => password == user.username.to_lowercase(),
            IdentityRule::NotContainsUsername => {
                !user.username.is_empty() && password.contains(&user.username.to_lowercase())
            }
            IdentityRule::NotEmail => user
                .email
                .as_deref()
                .is_some_and(|email| password == email.to_lowercase()),
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            IdentityRule::NotUsername => "invalidPasswordNotUsernameMessage",
            IdentityRule::NotContainsUsername => "invalidPasswordNotContainsUsernameMessage",
            IdentityRule::NotEmail => "invalidPasswordNotEmailMessage",
        }
    }
}

pub struct IdentityPolicyProviderFactory {
    descriptor: PolicyProviderDescriptor,
    rule: IdentityRule,
}

impl IdentityPolicyProviderFactory {
    pub fn new(rule: IdentityRule) -> Self {
        Self {
            descriptor: rule.descriptor(),
            rule,
        }
    }
}

impl PasswordPolicyProviderFactory for IdentityPolicyProviderFactory {
    fn descriptor(&self) -> &PolicyProviderDescriptor {
        &self.descriptor
    }

    fn create(&self, _session: &PolicySession) -> Box<dyn PasswordPolicyProvider> {
        Box::new(IdentityPolicyProvider { rule: self.rule })
    }
}

struct IdentityPolicyProvider {
    rule: IdentityRule,
}

impl PasswordPolicyProvider for IdentityPolicyProvider {
    fn validate(
        &self,
        _realm: &Realm,
        user: &UserIdentity,
        password: &str,
        _config: &PolicyConfig,
    ) -> Option<PolicyError> {
        self.rule
            .violated_by(user, password)
            .then(|| PolicyError::new(self.rule.message_key()))
    }
}
