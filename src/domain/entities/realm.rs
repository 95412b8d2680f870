//! Realm entity
//!
//! Holds the active password policy. A new specification only replaces the
//! active policy once it has parsed cleanly against the provider registry.

use crate::domain::policies::{PasswordPolicy, PolicyConfigError, PolicyProviderRegistry};

#[derive(Debug, Clone)]
pub struct Realm {
    name: String,
    password_policy: PasswordPolicy,
}

impl Realm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password_policy: PasswordPolicy::empty(),
        }
    }

    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }

    /// Parse `spec` and make it the active policy.
    ///
    /// On error the previous policy stays in place.
    pub fn set_password_policy(
        &mut self,
        spec: &str,
        registry: &PolicyProviderRegistry,
    ) -> Result<(), PolicyConfigError> {
        let policy = PasswordPolicy::parse(spec, registry)?;
        self.password_policy = policy;
        Ok(())
    }
}
