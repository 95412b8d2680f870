//! Length policies (`length`, `maxLength`)
//!
//! Length is measured in Unicode scalar values, not bytes.

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
use crate::domain::entities::{Realm, UserIdentity};
use crate::domain::value_objects::{ConfigType, PolicyConfig, PolicyError};

pub const LENGTH: &str = "length";
pub const MAX_LENGTH: &str = "maxLength";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Min,
    Max,
}

pub struct LengthPasswordPolicyProviderFactory {
    descriptor: PolicyProviderDescriptor,
    bound: Bound,
}

impl LengthPasswordPolicyProviderFactory {
    pub fn min() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(LENGTH, "Minimum Length", ConfigType::Int)
                .with_default("8"),
            bound: Bound::Min,
        }
    }

    pub fn max() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                MAX_LENGTH,
                "Maximum Length",
                ConfigType::Int,
            )
            .with_default("64"),
            bound: Bound::Max,
        }
    }
}

impl PasswordPolicyProviderFactory for LengthPasswordPolicyProviderFactory {
    fn descriptor(&self) -> &PolicyProviderDescriptor {
        &self.descriptor
    }

    fn create(&self, _session: &PolicySession) -> Box<dyn PasswordPolicyProvider> {
        Box::new(LengthPasswordPolicyProvider { bound: self.bound })
    }
}

struct LengthPasswordPolicyProvider {
    bound: Bound,
}

impl PasswordPolicyProvider for LengthPasswordPolicyProvider {
    fn validate(
        &self,
        _realm: &Realm,
        _user: &UserIdentity,
        password: &str,
        config: &PolicyConfig,
    ) -> Option<PolicyError> {
        let limit = config.as_int()?;
        let len = password.chars().count() as i64;

        match self.bound {
            Bound::Min if len < i64::from(limit) => {
                Some(PolicyError::new("invalidPasswordMinLengthMessage").with_param(limit))
            }
            Bound::Max if len > i64::from(limit) => {
                Some(PolicyError::new("invalidPasswordMaxLengthMessage").with_param(limit))
            }
            _ => None,
        }
    }
}
