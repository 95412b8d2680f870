//! Settings carried in the policy string but enforced elsewhere
//!
//! `hashAlgorithm` and `hashIterations` are read by the password change service
//! when encoding a new password; `forceExpiredPasswordChange` is read when
//! checking whether the current password has expired. Their providers accept
//! every candidate.

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
use crate::domain::entities::{Realm, UserIdentity};
use crate::domain::value_objects::{ConfigType, PolicyConfig, PolicyError};

pub const HASH_ALGORITHM: &str = "hashAlgorithm";
pub const HASH_ITERATIONS: &str = "hashIterations";
pub const FORCE_EXPIRED_PASSWORD_CHANGE: &str = "forceExpiredPasswordChange";

pub const DEFAULT_HASH_ALGORITHM: &str = "pbkdf2-sha256";
pub const DEFAULT_HASH_ITERATIONS: i32 = 27_500;
pub const DEFAULT_EXPIRE_DAYS: i32 = 365;

pub struct ConfigOnlyPolicyProviderFactory {
    descriptor: PolicyProviderDescriptor,
}

impl ConfigOnlyPolicyProviderFactory {
    pub fn hash_algorithm() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                HASH_ALGORITHM,
                "Hashing Algorithm",
                ConfigType::String,
            )
            .with_default(DEFAULT_HASH_ALGORITHM),
        }
    }

    pub fn hash_iterations() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                HASH_ITERATIONS,
                "Hashing Iterations",
                ConfigType::Int,
            )
            .with_default(DEFAULT_HASH_ITERATIONS.to_string()),
        }
    }

    pub fn force_expired_password_change() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                FORCE_EXPIRED_PASSWORD_CHANGE,
                "Expire Password",
                ConfigType::Int,
            )
            .with_default(DEFAULT_EXPIRE_DAYS.to_string()),
        }
    }
}

impl PasswordPolicyProviderFactory for ConfigOnlyPolicyProviderFactory {
    fn descriptor(&self) -> &PolicyProviderDescriptor {
        &self.descriptor
    }

    fn create(&self, _session: &PolicySession) -> Box<dyn PasswordPolicyProvider> {
        Box::new(AcceptAll)
    }
}

struct AcceptAll;

impl PasswordPolicyProvider for AcceptAll {
    fn validate(&self, _: &Realm, _: &UserIdentity, _: &str, _: &PolicyConfig) -> Option<PolicyError> {
        None
    }
}
