//! Password age policy (`passwordAge`)
//!
//! Blocks reuse of any password set within the last N days.
//!
//! - `-1` disables the policy.
//! - Any other value rejects the current password unconditionally.
//! - Values above zero additionally reject history records created after
//!   `now - N days`. A record exactly at the cutoff is old enough.

use tracing::debug;

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
use crate::domain::entities::{Realm, UserIdentity};
use crate::domain::ports::days_to_millis;
use crate::domain::value_objects::{ConfigType, CredentialType, PolicyConfig, PolicyError};

pub const PASSWORD_AGE: &str = "passwordAge";
pub const DEFAULT_AGE_DAYS: i32 = 30;
pub const AGE_ERROR_MESSAGE: &str = "invalidPasswordGenericMessage";

const DISABLED: i32 = -1;

pub struct AgePasswordPolicyProviderFactory {
    descriptor: PolicyProviderDescriptor,
}

impl AgePasswordPolicyProviderFactory {
    pub fn new() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                PASSWORD_AGE,
                "Not Recently Used In Days",
                ConfigType::Int,
            )
            .with_default(DEFAULT_AGE_DAYS.to_string()),
        }
    }
}

impl Default for AgePasswordPolicyProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordPolicyProviderFactory for AgePasswordPolicyProviderFactory {
    fn descriptor(&self) -> &PolicyProviderDescriptor {
        &self.descriptor
    }

    fn create(&self, session: &PolicySession) -> Box<dyn PasswordPolicyProvider> {
        Box::new(AgePasswordPolicyProvider {
            session: session.clone(),
        })
    }
}

pub struct AgePasswordPolicyProvider {
    session: PolicySession,
}

impl PasswordPolicyProvider for AgePasswordPolicyProvider {
    fn validate(
        &self,
        _realm: &Realm,
        user: &UserIdentity,
        password: &str,
        config: &PolicyConfig,
    ) -> Option<PolicyError> {
        let days = config.as_int()?;
        if days == DISABLED {
            return None;
        }

        let hashes = self.session.hashes();
        let current = self.session.records(user, CredentialType::Password);
        if hashes.matches_any(password, &current) {
            debug!(user_id = %user.id, "candidate equals the current password");
            return Some(PolicyError::new(AGE_ERROR_MESSAGE).with_param(days));
        }

        if days > 0 {
            let cutoff = self.session.clock().now_millis() - days_to_millis(i64::from(days));
            let history = self.session.records(user, CredentialType::PasswordHistory);
            let too_recent = history.iter().filter(|r| r.created_at > cutoff);
            if hashes.matches_any(password, too_recent) {
                debug!(user_id = %user.id, days, "candidate was used within the age window");
                return Some(PolicyError::new(AGE_ERROR_MESSAGE).with_param(days));
            }
        }

        None
    }
}
