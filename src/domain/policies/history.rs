//! Password history policy (`passwordHistory`)
//!
//! Rejects a candidate equal to one of the N most recent history records.
//! Records are ordered newest first with ties broken by ascending id.

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
use crate::domain::entities::{newest_first, Realm, UserIdentity};
use crate::domain::value_objects::{ConfigType, CredentialType, PolicyConfig, PolicyError};

pub const PASSWORD_HISTORY: &str = "passwordHistory";
pub const DEFAULT_HISTORY_COUNT: i32 = 3;
pub const HISTORY_ERROR_MESSAGE: &str = "invalidPasswordHistoryMessage";

pub struct HistoryPasswordPolicyProviderFactory {
    descriptor: PolicyProviderDescriptor,
}

impl HistoryPasswordPolicyProviderFactory {
    pub fn new() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                PASSWORD_HISTORY,
                "Not Recently Used",
                ConfigType::Int,
            )
            .with_default(DEFAULT_HISTORY_COUNT.to_string()),
        }
    }
}

impl Default for HistoryPasswordPolicyProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordPolicyProviderFactory for HistoryPasswordPolicyProviderFactory {
    fn descriptor(&self) -> &PolicyProviderDescriptor {
        &self.descriptor
    }

    fn create(&self, session: &PolicySession) -> Box<dyn PasswordPolicyProvider> {
        Box::new(HistoryPasswordPolicyProvider {
            session: session.clone(),
        })
    }
}

pub struct HistoryPasswordPolicyProvider {
    session: PolicySession,
}

impl PasswordPolicyProvider for HistoryPasswordPolicyProvider {
    fn validate(
        &self,
        _realm: &Realm,
        user: &UserIdentity,
        password: &str,
        config: &PolicyConfig,
    ) -> Option<PolicyError> {
        let limit = config.as_int().filter(|n| *n > 0)?;

        let mut history = self.session.records(user, CredentialType::PasswordHistory);
        history.sort_by(newest_first);
        history.truncate(limit as usize);

        self.session
            .hashes()
            .matches_any(password, &history)
            .then(|| PolicyError::new(HISTORY_ERROR_MESSAGE).with_param(limit))
    }
}
