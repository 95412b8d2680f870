//! Blacklist policy (`passwordBlacklist`)
//!
//! Config is the path of a newline-separated word list. The file is read when
//! the specification is parsed, so a missing or unreadable list is reported as
//! a config error instead of surfacing at password-change time.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
use crate::domain::entities::{Realm, UserIdentity};
use crate::domain::value_objects::{ConfigType, InvalidConfigValue, PolicyConfig, PolicyError};

pub const PASSWORD_BLACKLIST: &str = "passwordBlacklist";

/// Lower-cased forbidden passwords
#[derive(Debug, Clone, Default)]
pub struct PasswordBlacklist {
    source: PathBuf,
    words: HashSet<String>,
}

impl PasswordBlacklist {
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_words(path, content.lines()))
    }

    pub fn from_words<'a>(source: &Path, words: impl IntoIterator<Item = &'a str>) -> Self {
        let words = words
            .into_iter()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self {
            source: source.to_path_buf(),
            words,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, password: &str) -> bool {
        self.words.contains(&password.to_lowercase())
    }
}

pub struct BlacklistPolicyProviderFactory {
    descriptor: PolicyProviderDescriptor,
}

impl BlacklistPolicyProviderFactory {
    pub fn new() -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                PASSWORD_BLACKLIST,
                "Password Blacklist",
                ConfigType::String,
            ),
        }
    }
}

impl Default for BlacklistPolicyProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordPolicyProviderFactory for BlacklistPolicyProviderFactory {
    fn descriptor(&self) -> &PolicyProviderDescriptor {
        &self.descriptor
    }

    fn parse_config(&self, raw: Option<&str>) -> Result<PolicyConfig, InvalidConfigValue> {
        let path = raw.ok_or_else(|| InvalidConfigValue::new("a blacklist file path is required"))?;
        let blacklist = PasswordBlacklist::load(Path::new(path)).map_err(|e| {
            InvalidConfigValue::new(format!("cannot read blacklist '{}': {}", path, e))
        })?;
        Ok(PolicyConfig::Custom(Arc::new(blacklist)))
    }

    fn create(&self, _session: &PolicySession) -> Box<dyn PasswordPolicyProvider> {
        Box::new(BlacklistPolicyProvider)
    }
}

struct BlacklistPolicyProvider;

impl PasswordPolicyProvider for BlacklistPolicyProvider {
    fn validate(
        &self,
        _realm: &Realm,
        _user: &UserIdentity,
        password: &str,
        config: &PolicyConfig,
    ) -> Option<PolicyError> {
        let blacklist = config.downcast_ref::<PasswordBlacklist>()?;
        blacklist
            .contains(password)
            .then(|| PolicyError::new("invalidPasswordBlacklistedMessage"))
    }
}
