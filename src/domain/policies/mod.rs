//! Domain Policies
//!
//! Password policy providers, the registry that names them, the specification
//! parser that turns a realm's policy string into configured entries, and the
//! evaluator that runs them.

mod age;
mod blacklist;
mod character_class;
mod config_only;
mod evaluator;
mod history;
mod identity;
mod length;
mod provider;
mod regex_pattern;
mod registry;
mod specification;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

pub use age::{
    AgePasswordPolicyProvider, AgePasswordPolicyProviderFactory, AGE_ERROR_MESSAGE,
    DEFAULT_AGE_DAYS, PASSWORD_AGE,
};
pub use blacklist::{BlacklistPolicyProviderFactory, PasswordBlacklist, PASSWORD_BLACKLIST};
pub use character_class::{
    CharacterClass, CharacterClassPolicyProviderFactory, DIGITS, LOWER_CASE, SPECIAL_CHARS,
    UPPER_CASE,
};
pub use config_only::{
    ConfigOnlyPolicyProviderFactory, DEFAULT_EXPIRE_DAYS, DEFAULT_HASH_ALGORITHM,
    DEFAULT_HASH_ITERATIONS, FORCE_EXPIRED_PASSWORD_CHANGE, HASH_ALGORITHM, HASH_ITERATIONS,
};
pub use evaluator::{EvaluationContext, PolicyEvaluator};
pub use history::{
    HistoryPasswordPolicyProvider, HistoryPasswordPolicyProviderFactory, DEFAULT_HISTORY_COUNT,
    HISTORY_ERROR_MESSAGE, PASSWORD_HISTORY,
};
pub use identity::{
    IdentityPolicyProviderFactory, IdentityRule, NOT_CONTAINS_USERNAME, NOT_EMAIL, NOT_USERNAME,
};
pub use length::{LengthPasswordPolicyProviderFactory, LENGTH, MAX_LENGTH};
pub use provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
pub use regex_pattern::{RegexPatternPolicyProviderFactory, REGEX_PATTERN};
pub use registry::{PolicyProviderRegistry, RegistryError};
pub use specification::{PasswordPolicy, PolicyConfigError, PolicyEntry};

/// Every provider shipped with the crate
pub fn builtin_factories() -> Vec<Arc<dyn PasswordPolicyProviderFactory>> {
    vec![
        Arc::new(AgePasswordPolicyProviderFactory::new()),
        Arc::new(HistoryPasswordPolicyProviderFactory::new()),
        Arc::new(LengthPasswordPolicyProviderFactory::min()),
        Arc::new(LengthPasswordPolicyProviderFactory::max()),
        Arc::new(CharacterClassPolicyProviderFactory::new(CharacterClass::Digit)),
        Arc::new(CharacterClassPolicyProviderFactory::new(CharacterClass::LowerCase)),
        Arc::new(CharacterClassPolicyProviderFactory::new(CharacterClass::UpperCase)),
        Arc::new(CharacterClassPolicyProviderFactory::new(CharacterClass::Special)),
        Arc::new(IdentityPolicyProviderFactory::new(IdentityRule::NotUsername)),
        Arc::new(IdentityPolicyProviderFactory::new(IdentityRule::NotContainsUsername)),
        Arc::new(IdentityPolicyProviderFactory::new(IdentityRule::NotEmail)),
        Arc::new(RegexPatternPolicyProviderFactory::new()),
        Arc::new(BlacklistPolicyProviderFactory::new()),
        Arc::new(ConfigOnlyPolicyProviderFactory::hash_algorithm()),
        Arc::new(ConfigOnlyPolicyProviderFactory::hash_iterations()),
        Arc::new(ConfigOnlyPolicyProviderFactory::force_expired_password_change()),
    ]
}
