//! Character class policies (`digits`, `lowerCase`, `upperCase`, `specialChars`)
//!
//! Each requires at least N characters of its class. Anything that is not a
//! letter or a digit counts as special.

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};
use crate::domain::entities::{Realm, UserIdentity};
use crate::domain::value_objects::{ConfigType, PolicyConfig, PolicyError};

pub const DIGITS: &str = "digits";
pub const LOWER_CASE: &str = "lowerCase";
pub const UPPER_CASE: &str = "upperCase";
pub const SPECIAL_CHARS: &str = "specialChars";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Digit,
    LowerCase,
    UpperCase,
    Special,
}

impl CharacterClass {
    pub fn contains(&self, c: char) -> bool {
        match self {
            CharacterClass::Digit => c.is_numeric(),
            CharacterClass::LowerCase => c.is_lowercase(),
            CharacterClass::UpperCase => c.is_uppercase(),
            CharacterClass::Special => !c.is_alphanumeric(),
        }
    }

    fn policy_id(&self) -> &'static str {
        match self {
            CharacterClass::Digit => DIGITS,
            CharacterClass::LowerCase => LOWER_CASE,
            CharacterClass::UpperCase => UPPER_CASE,
            CharacterClass::Special => SPECIAL_CHARS,
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            CharacterClass::Digit => "Digits",
            CharacterClass::LowerCase => "Lowercase Characters",
            CharacterClass::UpperCase => "Uppercase Characters",
            CharacterClass::Special => "Special Characters",
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            CharacterClass::Digit => "invalidPasswordMinDigitsMessage",
            CharacterClass::LowerCase => "invalidPasswordMinLowerCaseCharsMessage",
            CharacterClass::UpperCase => "invalidPasswordMinUpperCaseCharsMessage",
            CharacterClass::Special => "invalidPasswordMinSpecialCharsMessage",
        }
    }
}

pub struct CharacterClassPolicyProviderFactory {
    descriptor: PolicyProviderDescriptor,
    class: CharacterClass,
}

impl CharacterClassPolicyProviderFactory {
    pub fn new(class: CharacterClass) -> Self {
        Self {
            descriptor: PolicyProviderDescriptor::new(
                class.policy_id(),
                class.display_name(),
                ConfigType::Int,
            )
            .with_default("1"),
            class,
        }
    }
}

impl PasswordPolicyProviderFactory for CharacterClassPolicyProviderFactory {
    fn descriptor(&self) -> &PolicyProviderDescriptor {
        &self.descriptor
    }

    fn create(&self, _session: &PolicySession) -> Box<dyn PasswordPolicyProvider> {
        Box::new(CharacterClassPolicyProvider { class: self.class })
    }
}

struct CharacterClassPolicyProvider {
    class: CharacterClass,
}

impl PasswordPolicyProvider for CharacterClassPolicyProvider {
    fn validate(
        &self,
        _realm: &Realm,
        _user: &UserIdentity,
        password: &str,
        config: &PolicyConfig,
    ) -> Option<PolicyError> {
        let required = config.as_int()?;
        let count = password.chars().filter(|c| self.class.contains(*c)).count() as i64;

        (count < i64::from(required))
            .then(|| PolicyError::new(self.class.message_key()).with_param(required))
    }
}
