//! Localized policy messages
//!
//! Maps message keys to templates with positional `{0}`, `{1}`, ... placeholders.

use std::collections::BTreeMap;

use super::PolicyParam;

const ENGLISH: &[(&str, &str)] = &[
    (
        "invalidPasswordMinLengthMessage",
        "Invalid password: minimum length {0}.",
    ),
    (
        "invalidPasswordMaxLengthMessage",
        "Invalid password: maximum length {0}.",
    ),
    (
        "invalidPasswordMinDigitsMessage",
        "Invalid password: must contain at least {0} numerical digits.",
    ),
    (
        "invalidPasswordMinLowerCaseCharsMessage",
        "Invalid password: must contain at least {0} lower case characters.",
    ),
    (
        "invalidPasswordMinUpperCaseCharsMessage",
        "Invalid password: must contain at least {0} upper case characters.",
    ),
    (
        "invalidPasswordMinSpecialCharsMessage",
        "Invalid password: must contain at least {0} special characters.",
    ),
    (
        "invalidPasswordNotUsernameMessage",
        "Invalid password: must not be equal to the username.",
    ),
    (
        "invalidPasswordNotContainsUsernameMessage",
        "Invalid password: can not contain the username.",
    ),
    (
        "invalidPasswordNotEmailMessage",
        "Invalid password: must not be equal to the email.",
    ),
    (
        "invalidPasswordRegexPatternMessage",
        "Invalid password: fails to match regex pattern(s).",
    ),
    (
        "invalidPasswordHistoryMessage",
        "Invalid password: must not be equal to any of last {0} passwords.",
    ),
    (
        "invalidPasswordBlacklistedMessage",
        "Invalid password: password is blacklisted.",
    ),
    (
        "invalidPasswordGenericMessage",
        "Invalid password: new password does not match password policies.",
    ),
];

/// Message templates keyed by policy message key
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: BTreeMap<String, String>,
}

impl MessageCatalog {
    /// An empty catalog; every key renders as itself
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English messages
    pub fn english() -> Self {
        let templates = ENGLISH
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { templates }
    }

    /// Add or replace a template
    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Interpolate `params` into the template for `key`.
    ///
    /// Unknown keys fall back to the key itself so a missing translation never
    /// hides the failure.
    pub fn format(&self, key: &str, params: &[PolicyParam]) -> String {
        let Some(template) = self.template(key) else {
            return key.to_string();
        };

        let mut out = template.to_string();
        for (idx, param) in params.iter().enumerate() {
            out = out.replace(&format!("{{{}}}", idx), &param.to_string());
        }
        out
    }
}
