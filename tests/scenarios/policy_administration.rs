//! Scenario: Policy Administration
//!
//! Journey: an administrator edits the realm policy. Broken specifications
//! are refused without disturbing the policy users are already held to.

use credpolicy::domain::policies::AGE_ERROR_MESSAGE;
use credpolicy::{CredentialStore, CredentialType, PolicyConfigError};

use crate::common::*;

/// SCENARIO: non-integer ages are refused and the old policy stays active
#[test]
fn scenario_invalid_age_keeps_previous_policy() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(1)").unwrap();

    for bad in ["passwordAge(abc)", "passwordAge(2a)", "passwordAge(asda2)"] {
        let err = t.set_policy(bad).unwrap_err();
        assert!(
            matches!(err, PolicyConfigError::InvalidConfig { ref id, .. } if id == "passwordAge"),
            "{bad}: {err}"
        );
    }

    assert_eq!(t.realm.password_policy().to_spec_string(), "passwordAge(1)");
    t.reset_password("secret").unwrap();
    assert_eq!(t.rejected("secret").message_key(), AGE_ERROR_MESSAGE);
}

/// SCENARIO: unknown providers and repeated single-use providers are refused
#[test]
fn scenario_unknown_and_duplicate_providers() {
    let mut t = TestRealm::new();

    assert!(matches!(
        t.set_policy("passwordAge(1) frobnicate(3)"),
        Err(PolicyConfigError::UnknownProvider { .. })
    ));
    assert!(matches!(
        t.set_policy("passwordAge(1) passwordAge(2)"),
        Err(PolicyConfigError::Duplicate { .. })
    ));
    assert!(t.realm.password_policy().is_empty());
}

/// SCENARIO: composition rules run in order, static checks included
#[test]
fn scenario_static_rules_before_age() {
    let mut t = TestRealm::new();
    t.set_policy("length(8) digits(1) notUsername passwordAge(1)")
        .unwrap();

    assert_eq!(
        t.rejected("short1").message_key(),
        "invalidPasswordMinLengthMessage"
    );
    assert_eq!(
        t.rejected("no-digits-here").message_key(),
        "invalidPasswordMinDigitsMessage"
    );
    t.reset_password("long-enough-1").unwrap();
    assert_eq!(t.rejected("long-enough-1").message_key(), AGE_ERROR_MESSAGE);
}

/// SCENARIO: hashing settings in the policy apply to the next stored password
#[test]
fn scenario_hash_iterations_from_policy() {
    let mut t = TestRealm::new();
    t.set_policy("hashAlgorithm(pbkdf2-sha256) hashIterations(3)")
        .unwrap();
    t.reset_password("secret").unwrap();

    let current = t
        .store
        .records_by_type(&t.user.id, CredentialType::Password);
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].algorithm, "pbkdf2-sha256");
    assert_eq!(current[0].iterations, 3);
}

/// SCENARIO: passwords expire after the configured number of days
#[test]
fn scenario_forced_expiry() {
    let mut t = TestRealm::new();
    t.set_policy("forceExpiredPasswordChange(7)").unwrap();

    t.set_offset(-8 * DAY_SECS);
    t.reset_password("secret").unwrap();

    t.set_offset(-2 * DAY_SECS);
    assert!(!t.service.is_password_expired(&t.realm, &t.user));

    t.set_offset(0);
    assert!(t.service.is_password_expired(&t.realm, &t.user));

    t.reset_password("secret1").unwrap();
    assert!(!t.service.is_password_expired(&t.realm, &t.user));
}
