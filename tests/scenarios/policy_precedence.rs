//! Scenario: Policy Precedence
//!
//! Journey: a realm combines `passwordAge` with `passwordHistory`. When both
//! would reject a password, the one listed first in the policy reports.

use credpolicy::domain::policies::{AGE_ERROR_MESSAGE, HISTORY_ERROR_MESSAGE};
use credpolicy::PolicyParam;

use crate::common::*;

/// One second apart so "newest" is unambiguous
fn three_passwords_at(t: &TestRealm, offset: i64) {
    for (i, pw) in ["secret", "secret1", "secret2"].into_iter().enumerate() {
        t.set_offset(offset + i as i64);
        t.reset_password(pw).unwrap();
    }
    t.set_offset(0);
}

/// SCENARIO: history still remembers a password the age window has forgotten
#[test]
fn scenario_history_takes_over() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(1) passwordHistory(3)").unwrap();
    three_passwords_at(&t, -2 * DAY_SECS);

    let err = t.rejected("secret");
    assert_eq!(err.message_key(), HISTORY_ERROR_MESSAGE);
    assert_eq!(err.parameters(), &[PolicyParam::Int(3)]);
}

/// SCENARIO: the age window remembers a password history would have let go
#[test]
fn scenario_age_takes_over() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(2) passwordHistory(1)").unwrap();
    three_passwords_at(&t, -DAY_SECS);

    let err = t.rejected("secret");
    assert_eq!(err.message_key(), AGE_ERROR_MESSAGE);
    assert_eq!(err.parameters(), &[PolicyParam::Int(2)]);
}

/// SCENARIO: both reject; age is listed first so age reports
#[test]
fn scenario_age_listed_first_reports() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(1) passwordHistory(3)").unwrap();
    three_passwords_at(&t, -12 * HOUR_SECS);

    let err = t.rejected("secret");
    assert_eq!(err.message_key(), AGE_ERROR_MESSAGE);
    assert_eq!(err.parameters(), &[PolicyParam::Int(1)]);
}

/// SCENARIO: both reject; history is listed first so history reports
#[test]
fn scenario_history_listed_first_reports() {
    let mut t = TestRealm::new();
    t.set_policy("passwordHistory(3) passwordAge(1)").unwrap();
    three_passwords_at(&t, -12 * HOUR_SECS);

    let err = t.rejected("secret");
    assert_eq!(err.message_key(), HISTORY_ERROR_MESSAGE);
    assert_eq!(err.parameters(), &[PolicyParam::Int(3)]);
}

/// SCENARIO: once both windows have passed, the old password is fine again
#[test]
fn scenario_both_windows_passed() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(1) passwordHistory(1)").unwrap();
    three_passwords_at(&t, -3 * DAY_SECS);

    t.reset_password("secret").unwrap();
}

/// SCENARIO: history keeps only what the policies still need
#[test]
fn scenario_history_is_pruned() {
    let mut t = TestRealm::new();
    t.set_policy("passwordHistory(2)").unwrap();
    for (i, pw) in ["a-secret", "b-secret", "c-secret", "d-secret", "e-secret"]
        .into_iter()
        .enumerate()
    {
        t.set_offset(-60 + i as i64);
        t.reset_password(pw).unwrap();
    }
    t.set_offset(0);

    assert_eq!(t.history_len(), 2);
    assert_eq!(t.rejected("d-secret").message_key(), HISTORY_ERROR_MESSAGE);
    t.reset_password("a-secret").unwrap();
}
