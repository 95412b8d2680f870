//! Scenario: Password Age
//!
//! Journey: a realm forbids reusing any password set within the last N days.
//! The clock is shifted back before each reset to simulate elapsed time.

use credpolicy::domain::policies::AGE_ERROR_MESSAGE;
use credpolicy::PolicyParam;

use crate::common::*;

/// SCENARIO: retrying the same password within the window fails
#[test]
fn scenario_retry_same_password() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(1)").unwrap();

    t.set_offset(-12 * HOUR_SECS);
    t.reset_password("secret").unwrap();

    t.set_offset(0);
    let err = t.rejected("secret");
    assert_eq!(err.message_key(), AGE_ERROR_MESSAGE);
    assert_eq!(err.parameters(), &[PolicyParam::Int(1)]);
}

/// SCENARIO: a password set 12 hours ago is still inside a 1-day window
#[test]
fn scenario_two_passwords_inside_window() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(1)").unwrap();

    t.set_offset(-12 * HOUR_SECS);
    t.reset_password("secret").unwrap();
    t.set_offset(-10 * HOUR_SECS);
    t.reset_password("secret1").unwrap();

    t.set_offset(0);
    assert_eq!(t.rejected("secret").message_key(), AGE_ERROR_MESSAGE);
}

/// SCENARIO: a password set 26 hours ago is outside a 1-day window
#[test]
fn scenario_two_passwords_outside_window() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(1)").unwrap();

    t.set_offset(-26 * HOUR_SECS);
    t.reset_password("secret").unwrap();
    t.set_offset(-10 * HOUR_SECS);
    t.reset_password("secret1").unwrap();

    t.set_offset(0);
    t.reset_password("secret").unwrap();
}

/// SCENARIO: ten seconds short of thirty days is still too recent
#[test]
fn scenario_multiple_passwords_ten_seconds_early() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(30)").unwrap();

    t.set_offset(-30 * DAY_SECS + 10);
    t.reset_password("secret").unwrap();
    for (days_ago, pw) in [(25, "secret1"), (20, "secret2"), (10, "secret3")] {
        t.set_offset(-days_ago * DAY_SECS);
        t.reset_password(pw).unwrap();
    }

    t.set_offset(0);
    assert_eq!(t.rejected("secret").message_key(), AGE_ERROR_MESSAGE);
}

/// SCENARIO: ten seconds past thirty days the old password is allowed again
#[test]
fn scenario_multiple_passwords_after_window() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(30)").unwrap();

    t.set_offset(-30 * DAY_SECS - 10);
    t.reset_password("secret").unwrap();
    for (days_ago, pw) in [(25, "secret1"), (20, "secret2"), (10, "secret3")] {
        t.set_offset(-days_ago * DAY_SECS);
        t.reset_password(pw).unwrap();
    }

    t.set_offset(0);
    t.reset_password("secret").unwrap();
}

/// SCENARIO: zero days only blocks the current password
#[test]
fn scenario_zero_days() {
    let mut t = TestRealm::new();
    t.set_policy("passwordAge(0)").unwrap();

    t.reset_password("secret").unwrap();
    assert_eq!(t.rejected("secret").message_key(), AGE_ERROR_MESSAGE);
    t.reset_password("secret1").unwrap();
    t.reset_password("secret").unwrap();
}

/// SCENARIO: -1 disables the policy; other negatives only block the current password
#[test]
fn scenario_negative_values() {
    let mut t = TestRealm::new();

    t.set_policy("passwordAge(-1)").unwrap();
    t.reset_password("secret").unwrap();
    t.reset_password("secret").unwrap();

    t.set_policy("passwordAge(10)").unwrap();
    t.reset_password("secret1").unwrap();
    t.reset_password("secret2").unwrap();
    t.reset_password("secret3").unwrap();

    t.set_policy("passwordAge(-2)").unwrap();
    t.reset_password("secret").unwrap();
    t.reset_password("secret1").unwrap();
    assert_eq!(t.rejected("secret1").message_key(), AGE_ERROR_MESSAGE);
}
