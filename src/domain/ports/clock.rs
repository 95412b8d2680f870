//! Clock port - the source of "now" for every age computation
//!
//! Components receive a clock instead of reading wall time so temporal rules
//! can be tested by shifting time rather than waiting for it.

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds
    fn now_millis(&self) -> i64;

    fn now_seconds(&self) -> i64 {
        self.now_millis().div_euclid(1000)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

pub fn days_to_millis(days: i64) -> i64 {
    days.saturating_mul(MILLIS_PER_DAY)
}
