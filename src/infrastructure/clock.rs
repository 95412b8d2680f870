//! Clock implementations
//!
//! [`SystemClock`] reads wall time plus an offset that tests shift to simulate
//! elapsed days. [`FixedClock`] is pinned to an explicit instant.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::domain::ports::Clock;

/// Wall clock with an adjustable offset in seconds
#[derive(Debug, Default)]
pub struct SystemClock {
    offset_seconds: AtomicI64,
}

static GLOBAL: SystemClock = SystemClock::new();

impl SystemClock {
    pub const fn new() -> Self {
        Self {
            offset_seconds: AtomicI64::new(0),
        }
    }

    /// Process-wide instance
    pub fn global() -> &'static SystemClock {
        &GLOBAL
    }

    /// Shift "now" by `seconds`. Only meant for tests.
    pub fn set_offset(&self, seconds: i64) {
        self.offset_seconds.store(seconds, Ordering::SeqCst);
    }

    pub fn offset(&self) -> i64 {
        self.offset_seconds.load(Ordering::SeqCst)
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let offset = self.offset().saturating_mul(1000);
        Utc::now().timestamp_millis().saturating_add(offset)
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn at(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis()
    }
}
