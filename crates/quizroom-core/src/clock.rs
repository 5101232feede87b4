//! Clock abstraction for determinism.
//!
//! Question end times and room expiries are all computed against this trait
//! so tests can pin the clock.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the instant `duration` from now. Used to compute question
    /// end times and room expiries.
    fn deadline(&self, duration: Duration) -> DateTime<Utc> {
        self.now() + chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX)
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
