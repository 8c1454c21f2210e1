//! Wall-clock sources
//!
//! [`Clock`] is the seam through which [`AbsoluteTime`] reads "now". The
//! production implementation is [`SystemClock`]; tests use
//! [`MockClock`](crate::testing::MockClock) for deterministic values.
//!
//! Wall-clock time is subject to system clock adjustment: consecutive reads
//! are not guaranteed to be nondecreasing.
//!
//! [`AbsoluteTime`]: super::AbsoluteTime

use std::time::{SystemTime, UNIX_EPOCH};

use super::timeval::TimeVal;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// Current time as seconds and microseconds since the Unix epoch
    fn now(&self) -> TimeVal;

    /// Milliseconds since the Unix epoch, truncated toward negative infinity
    fn millis_since_epoch(&self) -> i64 {
        let now = self.now();
        now.secs().saturating_mul(1000).saturating_add(i64::from(now.micros() / 1000))
    }
}

/// Real system clock implementation
///
/// Reads `std::time::SystemTime`. Times before the epoch are returned as
/// negative values rather than clamped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeVal {
        let now = SystemTime::now();
        TimeVal::try_from(now).unwrap_or_else(|_| {
            if now < UNIX_EPOCH {
                TimeVal::MIN
            } else {
                TimeVal::MAX
            }
        })
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> TimeVal {
        (**self).now()
    }
}
