//! Normalized `(seconds, microseconds)` representation
//!
//! [`TimeVal`] is the storage shared by [`AbsoluteTime`] and
//! [`DurationView`]. It keeps the microsecond field in `[0, 1_000_000)` and
//! carries any overflow of the fractional part into the seconds field, so a
//! negative value such as -1.5s is stored as `(-2, 500_000)`.
//!
//! [`AbsoluteTime`]: super::AbsoluteTime
//! [`DurationView`]: super::DurationView

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::error::{TimeError, TimeResult};

/// Microseconds in one second
pub const MICROS_PER_SECOND: i64 = 1_000_000;

const MICROS_PER_SECOND_I32: i32 = 1_000_000;
const MICROS_PER_SECOND_U64: u64 = 1_000_000;

/// Seconds and microseconds since an origin, with the microsecond field
/// always normalized into `[0, 1_000_000)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeVal {
    secs: i64,
    micros: i32,
}

impl TimeVal {
    /// The origin (0, 0)
    pub const ZERO: Self = Self { secs: 0, micros: 0 };

    /// Largest representable value
    pub const MAX: Self = Self { secs: i64::MAX, micros: MICROS_PER_SECOND_I32 - 1 };

    /// Smallest representable value
    pub const MIN: Self = Self { secs: i64::MIN, micros: 0 };

    /// Build a value from a seconds field and an arbitrary microsecond count,
    /// carrying whole seconds out of `micros` (or borrowing them when it is
    /// negative).
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if the carry does not fit in the seconds
    /// field.
    pub fn normalized(secs: i64, micros: i64) -> TimeResult<Self> {
        let carry = micros.div_euclid(MICROS_PER_SECOND);
        let remainder = micros.rem_euclid(MICROS_PER_SECOND);
        let secs = secs.checked_add(carry).ok_or(TimeError::overflow("normalization"))?;
        let micros =
            i32::try_from(remainder).map_err(|_| TimeError::overflow("normalization"))?;
        Ok(Self { secs, micros })
    }

    /// Split a non-negative microsecond count into seconds and microseconds.
    pub const fn from_micros(total: u64) -> Self {
        // u64::MAX / 10^6 is far below i64::MAX
        Self {
            secs: (total / MICROS_PER_SECOND_U64) as i64,
            micros: (total % MICROS_PER_SECOND_U64) as i32,
        }
    }

    /// Split a signed flattened microsecond count back into fields.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if the seconds part does not fit in
    /// an `i64`.
    pub fn from_total_micros(total: i128) -> TimeResult<Self> {
        let per_second = i128::from(MICROS_PER_SECOND);
        let secs = i64::try_from(total.div_euclid(per_second))
            .map_err(|_| TimeError::overflow("microsecond split"))?;
        let micros = i32::try_from(total.rem_euclid(per_second))
            .map_err(|_| TimeError::overflow("microsecond split"))?;
        Ok(Self { secs, micros })
    }

    /// Whole seconds
    pub const fn secs(&self) -> i64 {
        self.secs
    }

    /// Fractional microseconds, always in `[0, 1_000_000)`
    pub const fn micros(&self) -> i32 {
        self.micros
    }

    /// `secs * 1_000_000 + micros`, computed without intermediate overflow
    pub const fn total_micros(&self) -> i128 {
        self.secs as i128 * MICROS_PER_SECOND as i128 + self.micros as i128
    }

    /// Returns `true` if the value lies before the origin.
    pub const fn is_negative(&self) -> bool {
        self.secs < 0
    }

    /// Field-wise addition with a carry from the microsecond field.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let mut secs = self.secs.checked_add(rhs.secs)?;
        let mut micros = self.micros + rhs.micros;
        if micros >= MICROS_PER_SECOND_I32 {
            secs = secs.checked_add(1)?;
            micros -= MICROS_PER_SECOND_I32;
        }
        Some(Self { secs, micros })
    }

    /// Field-wise subtraction with a borrow into the microsecond field.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        let mut secs = self.secs.checked_sub(rhs.secs)?;
        let mut micros = self.micros - rhs.micros;
        if micros < 0 {
            secs = secs.checked_sub(1)?;
            micros += MICROS_PER_SECOND_I32;
        }
        Some(Self { secs, micros })
    }

    /// Add whole seconds, leaving the microsecond field untouched.
    pub const fn saturating_add_secs(self, secs: i64) -> Self {
        Self { secs: self.secs.saturating_add(secs), micros: self.micros }
    }

    /// Magnitude as `(whole seconds, microseconds)`.
    pub const fn unsigned_abs(&self) -> (u128, u32) {
        let magnitude = self.total_micros().unsigned_abs();
        let per_second = MICROS_PER_SECOND as u128;
        // The remainder is below 10^6
        (magnitude / per_second, (magnitude % per_second) as u32)
    }
}

impl PartialEq for TimeVal {
    fn eq(&self, other: &Self) -> bool {
        self.total_micros() == other.total_micros()
    }
}

impl Eq for TimeVal {}

impl PartialOrd for TimeVal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeVal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_micros().cmp(&other.total_micros())
    }
}

impl Hash for TimeVal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total_micros().hash(state);
    }
}

impl TryFrom<Duration> for TimeVal {
    type Error = TimeError;

    /// Converts a std duration, truncating below microsecond resolution.
    fn try_from(duration: Duration) -> TimeResult<Self> {
        let secs =
            i64::try_from(duration.as_secs()).map_err(|_| TimeError::overflow("duration conversion"))?;
        let micros = i32::try_from(duration.subsec_micros())
            .map_err(|_| TimeError::overflow("duration conversion"))?;
        Ok(Self { secs, micros })
    }
}

impl TryFrom<SystemTime> for TimeVal {
    type Error = TimeError;

    /// Converts a std wall-clock time to seconds since the Unix epoch. Times
    /// before the epoch become negative values.
    fn try_from(time: SystemTime) -> TimeResult<Self> {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => Self::try_from(since),
            Err(err) => Self::ZERO
                .checked_sub(Self::try_from(err.duration())?)
                .ok_or(TimeError::overflow("system time conversion")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for time::timeval.
    use super::*;

    /// Validates `TryFrom<SystemTime>` on both sides of the epoch.
    ///
    /// Assertions:
    /// - Confirms 1.5s after the epoch is `(1, 500_000)`.
    /// - Confirms 1.5s before the epoch is `(-2, 500_000)`.
    #[test]
    fn test_try_from_system_time() {
        let after = TimeVal::try_from(UNIX_EPOCH + Duration::from_millis(1500)).unwrap();
        assert_eq!((after.secs(), after.micros()), (1, 500_000));

        let before = TimeVal::try_from(UNIX_EPOCH - Duration::from_millis(1500)).unwrap();
        assert_eq!((before.secs(), before.micros()), (-2, 500_000));
    }

    /// Validates `TimeVal::normalized` behavior for the carry scenario.
    ///
    /// Assertions:
    /// - Confirms `(5, 1_500_000)` normalizes to `(6, 500_000)`.
    /// - Confirms `(5, 3_000_000)` normalizes to `(8, 0)`.
    #[test]
    fn test_normalized_carry() {
        let tv = TimeVal::normalized(5, 1_500_000).unwrap();
        assert_eq!((tv.secs(), tv.micros()), (6, 500_000));

        let tv = TimeVal::normalized(5, 3_000_000).unwrap();
        assert_eq!((tv.secs(), tv.micros()), (8, 0));
    }

    /// Validates `TimeVal::normalized` behavior for the borrow scenario.
    ///
    /// Assertions:
    /// - Confirms `(5, -1)` normalizes to `(4, 999_999)`.
    /// - Confirms `(0, -1_500_000)` normalizes to `(-2, 500_000)`.
    #[test]
    fn test_normalized_borrow() {
        let tv = TimeVal::normalized(5, -1).unwrap();
        assert_eq!((tv.secs(), tv.micros()), (4, 999_999));

        let tv = TimeVal::normalized(0, -1_500_000).unwrap();
        assert_eq!((tv.secs(), tv.micros()), (-2, 500_000));
        assert_eq!(tv.total_micros(), -1_500_000);
    }

    /// Validates the normalization overflow scenario.
    ///
    /// Assertions:
    /// - Confirms carrying into `i64::MAX` seconds yields `Overflow`.
    #[test]
    fn test_normalized_overflow() {
        assert_eq!(
            TimeVal::normalized(i64::MAX, MICROS_PER_SECOND),
            Err(TimeError::overflow("normalization"))
        );
    }

    /// Validates `TimeVal::from_total_micros` behavior for signed totals.
    ///
    /// Assertions:
    /// - Confirms positive and negative totals split with a non-negative
    ///   microsecond field.
    #[test]
    fn test_from_total_micros() {
        let tv = TimeVal::from_total_micros(5_250_000).unwrap();
        assert_eq!((tv.secs(), tv.micros()), (5, 250_000));

        let tv = TimeVal::from_total_micros(-1).unwrap();
        assert_eq!((tv.secs(), tv.micros()), (-1, 999_999));

        assert!(TimeVal::from_total_micros(i128::MAX).is_err());
    }

    /// Validates `TimeVal::checked_add` and `checked_sub` carry handling.
    ///
    /// Assertions:
    /// - Confirms `(1, 600_000) + (2, 700_000)` equals `(4, 300_000)`.
    /// - Confirms `(1, 200_000) - (0, 700_000)` equals `(0, 500_000)`.
    /// - Ensures adding to `MAX` returns `None`.
    #[test]
    fn test_checked_add_sub() {
        let a = TimeVal::normalized(1, 600_000).unwrap();
        let b = TimeVal::normalized(2, 700_000).unwrap();
        let sum = a.checked_add(b).unwrap();
        assert_eq!((sum.secs(), sum.micros()), (4, 300_000));

        let c = TimeVal::normalized(1, 200_000).unwrap();
        let d = TimeVal::from_micros(700_000);
        let diff = c.checked_sub(d).unwrap();
        assert_eq!((diff.secs(), diff.micros()), (0, 500_000));

        assert!(TimeVal::MAX.checked_add(TimeVal::from_micros(1)).is_none());
        assert!(TimeVal::MIN.checked_sub(TimeVal::from_micros(1)).is_none());
    }

    /// Validates the ordering scenario.
    ///
    /// Assertions:
    /// - Ensures ordering matches `total_micros()` across the sign boundary.
    #[test]
    fn test_ordering_follows_total_micros() {
        let neg = TimeVal::normalized(0, -1).unwrap();
        let zero = TimeVal::ZERO;
        let pos = TimeVal::from_micros(1);
        assert!(neg < zero && zero < pos);
        assert!(neg.is_negative());
        assert_eq!(TimeVal::normalized(1, 0).unwrap(), TimeVal::from_micros(1_000_000));
    }

    /// Validates `TimeVal::unsigned_abs` behavior.
    ///
    /// Assertions:
    /// - Confirms `(-2, 500_000)` has magnitude `(1, 500_000)`.
    #[test]
    fn test_unsigned_abs() {
        let tv = TimeVal::normalized(-2, 500_000).unwrap();
        assert_eq!(tv.unsigned_abs(), (1, 500_000));
        assert_eq!(TimeVal::from_micros(3_000_001).unsigned_abs(), (3, 1));
    }

    /// Validates `TryFrom<Duration>` behavior.
    ///
    /// Assertions:
    /// - Confirms nanoseconds are truncated to microseconds.
    #[test]
    fn test_try_from_duration() {
        let tv = TimeVal::try_from(Duration::new(7, 123_456_789)).unwrap();
        assert_eq!((tv.secs(), tv.micros()), (7, 123_456));
        assert!(TimeVal::try_from(Duration::from_secs(u64::MAX)).is_err());
    }
}
