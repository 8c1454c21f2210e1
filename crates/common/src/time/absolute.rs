//! Absolute wall-clock instants
//!
//! [`AbsoluteTime`] is a point in time measured in seconds and microseconds
//! since the Unix epoch. Comparison and equality use the flattened
//! microsecond total; arithmetic keeps the microsecond field normalized.
//!
//! # Examples
//!
//! ```
//! use std::num::NonZeroU32;
//!
//! use chronoval_common::time::AbsoluteTime;
//!
//! let start = AbsoluteTime::from_micros(5_250_000);
//! assert_eq!(start.to_string(), "5.250000s");
//!
//! let later = start + 1_750_000_u64;
//! assert_eq!(later.seconds(), 7);
//! assert_eq!(later.micros(), 0);
//!
//! let half = later / NonZeroU32::new(2).unwrap();
//! assert_eq!(half.to_string(), "3.500000s");
//! ```

use std::fmt;
use std::num::NonZeroU32;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};
use std::time::SystemTime;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, warn};

use super::calendar::{Calendar, CalendarFields, LocalCalendar};
use super::clock::{Clock, SystemClock};
use super::duration_view::DurationView;
use super::error::{TimeError, TimeResult};
use super::timeval::{TimeVal, MICROS_PER_SECOND};

/// A wall-clock instant with microsecond precision
///
/// Ordering, equality and hashing follow [`AbsoluteTime::total_micros`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbsoluteTime {
    value: TimeVal,
}

impl AbsoluteTime {
    /// The Unix epoch
    pub const ZERO: Self = Self { value: TimeVal::ZERO };

    /// Builds a time from a non-negative microsecond count.
    pub const fn from_micros(micros: u64) -> Self {
        Self { value: TimeVal::from_micros(micros) }
    }

    /// Builds a time from a seconds field and a microsecond count.
    ///
    /// Microseconds outside `[0, 1_000_000)` are carried into (or borrowed
    /// from) the seconds field. A carry that would overflow the seconds field
    /// saturates at [`TimeVal::MAX`] or [`TimeVal::MIN`]; use
    /// [`AbsoluteTime::try_from_parts`] to detect it.
    pub fn from_parts(seconds: i64, micros: i64) -> Self {
        Self::try_from_parts(seconds, micros).unwrap_or_else(|_| {
            warn!(seconds, micros, "saturating out-of-range time parts");
            let value = if micros < 0 { TimeVal::MIN } else { TimeVal::MAX };
            Self { value }
        })
    }

    /// Builds a time from a seconds field and a microsecond count,
    /// normalizing the microseconds.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if carrying the microseconds overflows
    /// the seconds field.
    pub fn try_from_parts(seconds: i64, micros: i64) -> TimeResult<Self> {
        let value = TimeVal::normalized(seconds, micros)?;
        if !(0..MICROS_PER_SECOND).contains(&micros) {
            debug!(
                seconds,
                micros,
                normalized_seconds = value.secs(),
                normalized_micros = value.micros(),
                "normalized out-of-range microseconds"
            );
        }
        Ok(Self { value })
    }

    /// Current time from the system clock
    pub fn now() -> Self {
        Self::now_with(&SystemClock)
    }

    /// Current time from `clock`
    pub fn now_with<C: Clock + ?Sized>(clock: &C) -> Self {
        Self { value: clock.now() }
    }

    /// The system time `seconds` whole seconds from now
    pub fn future(seconds: u32) -> Self {
        Self::future_with(&SystemClock, seconds)
    }

    /// The system time `seconds` whole seconds ago
    pub fn past(seconds: u32) -> Self {
        Self::past_with(&SystemClock, seconds)
    }

    /// `clock`'s current time plus whole seconds. Only the seconds field
    /// changes; it saturates at the `i64` bounds.
    pub fn future_with<C: Clock + ?Sized>(clock: &C, seconds: u32) -> Self {
        Self { value: clock.now().saturating_add_secs(i64::from(seconds)) }
    }

    /// `clock`'s current time minus whole seconds. Only the seconds field
    /// changes; it saturates at the `i64` bounds.
    pub fn past_with<C: Clock + ?Sized>(clock: &C, seconds: u32) -> Self {
        Self { value: clock.now().saturating_add_secs(-i64::from(seconds)) }
    }

    /// Seconds since the epoch
    pub const fn seconds(&self) -> i64 {
        self.value.secs()
    }

    /// Fractional part in milliseconds, truncated
    pub const fn millis(&self) -> i32 {
        self.value.micros() / 1000
    }

    /// Fractional part in microseconds
    pub const fn micros(&self) -> i32 {
        self.value.micros()
    }

    /// `seconds * 1_000_000 + micros`
    pub const fn total_micros(&self) -> i128 {
        self.value.total_micros()
    }

    /// The underlying normalized pair
    pub const fn as_timeval(&self) -> TimeVal {
        self.value
    }

    /// Calendar fields in the host-local timezone.
    ///
    /// # Errors
    /// Returns [`TimeError::OutOfRange`] if the seconds field cannot be
    /// represented as a calendar date.
    pub fn calendar_fields(&self) -> TimeResult<CalendarFields> {
        self.calendar_fields_in(&LocalCalendar)
    }

    /// Calendar fields as reported by `calendar`.
    ///
    /// # Errors
    /// Propagates the calendar's error.
    pub fn calendar_fields_in<C: Calendar + ?Sized>(&self, calendar: &C) -> TimeResult<CalendarFields> {
        calendar.fields(self.value.secs())
    }

    /// Local hour, 0-23
    ///
    /// # Errors
    /// See [`AbsoluteTime::calendar_fields`].
    pub fn hour(&self) -> TimeResult<u32> {
        self.calendar_fields().map(|fields| fields.hour)
    }

    /// Local minute, 0-59
    ///
    /// # Errors
    /// See [`AbsoluteTime::calendar_fields`].
    pub fn minute(&self) -> TimeResult<u32> {
        self.calendar_fields().map(|fields| fields.minute)
    }

    /// Local second of the minute
    ///
    /// # Errors
    /// See [`AbsoluteTime::calendar_fields`].
    pub fn second(&self) -> TimeResult<u32> {
        self.calendar_fields().map(|fields| fields.second)
    }

    /// Local day of the month, 1-31
    ///
    /// # Errors
    /// See [`AbsoluteTime::calendar_fields`].
    pub fn day(&self) -> TimeResult<u32> {
        self.calendar_fields().map(|fields| fields.day)
    }

    /// Local month, 0-based
    ///
    /// # Errors
    /// See [`AbsoluteTime::calendar_fields`].
    pub fn month(&self) -> TimeResult<u32> {
        self.calendar_fields().map(|fields| fields.month)
    }

    /// Local year, counted from 1900
    ///
    /// # Errors
    /// See [`AbsoluteTime::calendar_fields`].
    pub fn year(&self) -> TimeResult<i32> {
        self.calendar_fields().map(|fields| fields.year)
    }

    /// Sum of two times with microsecond carry.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if the seconds field overflows.
    pub fn add(self, other: Self) -> TimeResult<Self> {
        self.value.checked_add(other.value).map(|value| Self { value }).ok_or_else(|| {
            warn!(lhs = %self, rhs = %other, "time addition overflowed");
            TimeError::overflow("addition")
        })
    }

    /// Difference of two times with microsecond borrow.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if the seconds field overflows.
    pub fn subtract(self, other: Self) -> TimeResult<Self> {
        self.value.checked_sub(other.value).map(|value| Self { value }).ok_or_else(|| {
            warn!(lhs = %self, rhs = %other, "time subtraction overflowed");
            TimeError::overflow("subtraction")
        })
    }

    /// Adds a raw microsecond offset.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if the seconds field overflows.
    pub fn add_micros(self, offset: u64) -> TimeResult<Self> {
        self.add(Self::from_micros(offset))
    }

    /// Subtracts a raw microsecond offset.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if the seconds field overflows.
    pub fn subtract_micros(self, offset: u64) -> TimeResult<Self> {
        self.subtract(Self::from_micros(offset))
    }

    /// Divides the time by `denominator`, truncating.
    ///
    /// When the seconds field is at least `denominator`, seconds are divided
    /// first and the remainder is folded into the microseconds before they
    /// are divided. Otherwise the whole value is divided as microseconds and
    /// the seconds field becomes zero. A negative value is divided as a
    /// microsecond total truncated toward zero and then normalized.
    ///
    /// # Errors
    /// Returns [`TimeError::InvalidArgument`] if `denominator` is zero.
    pub fn divide_by(self, denominator: u32) -> TimeResult<Self> {
        if denominator == 0 {
            warn!(time = %self, "rejected division of time by zero");
            return Err(TimeError::invalid_argument("denominator", "division by zero"));
        }

        let divisor = i64::from(denominator);
        let seconds = self.value.secs();
        let value = if seconds >= divisor {
            let remainder = seconds % divisor;
            let micros = (remainder * MICROS_PER_SECOND + i64::from(self.value.micros())) / divisor;
            TimeVal::normalized(seconds / divisor, micros)?
        } else {
            TimeVal::from_total_micros(self.value.total_micros() / i128::from(divisor))?
        };
        Ok(Self { value })
    }

    /// Multiplies the time by `multiplier`.
    ///
    /// Microseconds are multiplied first; only a product strictly greater
    /// than one second moves whole seconds into the carry. The result is then
    /// normalized, so a product of exactly one second still ends up as
    /// `(seconds + 1, 0)`.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if the seconds field overflows.
    pub fn scale_by(self, multiplier: u32) -> TimeResult<Self> {
        let factor = i64::from(multiplier);
        let product = i64::from(self.value.micros()) * factor;
        let (carry, micros) = if product > MICROS_PER_SECOND {
            (product / MICROS_PER_SECOND, product % MICROS_PER_SECOND)
        } else {
            (0, product)
        };

        let seconds = self
            .value
            .secs()
            .checked_mul(factor)
            .and_then(|seconds| seconds.checked_add(carry))
            .ok_or_else(|| {
                warn!(time = %self, multiplier, "time multiplication overflowed");
                TimeError::overflow("multiplication")
            })?;
        Ok(Self { value: TimeVal::normalized(seconds, micros)? })
    }

    /// Elapsed-time view of this value.
    pub fn as_duration(&self, show_sub_second: bool) -> DurationView {
        DurationView::new(self, show_sub_second)
    }

    /// Elapsed-time view of `self - earlier`.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`] if the subtraction overflows.
    pub fn elapsed_since(&self, earlier: &Self, show_sub_second: bool) -> TimeResult<DurationView> {
        DurationView::between(earlier, self, show_sub_second)
    }

    /// Converts to a chrono UTC date-time.
    ///
    /// # Errors
    /// Returns [`TimeError::OutOfRange`] if chrono cannot represent the
    /// seconds field.
    pub fn to_datetime(&self) -> TimeResult<DateTime<Utc>> {
        let nanos = self.value.micros().unsigned_abs() * 1000;
        DateTime::from_timestamp(self.value.secs(), nanos)
            .ok_or(TimeError::OutOfRange { seconds: self.value.secs() })
    }
}

impl From<TimeVal> for AbsoluteTime {
    fn from(value: TimeVal) -> Self {
        Self { value }
    }
}

impl From<AbsoluteTime> for TimeVal {
    fn from(time: AbsoluteTime) -> Self {
        time.value
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for AbsoluteTime {
    /// Sub-microsecond precision is truncated.
    fn from(dt: DateTime<Tz>) -> Self {
        Self::from_parts(dt.timestamp(), i64::from(dt.timestamp_subsec_micros()))
    }
}

impl TryFrom<SystemTime> for AbsoluteTime {
    type Error = TimeError;

    fn try_from(time: SystemTime) -> TimeResult<Self> {
        TimeVal::try_from(time).map(Self::from)
    }
}

impl fmt::Display for AbsoluteTime {
    /// `<seconds>.<microseconds>s` with six microsecond digits
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}s", self.value.secs(), self.value.micros())
    }
}

// Operator sugar follows std::time: overflow panics.

impl Add for AbsoluteTime {
    type Output = Self;

    /// # Panics
    /// Panics if the seconds field overflows.
    fn add(self, rhs: Self) -> Self {
        Self::add(self, rhs).expect("overflow when adding times")
    }
}

impl Add<u64> for AbsoluteTime {
    type Output = Self;

    /// # Panics
    /// Panics if the seconds field overflows.
    fn add(self, offset: u64) -> Self {
        self.add_micros(offset).expect("overflow when adding microseconds to time")
    }
}

impl AddAssign for AbsoluteTime {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for AbsoluteTime {
    type Output = Self;

    /// # Panics
    /// Panics if the seconds field overflows.
    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs).expect("overflow when subtracting times")
    }
}

impl Sub<u64> for AbsoluteTime {
    type Output = Self;

    /// # Panics
    /// Panics if the seconds field overflows.
    fn sub(self, offset: u64) -> Self {
        self.subtract_micros(offset).expect("overflow when subtracting microseconds from time")
    }
}

impl SubAssign for AbsoluteTime {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<u32> for AbsoluteTime {
    type Output = Self;

    /// # Panics
    /// Panics if the seconds field overflows.
    fn mul(self, multiplier: u32) -> Self {
        self.scale_by(multiplier).expect("overflow when multiplying time")
    }
}

impl MulAssign<u32> for AbsoluteTime {
    fn mul_assign(&mut self, multiplier: u32) {
        *self = *self * multiplier;
    }
}

impl Div<NonZeroU32> for AbsoluteTime {
    type Output = Self;

    fn div(self, denominator: NonZeroU32) -> Self {
        // A non-zero denominator never fails and never grows the value.
        self.divide_by(denominator.get()).unwrap_or(Self::ZERO)
    }
}

impl DivAssign<NonZeroU32> for AbsoluteTime {
    fn div_assign(&mut self, denominator: NonZeroU32) {
        *self = *self / denominator;
    }
}
