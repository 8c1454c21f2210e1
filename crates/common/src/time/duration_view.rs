//! Elapsed-time display
//!
//! A [`DurationView`] renders a time value's seconds and microseconds as an
//! elapsed span (`1d 1:01:01`) instead of an epoch instant. It is a snapshot:
//! building one copies the fields, and the view is never mutated.
//!
//! # Examples
//!
//! ```
//! use chronoval_common::time::{AbsoluteTime, DurationView};
//!
//! let span = AbsoluteTime::from_parts(3_661, 500_000);
//! assert_eq!(DurationView::new(&span, false).to_string(), "1:01:01");
//! assert_eq!(DurationView::new(&span, true).to_string(), "1:01:01.500000");
//! ```

use std::fmt;

use super::absolute::AbsoluteTime;
use super::error::TimeResult;
use super::timeval::TimeVal;

const SECONDS_PER_MINUTE: u128 = 60;
const SECONDS_PER_HOUR: u128 = SECONDS_PER_MINUTE * 60;
const SECONDS_PER_DAY: u128 = SECONDS_PER_HOUR * 24;

/// Read-only elapsed-duration rendering of a time value
#[derive(Debug, Clone, Copy)]
pub struct DurationView {
    span: TimeVal,
    show_sub_second: bool,
}

impl DurationView {
    /// Snapshot of `time`, displayed with microseconds when
    /// `show_sub_second` is set.
    pub fn new(time: &AbsoluteTime, show_sub_second: bool) -> Self {
        Self { span: time.as_timeval(), show_sub_second }
    }

    /// View of the span from `start` to `end`.
    ///
    /// # Errors
    /// Returns [`TimeError::Overflow`](super::TimeError::Overflow) if the
    /// difference does not fit.
    pub fn between(start: &AbsoluteTime, end: &AbsoluteTime, show_sub_second: bool) -> TimeResult<Self> {
        let span = end.subtract(*start)?;
        Ok(Self::new(&span, show_sub_second))
    }

    /// Whole seconds of the span
    pub const fn seconds(&self) -> i64 {
        self.span.secs()
    }

    /// Fractional microseconds of the span
    pub const fn micros(&self) -> i32 {
        self.span.micros()
    }

    /// Whether the microsecond suffix is rendered
    pub const fn shows_sub_second(&self) -> bool {
        self.show_sub_second
    }
}

impl fmt::Display for DurationView {
    /// `[<days>d ]<hours>:<mm>:<ss>[.<uuuuuu>]`
    ///
    /// Hours are not padded. A negative span is rendered as `-` followed by its magnitude.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mut s, micros) = self.span.unsigned_abs();
        if self.span.is_negative() {
            f.write_str("-")?;
        }

        if s >= SECONDS_PER_DAY {
            write!(f, "{}d ", s / SECONDS_PER_DAY)?;
            s %= SECONDS_PER_DAY;
        }
        write!(f, "{}:", s / SECONDS_PER_HOUR)?;
        s %= SECONDS_PER_HOUR;
        write!(f, "{:02}:", s / SECONDS_PER_MINUTE)?;
        s %= SECONDS_PER_MINUTE;
        write!(f, "{:02}", s)?;

        if self.show_sub_second {
            write!(f, ".{:06}", micros)?;
        }
        Ok(())
    }
}
