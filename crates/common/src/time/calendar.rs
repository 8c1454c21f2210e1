//! Calendar field conversion
//!
//! A [`Calendar`] maps epoch seconds to broken-down calendar fields in some
//! timezone. Time values do not implement timezone logic themselves: they
//! hand their seconds field to a calendar and return its fields unchanged.
//!
//! Fields follow the C `struct tm` layout: the month is 0-based and the year
//! counts from 1900.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Timelike, Utc};
use serde::Deserialize;

use super::error::{TimeError, TimeResult};
use crate::error::CommonError;

/// Year offset of [`CalendarFields::year`]
pub const TM_YEAR_BASE: i32 = 1900;

/// Broken-down calendar fields for one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarFields {
    /// Years since 1900
    pub year: i32,
    /// Month of the year, 0-11
    pub month: u32,
    /// Day of the month, 1-31
    pub day: u32,
    /// Hour, 0-23
    pub hour: u32,
    /// Minute, 0-59
    pub minute: u32,
    /// Second, 0-60 (60 only for a leap second)
    pub second: u32,
    /// Days since Sunday, 0-6
    pub weekday: u32,
    /// Days since January 1st, 0-365
    pub year_day: u32,
}

impl CalendarFields {
    /// Builds the fields of a chrono date-time in its own timezone.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            year: dt.year() - TM_YEAR_BASE,
            month: dt.month0(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            weekday: dt.weekday().num_days_from_sunday(),
            year_day: dt.ordinal0(),
        }
    }

    /// Calendar year, e.g. 2024
    pub const fn full_year(&self) -> i32 {
        self.year + TM_YEAR_BASE
    }

    /// Month of the year, 1-12
    pub const fn month_number(&self) -> u32 {
        self.month + 1
    }
}

/// Maps epoch seconds to calendar fields
pub trait Calendar {
    /// Calendar fields for `epoch_seconds`.
    ///
    /// # Errors
    /// Returns [`TimeError::OutOfRange`] if the calendar cannot represent the
    /// instant.
    fn fields(&self, epoch_seconds: i64) -> TimeResult<CalendarFields>;
}

fn utc_datetime(epoch_seconds: i64) -> TimeResult<DateTime<Utc>> {
    DateTime::from_timestamp(epoch_seconds, 0).ok_or(TimeError::OutOfRange { seconds: epoch_seconds })
}

/// Host-local timezone, as configured by the environment
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCalendar;

impl Calendar for LocalCalendar {
    fn fields(&self, epoch_seconds: i64) -> TimeResult<CalendarFields> {
        let local = utc_datetime(epoch_seconds)?.with_timezone(&Local);
        Ok(CalendarFields::from_datetime(&local))
    }
}

/// Coordinated Universal Time
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcCalendar;

impl Calendar for UtcCalendar {
    fn fields(&self, epoch_seconds: i64) -> TimeResult<CalendarFields> {
        Ok(CalendarFields::from_datetime(&utc_datetime(epoch_seconds)?))
    }
}

/// A constant offset from UTC, with no daylight saving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetCalendar {
    offset: FixedOffset,
}

impl FixedOffsetCalendar {
    /// Calendar `offset_seconds` east of UTC.
    ///
    /// # Errors
    /// Returns [`TimeError::InvalidArgument`] unless the offset is strictly
    /// within one day.
    pub fn east(offset_seconds: i32) -> TimeResult<Self> {
        FixedOffset::east_opt(offset_seconds).map(|offset| Self { offset }).ok_or_else(|| {
            TimeError::invalid_argument("offset_seconds", "must be strictly within one day")
        })
    }

    /// Offset east of UTC in seconds
    pub fn offset_seconds(&self) -> i32 {
        self.offset.local_minus_utc()
    }
}

impl Calendar for FixedOffsetCalendar {
    fn fields(&self, epoch_seconds: i64) -> TimeResult<CalendarFields> {
        let shifted = utc_datetime(epoch_seconds)?.with_timezone(&self.offset);
        Ok(CalendarFields::from_datetime(&shifted))
    }
}

impl<C: Calendar + ?Sized> Calendar for &C {
    fn fields(&self, epoch_seconds: i64) -> TimeResult<CalendarFields> {
        (**self).fields(epoch_seconds)
    }
}

/// Configuration-selected calendar
///
/// Parses from `"local"`, `"utc"` or a fixed offset in the form `+HH:MM`,
/// `-HH:MM` or `+HHMM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ZoneCalendar {
    /// Host-local timezone
    #[default]
    Local,
    /// UTC
    Utc,
    /// Fixed offset from UTC
    Fixed(FixedOffsetCalendar),
}

impl Calendar for ZoneCalendar {
    fn fields(&self, epoch_seconds: i64) -> TimeResult<CalendarFields> {
        match self {
            Self::Local => LocalCalendar.fields(epoch_seconds),
            Self::Utc => UtcCalendar.fields(epoch_seconds),
            Self::Fixed(fixed) => fixed.fields(epoch_seconds),
        }
    }
}

fn parse_offset(value: &str) -> Option<i32> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => return None,
    };
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

impl FromStr for ZoneCalendar {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_ascii_lowercase().as_str() {
            "local" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::Utc),
            _ => {}
        }

        let offset = parse_offset(value).ok_or_else(|| {
            CommonError::validation_with_value(
                "calendar.zone",
                "expected 'local', 'utc' or an offset like '+05:30'",
                value,
            )
        })?;
        FixedOffsetCalendar::east(offset).map(Self::Fixed).map_err(|_| {
            CommonError::validation_with_value("calendar.zone", "offset out of range", value)
        })
    }
}

impl TryFrom<String> for ZoneCalendar {
    type Error = CommonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ZoneCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed(fixed) => {
                let offset = fixed.offset_seconds();
                let sign = if offset < 0 { '-' } else { '+' };
                let magnitude = offset.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, magnitude / 3600, (magnitude % 3600) / 60)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for time::calendar.
    use super::*;

    /// Validates `UtcCalendar::fields` behavior for the epoch scenario.
    ///
    /// Assertions:
    /// - Confirms the epoch is 1970-01-01 00:00:00, a Thursday.
    /// - Confirms the year is reported as 70 (years since 1900).
    #[test]
    fn test_utc_epoch_fields() {
        let fields = UtcCalendar.fields(0).unwrap();
        assert_eq!(fields.year, 70);
        assert_eq!(fields.full_year(), 1970);
        assert_eq!(fields.month, 0);
        assert_eq!(fields.month_number(), 1);
        assert_eq!(fields.day, 1);
        assert_eq!((fields.hour, fields.minute, fields.second), (0, 0, 0));
        assert_eq!(fields.weekday, 4);
        assert_eq!(fields.year_day, 0);
    }

    /// Validates `UtcCalendar::fields` behavior for a known timestamp.
    ///
    /// Assertions:
    /// - Confirms 1_700_000_000 is 2023-11-14 22:13:20 UTC.
    #[test]
    fn test_utc_known_timestamp() {
        let fields = UtcCalendar.fields(1_700_000_000).unwrap();
        assert_eq!(fields.full_year(), 2023);
        assert_eq!(fields.month, 10);
        assert_eq!(fields.day, 14);
        assert_eq!((fields.hour, fields.minute, fields.second), (22, 13, 20));
    }

    /// Validates `FixedOffsetCalendar::fields` behavior across a day boundary.
    ///
    /// Assertions:
    /// - Confirms 23:30 UTC on Dec 31 1969 is 05:00 on Jan 1 1970 at +05:30.
    #[test]
    fn test_fixed_offset_crosses_year() {
        let calendar = FixedOffsetCalendar::east(5 * 3600 + 30 * 60).unwrap();
        let fields = calendar.fields(-1800).unwrap();
        assert_eq!(fields.year, 70);
        assert_eq!((fields.month, fields.day), (0, 1));
        assert_eq!((fields.hour, fields.minute), (5, 0));
    }

    /// Validates the out of range scenario.
    ///
    /// Assertions:
    /// - Confirms `i64::MAX` seconds yields `TimeError::OutOfRange`.
    /// - Confirms a whole-day offset is rejected.
    #[test]
    fn test_out_of_range() {
        assert_eq!(
            UtcCalendar.fields(i64::MAX),
            Err(TimeError::OutOfRange { seconds: i64::MAX })
        );
        assert!(LocalCalendar.fields(i64::MIN).is_err());
        assert!(FixedOffsetCalendar::east(86_400).is_err());
    }

    /// Validates `ZoneCalendar::from_str` behavior.
    ///
    /// Assertions:
    /// - Confirms named zones and offsets parse and display canonically.
    /// - Ensures malformed values are rejected as validation errors.
    #[test]
    fn test_zone_parsing() {
        assert_eq!("local".parse::<ZoneCalendar>().unwrap(), ZoneCalendar::Local);
        assert_eq!(" UTC ".parse::<ZoneCalendar>().unwrap(), ZoneCalendar::Utc);

        let fixed: ZoneCalendar = "-0800".parse().unwrap();
        assert_eq!(fixed.to_string(), "-08:00");
        let fixed: ZoneCalendar = "+05:30".parse().unwrap();
        assert_eq!(fixed.to_string(), "+05:30");

        for bad in ["", "mars", "+5:30", "+05:60", "+24:00", "05:30"] {
            let err = bad.parse::<ZoneCalendar>().unwrap_err();
            assert!(matches!(err, CommonError::Validation { .. }), "{bad:?} gave {err:?}");
        }
    }

    /// Validates `ZoneCalendar` dispatch.
    ///
    /// Assertions:
    /// - Confirms a `Fixed` zone reports the same fields as the calendar it
    ///   wraps.
    #[test]
    fn test_zone_dispatch() {
        let fixed = FixedOffsetCalendar::east(-3600).unwrap();
        let zone = ZoneCalendar::Fixed(fixed);
        assert_eq!(zone.fields(3600).unwrap(), fixed.fields(3600).unwrap());
        assert_eq!(ZoneCalendar::Utc.fields(0).unwrap().hour, 0);
        assert_eq!(zone.fields(3600).unwrap().hour, 0);
    }
}
