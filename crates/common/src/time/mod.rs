//! Microsecond-resolution time values
//!
//! This module provides:
//! - **[`absolute`]**: [`AbsoluteTime`], an epoch instant or signed span with
//!   checked and operator arithmetic
//! - **[`duration_view`]**: [`DurationView`], elapsed-span rendering
//!   (`1d 1:01:01.500000`)
//! - **[`calendar`]**: calendar field breakdown in local, UTC or fixed-offset
//!   time
//! - **[`clock`]**: the [`Clock`] seam used to read "now"
//! - **[`config`]**: [`TimeConfig`] loaded from TOML and the environment
//! - **[`timeval`]**: the normalized seconds/microseconds pair underneath
//!
//! ## Usage
//!
//! ```rust
//! use std::num::NonZeroU32;
//!
//! use chronoval_common::time::{AbsoluteTime, DurationView};
//!
//! let start = AbsoluteTime::from_parts(10, 500_000);
//! let end = start + AbsoluteTime::from_parts(3_600, 750_000);
//! assert_eq!(end.to_string(), "3611.250000s");
//!
//! let span = end - start;
//! assert_eq!(DurationView::new(&span, true).to_string(), "1:00:00.750000");
//!
//! let half = span / NonZeroU32::new(2).unwrap();
//! assert_eq!(half.seconds(), 1_800);
//! ```

pub mod absolute;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod duration_view;
pub mod error;
pub mod timeval;

// Re-export commonly used items
pub use absolute::AbsoluteTime;
pub use calendar::{
    Calendar, CalendarFields, FixedOffsetCalendar, LocalCalendar, UtcCalendar, ZoneCalendar,
    TM_YEAR_BASE,
};
pub use clock::{Clock, SystemClock};
pub use config::{CalendarConfig, DisplayConfig, TimeConfig, ENV_SHOW_SUB_SECOND, ENV_TIMEZONE};
pub use duration_view::DurationView;
pub use error::{TimeError, TimeResult};
pub use timeval::{TimeVal, MICROS_PER_SECOND};

// Re-export the mock clock next to the trait it implements
pub use crate::testing::time::MockClock;
