//! Microsecond time values shared across Chronoval crates.
//!
//! # Safety and Quality
//!
//! This crate enforces strict safety and quality standards to ensure
//! reliability across all Chronoval components.
//!
//! # Modules
//!
//! - `error`: shared error types and classification
//! - `time`: absolute times, duration views, calendars and configuration
//! - `testing`: mock clock for deterministic tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod error;
pub mod time;

// Testing utilities
// ---------------------------------------------------------------
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
pub use time::{
    AbsoluteTime, Calendar, CalendarFields, Clock, DurationView, SystemClock, TimeConfig,
    TimeError, TimeResult, TimeVal, ZoneCalendar,
};
