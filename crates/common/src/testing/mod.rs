//! Testing utilities and helpers
//!
//! This module provides:
//! - **[`time`]**: a settable mock clock for deterministic "now" values
//!
//! ## Usage
//!
//! ```rust
//! use chronoval_common::testing::MockClock;
//! use chronoval_common::time::AbsoluteTime;
//!
//! fn test_with_mock_time() {
//!     let clock = MockClock::at(AbsoluteTime::ZERO);
//!     clock.advance(std::time::Duration::from_secs(5));
//!     // ... test with controlled time
//! }
//! ```

pub mod time;

pub use time::MockClock;

