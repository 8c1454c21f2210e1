//! Time display configuration
//!
//! Selects the calendar used for field accessors and the default sub-second
//! flag for duration views.
//!
//! ## Loading Strategy
//! 1. Start from the TOML file when a path is given, otherwise from defaults
//! 2. Apply environment variable overrides
//!
//! ## Environment Variables
//! - `CHRONOVAL_SHOW_SUB_SECOND`: render microseconds in duration views
//!   (`1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`)
//! - `CHRONOVAL_TIMEZONE`: `local`, `utc`, or a fixed offset such as `+05:30`
//!
//! ## File Format
//!
//! ```toml
//! [display]
//! show_sub_second = true
//!
//! [calendar]
//! zone = "+05:30"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::absolute::AbsoluteTime;
use super::calendar::{Calendar, CalendarFields, ZoneCalendar};
use super::duration_view::DurationView;
use super::error::TimeResult;
use crate::error::{CommonError, CommonResult};

/// Environment variable for [`DisplayConfig::show_sub_second`]
pub const ENV_SHOW_SUB_SECOND: &str = "CHRONOVAL_SHOW_SUB_SECOND";

/// Environment variable for [`CalendarConfig::zone`]
pub const ENV_TIMEZONE: &str = "CHRONOVAL_TIMEZONE";

/// Time configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeConfig {
    pub display: DisplayConfig,
    pub calendar: CalendarConfig,
}

/// Display configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub show_sub_second: bool,
}

/// Calendar configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    pub zone: ZoneCalendar,
}

impl TimeConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    /// Returns `CommonError::Config` if the file cannot be read or an
    /// environment value is malformed, `CommonError::Serialization` if the
    /// file is not valid TOML, and `CommonError::Validation` for an unknown
    /// timezone.
    pub fn load(path: Option<&Path>) -> CommonResult<Self> {
        let base = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from environment variables only.
    ///
    /// # Errors
    /// See [`TimeConfig::with_env_overrides`].
    pub fn load_from_env() -> CommonResult<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `CommonError::Config` if the file is missing or unreadable and
    /// `CommonError::Serialization` if it does not parse.
    pub fn load_from_file(path: &Path) -> CommonResult<Self> {
        if !path.exists() {
            return Err(CommonError::config(format!("Config file not found: {}", path.display())));
        }

        info!(path = %path.display(), "Loading time configuration from file");

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CommonError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    /// Returns `CommonError::Serialization` if the text does not parse.
    pub fn from_toml_str(contents: &str) -> CommonResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply overrides read through `lookup`, which maps a variable name to
    /// its value. Unset variables leave the current value untouched.
    ///
    /// # Errors
    /// Returns `CommonError::Config` for a malformed boolean and
    /// `CommonError::Validation` for an unknown timezone.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> CommonResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SHOW_SUB_SECOND) {
            self.display.show_sub_second = parse_bool(ENV_SHOW_SUB_SECOND, &value)?;
            debug!(show_sub_second = self.display.show_sub_second, "Applied environment override");
        }
        if let Some(value) = lookup(ENV_TIMEZONE) {
            self.calendar.zone = value.parse()?;
            debug!(zone = %self.calendar.zone, "Applied environment override");
        }
        Ok(self)
    }

    /// The configured calendar
    pub const fn calendar(&self) -> ZoneCalendar {
        self.calendar.zone
    }

    /// Calendar fields of `time` in the configured calendar.
    ///
    /// # Errors
    /// See [`Calendar::fields`].
    pub fn calendar_fields(&self, time: &AbsoluteTime) -> TimeResult<CalendarFields> {
        self.calendar.zone.fields(time.seconds())
    }

    /// Duration view of `time` using the configured sub-second flag.
    pub fn duration_view(&self, time: &AbsoluteTime) -> DurationView {
        DurationView::new(time, self.display.show_sub_second)
    }
}

/// Parse a boolean the way the workspace's environment loaders accept it.
fn parse_bool(key: &str, value: &str) -> CommonResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CommonError::config_field(key, format!("expected a boolean, got '{}'", value))),
    }
}
