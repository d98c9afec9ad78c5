//! Drip schedule arithmetic: when does a post become visible to a reader?
//!
//! A post's drip setting is a count of intervals ("3 days", "2 weeks")
//! measured from the reader's reference date (their signup). The comparison
//! returns `None` whenever data is missing so callers can fail open.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Time constants (seconds)
// ---------------------------------------------------------------------------

pub const MINUTE_IN_SECONDS: i64 = 60;
pub const HOUR_IN_SECONDS: i64 = 60 * MINUTE_IN_SECONDS;
pub const DAY_IN_SECONDS: i64 = 24 * HOUR_IN_SECONDS;
pub const WEEK_IN_SECONDS: i64 = 7 * DAY_IN_SECONDS;
/// A drip "month" is a flat thirty days.
pub const MONTH_IN_SECONDS: i64 = 30 * DAY_IN_SECONDS;
pub const YEAR_IN_SECONDS: i64 = 365 * DAY_IN_SECONDS;

/// Upper bound on a drip count. Anything larger is almost certainly a typo.
pub const MAX_DRIP_COUNT: i32 = 1000;

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// Unit a drip count is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DripInterval {
    Hour,
    Day,
    Week,
    Month,
}

/// All interval names accepted in settings.
pub const VALID_INTERVALS: &[&str] = &["hour", "day", "week", "month"];

impl DripInterval {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Parse a stored interval name.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(CoreError::Validation(format!(
                "Invalid drip interval '{other}'. Must be one of: {}",
                VALID_INTERVALS.join(", ")
            ))),
        }
    }

    pub fn seconds(self) -> i64 {
        match self {
            Self::Hour => HOUR_IN_SECONDS,
            Self::Day => DAY_IN_SECONDS,
            Self::Week => WEEK_IN_SECONDS,
            Self::Month => MONTH_IN_SECONDS,
        }
    }
}

// ---------------------------------------------------------------------------
// Setting
// ---------------------------------------------------------------------------

/// A post's drip delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DripSetting {
    pub count: i32,
    pub interval: DripInterval,
}

impl DripSetting {
    /// Total delay, or `None` when the count does not describe a delay.
    pub fn delay(&self) -> Option<Duration> {
        if self.count <= 0 {
            return None;
        }
        Some(Duration::seconds(i64::from(self.count) * self.interval.seconds()))
    }
}

/// Validate a drip count submitted by an administrator.
pub fn validate_drip_count(count: i32) -> Result<(), CoreError> {
    if !(1..=MAX_DRIP_COUNT).contains(&count) {
        return Err(CoreError::Validation(format!(
            "Drip count must be between 1 and {MAX_DRIP_COUNT}, got {count}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Outcome of comparing a reader's reference date against a drip delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DripComparison {
    /// Whether the content may be shown now.
    pub display: bool,
    /// Reader-facing explanation when the content is withheld.
    pub message: Option<String>,
    /// When the content becomes (or became) available.
    pub available_at: Timestamp,
}

/// Compare the reader's signup date plus the post's drip delay against `now`.
///
/// Returns `None` when the post has no usable drip setting or the reader has
/// no reference date.
pub fn compare_drip_signup_dates(
    setting: Option<&DripSetting>,
    signup: Option<Timestamp>,
    now: Timestamp,
) -> Option<DripComparison> {
    let delay = setting?.delay()?;
    let signup = signup?;
    let available_at = signup.checked_add_signed(delay)?;

    if now >= available_at {
        return Some(DripComparison {
            display: true,
            message: None,
            available_at,
        });
    }

    let remaining = (available_at - now).num_seconds();
    Some(DripComparison {
        display: false,
        message: Some(format!(
            "This content will be available in {}.",
            human_time_diff(remaining)
        )),
        available_at,
    })
}

/// Render a number of seconds as a rounded, human-readable span such as
/// `"5 mins"`, `"1 hour"` or `"3 weeks"`. Always at least one unit.
pub fn human_time_diff(seconds: i64) -> String {
    let diff = seconds.unsigned_abs() as f64;

    let (amount, singular, plural) = if diff < HOUR_IN_SECONDS as f64 {
        (diff / MINUTE_IN_SECONDS as f64, "min", "mins")
    } else if diff < DAY_IN_SECONDS as f64 {
        (diff / HOUR_IN_SECONDS as f64, "hour", "hours")
    } else if diff < WEEK_IN_SECONDS as f64 {
        (diff / DAY_IN_SECONDS as f64, "day", "days")
    } else if diff < MONTH_IN_SECONDS as f64 {
        (diff / WEEK_IN_SECONDS as f64, "week", "weeks")
    } else if diff < YEAR_IN_SECONDS as f64 {
        (diff / MONTH_IN_SECONDS as f64, "month", "months")
    } else {
        (diff / YEAR_IN_SECONDS as f64, "year", "years")
    };

    let n = (amount.round() as i64).max(1);
    let unit = if n == 1 { singular } else { plural };
    format!("{n} {unit}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
