//! A point in time given either absolutely or relative to now.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta, Utc};
use thiserror::Error;

use crate::catalog::FlagParse;
use crate::error::BoxError;
use crate::extension::SetValue;

/// Raised when a value is neither a timestamp nor a duration.
#[derive(Debug, Error)]
#[error("{raw:?} is neither an RFC 3339 time ({time}) nor a duration ({duration})")]
pub struct InvalidTimeOrDuration {
    raw: String,
    time: chrono::ParseError,
    #[source]
    duration: humantime::DurationError,
}

/// An RFC 3339 timestamp such as `2020-03-18T12:01:33Z`, or a duration such
/// as `-1h30m` relative to the moment it is resolved.
///
/// # Examples
///
/// ```
/// use flagarize::ext::TimeOrDuration;
///
/// let end: TimeOrDuration = "9999-12-31T23:59:59Z".parse()?;
/// assert_eq!(end.timestamp_millis(), Some(253_402_300_799_000));
///
/// let window: TimeOrDuration = "-2h".parse()?;
/// assert_eq!(window.to_string(), "-2h");
/// # Ok::<(), flagarize::ext::InvalidTimeOrDuration>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeOrDuration {
    /// Nothing parsed yet.
    #[default]
    Unset,
    /// An absolute timestamp.
    Time(DateTime<FixedOffset>),
    /// An offset from now.
    Relative {
        /// Whether the offset points into the past.
        negative: bool,
        /// Magnitude of the offset.
        duration: Duration,
    },
}

impl TimeOrDuration {
    /// Milliseconds since the Unix epoch, resolving relative values against
    /// the current time. `None` when unset or out of range.
    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        match *self {
            Self::Unset => None,
            Self::Time(time) => Some(time.timestamp_millis()),
            Self::Relative { negative, duration } => {
                let delta = TimeDelta::from_std(duration).ok()?;
                let delta = if negative { -delta } else { delta };
                Utc::now()
                    .checked_add_signed(delta)
                    .map(|at| at.timestamp_millis())
            }
        }
    }
}

impl FromStr for TimeOrDuration {
    type Err = InvalidTimeOrDuration;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let time = match DateTime::parse_from_rfc3339(raw) {
            Ok(time) => return Ok(Self::Time(time)),
            Err(err) => err,
        };
        let (negative, magnitude) = raw
            .strip_prefix('-')
            .map_or((false, raw), |rest| (true, rest));
        humantime::parse_duration(magnitude)
            .map(|duration| Self::Relative { negative, duration })
            .map_err(|duration| InvalidTimeOrDuration {
                raw: raw.to_owned(),
                time,
                duration,
            })
    }
}

impl FlagParse for TimeOrDuration {
    fn parse_flag(raw: &str) -> Result<Self, BoxError> {
        Ok(raw.parse()?)
    }
}

impl SetValue for TimeOrDuration {
    fn set_value(&mut self, raw: &str) -> Result<(), BoxError> {
        *self = raw.parse()?;
        Ok(())
    }
}

impl fmt::Display for TimeOrDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("unset"),
            Self::Time(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Relative { negative, duration } => {
                let sign = if *negative { "-" } else { "" };
                write!(f, "{sign}{}", humantime::format_duration(*duration))
            }
        }
    }
}
