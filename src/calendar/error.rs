use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Why a `H:MM AM|PM` string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("expected `H:MM AM` or `H:MM PM`")]
    Pattern,

    #[error("hour {0} is outside 1..=12")]
    HourOutOfRange(u32),

    #[error("minute {0} is outside 0..=59")]
    MinuteOutOfRange(u32),
}

/// Errors raised by the projection engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("item `{id}` has malformed date `{value}` (expected YYYY-MM-DD)")]
    MalformedDate { id: String, value: String },

    #[error("item `{id}` has malformed time `{value}`: {reason}")]
    MalformedTime {
        id: String,
        value: String,
        reason: TimeFormatError,
    },

    #[error("week containing {0} runs outside the supported date range")]
    DateOutOfRange(NaiveDate),
}

/// Errors raised while loading items from disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read items file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse items file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate item id `{0}`")]
    DuplicateId(String),

    #[error(transparent)]
    Invalid(#[from] ScheduleError),
}
