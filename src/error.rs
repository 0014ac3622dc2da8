//! Unified error types for the VitalTrack core.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! service's error handling uniform.  Evaluators (classifier, abnormal flag,
//! recurrence) are total and never produce errors; only store calls and
//! input validation can fail.

use core::fmt;

use crate::app::ports::StoreError;
use crate::metric::Metric;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible service operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The persistence collaborator rejected a call.
    Store(StoreError),
    /// Caller-supplied data violated an invariant.
    Validation(ValidationError),
    /// The addressed record does not exist for this owner.
    NotFound(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::NotFound(what) => write!(f, "{what} not found"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Rejected input.  Values are never silently clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `time` is not a 24-hour `HH:MM` string.
    MalformedTime(String),
    /// A `daysOfWeek` entry outside 0–6.
    DayOfWeekOutOfRange(u8),
    /// `dayOfMonth` outside 1–31.
    DayOfMonthOutOfRange(u8),
    /// A weekly reminder with no days selected.
    NoDaysSelected,
    /// A monthly reminder without `dayOfMonth`.
    MissingDayOfMonth,
    /// Reminder name is empty or whitespace.
    EmptyName,
    /// Threshold bounds for a metric are not ordered
    /// `criticalMin <= warningMin <= warningMax <= criticalMax`.
    UnorderedBounds(Metric),
    /// A threshold bound is NaN or infinite.
    NonFiniteBound(Metric),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTime(s) => write!(f, "time {s:?} is not HH:MM (24-hour)"),
            Self::DayOfWeekOutOfRange(d) => write!(f, "day of week {d} outside 0-6"),
            Self::DayOfMonthOutOfRange(d) => write!(f, "day of month {d} outside 1-31"),
            Self::NoDaysSelected => write!(f, "weekly reminder needs at least one day"),
            Self::MissingDayOfMonth => write!(f, "monthly reminder needs a day of month"),
            Self::EmptyName => write!(f, "reminder name is empty"),
            Self::UnorderedBounds(m) => write!(f, "bounds for {m} are not ordered"),
            Self::NonFiniteBound(m) => write!(f, "bounds for {m} contain a non-finite value"),
        }
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
