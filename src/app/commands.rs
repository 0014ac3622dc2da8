//! Inbound request payloads for the application service.
//!
//! These arrive already decoded and typed from the transport layer; the
//! [`AppService`](super::service::AppService) interprets and acts upon them.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::metric::MetricValues;
use crate::reminder::{DayOfMonth, DaysOfWeek, Frequency, Recurrence, TimeOfDay};

/// A vitals submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVitals {
    pub values: MetricValues,
    #[serde(default)]
    pub note: String,
    /// When the measurement was taken; defaults to the server clock.
    #[serde(default)]
    pub recorded_at: Option<NaiveDateTime>,
}

/// Fields of a new reminder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub time: TimeOfDay,
    #[serde(flatten)]
    pub recurrence: Recurrence,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub category: String,
}

fn active_by_default() -> bool {
    true
}

/// Partial edit of a reminder; `None` leaves a field unchanged.
///
/// Pattern fields are kept loose here and resolved against the stored
/// reminder: `daysOfWeek` alone edits a weekly reminder's days, while a new
/// `frequency` needs whatever pattern data that frequency requires.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub time: Option<TimeOfDay>,
    pub frequency: Option<Frequency>,
    pub days_of_week: Option<DaysOfWeek>,
    pub day_of_month: Option<DayOfMonth>,
    pub is_active: Option<bool>,
    pub category: Option<String>,
}
