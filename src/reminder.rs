//! Reminder schedule records and their validated field types.
//!
//! Range invariants are carried by the types: a [`TimeOfDay`] is always a
//! valid 24-hour `HH:MM`, a [`DaysOfWeek`] only holds days 0–6
//! (0 = Sunday), and a [`DayOfMonth`] is always 1–31.  Deserialisation goes
//! through the same checks, so a record read back from the store cannot
//! violate them either.

use core::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::OwnerId;

// ═══════════════════════════════════════════════════════════════
//  Time of day
// ═══════════════════════════════════════════════════════════════

/// Minute-resolution 24-hour time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::MalformedTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    /// Parse a strict `HH:MM` string (two digits each, `00:00`–`23:59`).
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedTime(s.to_owned());
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(malformed());
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(malformed());
        }
        let [h1, h0, m1, m0] = digits.map(|d| d - b'0');
        Self::new(h1 * 10 + h0, m1 * 10 + m0).map_err(|_| malformed())
    }

    /// Time of day of a wall-clock instant, truncated to the minute.
    pub fn of(now: NaiveDateTime) -> Self {
        use chrono::Timelike;
        Self {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Days of week
// ═══════════════════════════════════════════════════════════════

/// Set of weekdays as a bitmask; bit `n` is day `n` (0 = Sunday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DaysOfWeek(u8);

impl DaysOfWeek {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from day numbers, rejecting anything outside 0–6.
    pub fn from_days(days: &[u8]) -> Result<Self, ValidationError> {
        days.iter().try_fold(Self::empty(), |set, &d| {
            if d > 6 {
                Err(ValidationError::DayOfWeekOutOfRange(d))
            } else {
                Ok(Self(set.0 | (1 << d)))
            }
        })
    }

    pub fn contains(self, day: u8) -> bool {
        day <= 6 && self.0 & (1 << day) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Day numbers in ascending order.
    pub fn days(self) -> Vec<u8> {
        (0..=6).filter(|&d| self.contains(d)).collect()
    }
}

impl TryFrom<Vec<u8>> for DaysOfWeek {
    type Error = ValidationError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_days(&days)
    }
}

impl From<DaysOfWeek> for Vec<u8> {
    fn from(d: DaysOfWeek) -> Self {
        d.days()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Day of month
// ═══════════════════════════════════════════════════════════════

/// Calendar day 1–31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfMonth(u8);

impl DayOfMonth {
    pub fn new(day: u8) -> Result<Self, ValidationError> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(ValidationError::DayOfMonthOutOfRange(day))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DayOfMonth {
    type Error = ValidationError;

    fn try_from(day: u8) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<DayOfMonth> for u8 {
    fn from(d: DayOfMonth) -> Self {
        d.0
    }
}

// ═══════════════════════════════════════════════════════════════
//  Recurrence and schedule
// ═══════════════════════════════════════════════════════════════

/// Bare frequency tag, without pattern data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Once,
}

/// How often a reminder repeats.  Pattern data only exists on the variant
/// that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly {
        #[serde(rename = "daysOfWeek")]
        days_of_week: DaysOfWeek,
    },
    Monthly {
        #[serde(rename = "dayOfMonth")]
        day_of_month: DayOfMonth,
    },
    Once,
}

impl Recurrence {
    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Daily => Frequency::Daily,
            Self::Weekly { .. } => Frequency::Weekly,
            Self::Monthly { .. } => Frequency::Monthly,
            Self::Once => Frequency::Once,
        }
    }

    /// Assemble a recurrence from a frequency tag and loose pattern fields.
    /// Pattern fields the frequency does not use are ignored.
    pub fn assemble(
        frequency: Frequency,
        days_of_week: Option<DaysOfWeek>,
        day_of_month: Option<DayOfMonth>,
    ) -> Result<Self, ValidationError> {
        match frequency {
            Frequency::Daily => Ok(Self::Daily),
            Frequency::Once => Ok(Self::Once),
            Frequency::Weekly => match days_of_week {
                Some(days) if !days.is_empty() => Ok(Self::Weekly { days_of_week: days }),
                _ => Err(ValidationError::NoDaysSelected),
            },
            Frequency::Monthly => day_of_month
                .map(|day| Self::Monthly { day_of_month: day })
                .ok_or(ValidationError::MissingDayOfMonth),
        }
    }

    pub fn days_of_week(&self) -> Option<DaysOfWeek> {
        match self {
            Self::Weekly { days_of_week } => Some(*days_of_week),
            _ => None,
        }
    }

    pub fn day_of_month(&self) -> Option<DayOfMonth> {
        match self {
            Self::Monthly { day_of_month } => Some(*day_of_month),
            _ => None,
        }
    }
}

/// A user-configured recurring reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSchedule {
    pub id: Uuid,
    pub owner: OwnerId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub time: TimeOfDay,
    #[serde(flatten)]
    pub recurrence: Recurrence,
    pub is_active: bool,
    #[serde(default)]
    pub category: String,
}

impl ReminderSchedule {
    /// Cross-field checks the field types cannot express on their own.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if let Recurrence::Weekly { days_of_week } = self.recurrence {
            if days_of_week.is_empty() {
                return Err(ValidationError::NoDaysSelected);
            }
        }
        Ok(())
    }
}
