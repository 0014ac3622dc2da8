//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The adapter on the other
//! side decides what to do with them.

use uuid::Uuid;

use crate::model::{OwnerId, Severity};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A reading was persisted.
    ReadingRecorded {
        owner: OwnerId,
        reading_id: Uuid,
        abnormal: bool,
    },

    /// Alerts for a reading were persisted.
    AlertsRaised {
        owner: OwnerId,
        reading_id: Uuid,
        count: usize,
        highest: Severity,
    },

    /// The reading was saved but its alerts could not be.
    AlertingFailed {
        owner: OwnerId,
        reading_id: Uuid,
        reason: String,
    },

    /// A reminder was created, edited, toggled or deleted.
    ReminderChanged {
        owner: OwnerId,
        reminder_id: Uuid,
        change: ReminderChange,
    },

    /// An upcoming-reminders view was computed.
    UpcomingListed { owner: OwnerId, due: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderChange {
    Created,
    Updated,
    Toggled { active: bool },
    Deleted,
}
