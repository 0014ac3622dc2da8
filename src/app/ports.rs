//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (document stores, clocks, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches a database directly.
//!
//! ## Contract notes
//!
//! - Stores apply owner scoping, filters and ordering exactly as requested;
//!   the core trusts them and does not re-filter.
//! - Each call is one single-document (or one batch) write.  There are no
//!   transactions spanning collections.
//! - All port errors are typed; callers must handle every variant explicitly.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::model::{Notification, OwnerId, VitalReading};
use crate::reminder::ReminderSchedule;

// ───────────────────────────────────────────────────────────────
// Filters and patches
// ───────────────────────────────────────────────────────────────

/// Query over one owner's vital readings.  Results are newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VitalFilter {
    pub owner: OwnerId,
    pub abnormal_only: bool,
}

/// Query over one owner's notifications.  Results are newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFilter {
    pub owner: OwnerId,
    pub unread_only: bool,
    /// Restrict to alerts raised by one reading.
    pub related_vital_id: Option<Uuid>,
}

impl NotificationFilter {
    pub fn owner(owner: &OwnerId) -> Self {
        Self {
            owner: owner.clone(),
            unread_only: false,
            related_vital_id: None,
        }
    }
}

/// Partial update of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationPatch {
    pub is_read: Option<bool>,
}

/// Query over one owner's reminders.  Results are in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderFilter {
    pub owner: OwnerId,
    pub active_only: bool,
}

// ───────────────────────────────────────────────────────────────
// Store ports (driven adapters: domain ↔ persistence)
// ───────────────────────────────────────────────────────────────

/// Vital reading collection.
pub trait VitalStore {
    /// Persist a new reading and return it as stored.
    fn create_reading(&mut self, reading: VitalReading) -> Result<VitalReading, StoreError>;

    fn find_readings(&self, filter: &VitalFilter) -> Result<Vec<VitalReading>, StoreError>;

    /// Delete one reading.  `Ok(false)` if it did not exist for this owner.
    fn delete_reading(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError>;
}

/// Notification collection.
pub trait NotificationStore {
    /// Persist a batch atomically: either every notification is stored or
    /// none is.  Never called with an empty batch.
    fn create_notifications(&mut self, batch: Vec<Notification>) -> Result<Vec<Notification>, StoreError>;

    fn find_notifications(&self, filter: &NotificationFilter) -> Result<Vec<Notification>, StoreError>;

    /// Patch one notification.  `Ok(false)` if it did not exist.
    fn update_notification(&mut self, owner: &OwnerId, id: Uuid, patch: NotificationPatch) -> Result<bool, StoreError>;

    /// Patch every notification matching `filter`; returns the match count.
    fn update_notifications(&mut self, filter: &NotificationFilter, patch: NotificationPatch) -> Result<usize, StoreError>;

    fn delete_notification(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError>;

    /// Delete every notification matching `filter`; returns the count.
    fn delete_notifications(&mut self, filter: &NotificationFilter) -> Result<usize, StoreError>;
}

/// Reminder collection.
pub trait ReminderStore {
    fn create_reminder(&mut self, reminder: ReminderSchedule) -> Result<ReminderSchedule, StoreError>;

    fn find_reminders(&self, filter: &ReminderFilter) -> Result<Vec<ReminderSchedule>, StoreError>;

    /// Replace a stored reminder.  `Ok(None)` if it did not exist.
    fn replace_reminder(&mut self, reminder: ReminderSchedule) -> Result<Option<ReminderSchedule>, StoreError>;

    fn delete_reminder(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Server wall clock, in the local time zone reminders are written in.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from store port operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend could not be reached.
    Unavailable,
    /// Backend refused the write (schema, quota, duplicate id).
    Rejected(String),
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "store unavailable"),
            Self::Rejected(why) => write!(f, "write rejected: {}", why),
        }
    }
}

impl std::error::Error for StoreError {}
