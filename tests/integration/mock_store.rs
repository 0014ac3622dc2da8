//! Mock store adapter for integration tests.
//!
//! Wraps the in-memory store, records every port call so tests can assert
//! on the call history, and can be told to fail individual collections.

use uuid::Uuid;
use vitaltrack::adapters::memory::MemoryStore;
use vitaltrack::app::events::AppEvent;
use vitaltrack::app::ports::{
    EventSink, NotificationFilter, NotificationPatch, NotificationStore, ReminderFilter, ReminderStore,
    StoreError, VitalFilter, VitalStore,
};
use vitaltrack::model::{Notification, OwnerId, VitalReading};
use vitaltrack::reminder::ReminderSchedule;

// ── Store call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    CreateReading,
    CreateNotifications { batch: usize },
    DeleteNotifications,
    Other,
}

// ── MockStore ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockStore {
    pub inner: MemoryStore,
    pub calls: Vec<StoreCall>,
    pub fail_readings: bool,
    pub fail_notifications: bool,
    pub fail_notification_deletes: bool,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_calls(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                StoreCall::CreateNotifications { batch } => Some(*batch),
                _ => None,
            })
            .collect()
    }
}

impl VitalStore for MockStore {
    fn create_reading(&mut self, reading: VitalReading) -> Result<VitalReading, StoreError> {
        self.calls.push(StoreCall::CreateReading);
        if self.fail_readings {
            return Err(StoreError::Unavailable);
        }
        self.inner.create_reading(reading)
    }

    fn find_readings(&self, filter: &VitalFilter) -> Result<Vec<VitalReading>, StoreError> {
        self.inner.find_readings(filter)
    }

    fn delete_reading(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError> {
        self.calls.push(StoreCall::Other);
        self.inner.delete_reading(owner, id)
    }
}

impl NotificationStore for MockStore {
    fn create_notifications(&mut self, batch: Vec<Notification>) -> Result<Vec<Notification>, StoreError> {
        self.calls.push(StoreCall::CreateNotifications { batch: batch.len() });
        if self.fail_notifications {
            return Err(StoreError::Unavailable);
        }
        self.inner.create_notifications(batch)
    }

    fn find_notifications(&self, filter: &NotificationFilter) -> Result<Vec<Notification>, StoreError> {
        self.inner.find_notifications(filter)
    }

    fn update_notification(&mut self, owner: &OwnerId, id: Uuid, patch: NotificationPatch) -> Result<bool, StoreError> {
        self.calls.push(StoreCall::Other);
        self.inner.update_notification(owner, id, patch)
    }

    fn update_notifications(&mut self, filter: &NotificationFilter, patch: NotificationPatch) -> Result<usize, StoreError> {
        self.calls.push(StoreCall::Other);
        self.inner.update_notifications(filter, patch)
    }

    fn delete_notification(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError> {
        self.calls.push(StoreCall::Other);
        self.inner.delete_notification(owner, id)
    }

    fn delete_notifications(&mut self, filter: &NotificationFilter) -> Result<usize, StoreError> {
        self.calls.push(StoreCall::DeleteNotifications);
        if self.fail_notification_deletes {
            return Err(StoreError::Unavailable);
        }
        self.inner.delete_notifications(filter)
    }
}

impl ReminderStore for MockStore {
    fn create_reminder(&mut self, reminder: ReminderSchedule) -> Result<ReminderSchedule, StoreError> {
        self.calls.push(StoreCall::Other);
        self.inner.create_reminder(reminder)
    }

    fn find_reminders(&self, filter: &ReminderFilter) -> Result<Vec<ReminderSchedule>, StoreError> {
        self.inner.find_reminders(filter)
    }

    fn replace_reminder(&mut self, reminder: ReminderSchedule) -> Result<Option<ReminderSchedule>, StoreError> {
        self.calls.push(StoreCall::Other);
        self.inner.replace_reminder(reminder)
    }

    fn delete_reminder(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError> {
        self.calls.push(StoreCall::Other);
        self.inner.delete_reminder(owner, id)
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, e: &AppEvent) {
        self.events.push(e.clone());
    }
}
