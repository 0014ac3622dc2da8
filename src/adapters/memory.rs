//! In-memory document store.
//!
//! Implements [`VitalStore`], [`NotificationStore`] and [`ReminderStore`]
//! over plain vectors.  Used for host-side simulation and tests; a real
//! deployment plugs a database adapter into the same ports.
//!
//! Batch writes are all-or-nothing trivially: the batch is appended in one
//! `extend` after every id has been checked.

use std::collections::HashSet;

use log::info;
use uuid::Uuid;

use crate::app::ports::{
    NotificationFilter, NotificationPatch, NotificationStore, ReminderFilter, ReminderStore, StoreError,
    VitalFilter, VitalStore,
};
use crate::model::{Notification, OwnerId, VitalReading};
use crate::reminder::ReminderSchedule;

#[derive(Debug, Default)]
pub struct MemoryStore {
    readings: Vec<VitalReading>,
    notifications: Vec<Notification>,
    reminders: Vec<ReminderSchedule>,
}

impl MemoryStore {
    pub fn new() -> Self {
        info!("MemoryStore: simulation backend");
        Self::default()
    }

    pub fn reading_count(&self) -> usize {
        self.readings.len()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }
}

fn matches_notification(n: &Notification, f: &NotificationFilter) -> bool {
    n.owner == f.owner
        && (!f.unread_only || !n.is_read)
        && f.related_vital_id.is_none_or(|id| n.related_vital_id == Some(id))
}

fn apply_patch(n: &mut Notification, patch: NotificationPatch) {
    if let Some(read) = patch.is_read {
        n.is_read = read;
    }
}

impl VitalStore for MemoryStore {
    fn create_reading(&mut self, reading: VitalReading) -> Result<VitalReading, StoreError> {
        if self.readings.iter().any(|r| r.id == reading.id) {
            return Err(StoreError::Rejected(format!("duplicate reading id {}", reading.id)));
        }
        self.readings.push(reading.clone());
        Ok(reading)
    }

    fn find_readings(&self, filter: &VitalFilter) -> Result<Vec<VitalReading>, StoreError> {
        let mut found: Vec<VitalReading> = self
            .readings
            .iter()
            .filter(|r| r.owner == filter.owner && (!filter.abnormal_only || r.is_abnormal))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(found)
    }

    fn delete_reading(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError> {
        let before = self.readings.len();
        self.readings.retain(|r| !(r.id == id && &r.owner == owner));
        Ok(self.readings.len() != before)
    }
}

impl NotificationStore for MemoryStore {
    fn create_notifications(&mut self, batch: Vec<Notification>) -> Result<Vec<Notification>, StoreError> {
        let mut ids: HashSet<Uuid> = self.notifications.iter().map(|n| n.id).collect();
        if let Some(dup) = batch.iter().find(|n| !ids.insert(n.id)) {
            return Err(StoreError::Rejected(format!("duplicate notification id {}", dup.id)));
        }
        self.notifications.extend(batch.iter().cloned());
        Ok(batch)
    }

    fn find_notifications(&self, filter: &NotificationFilter) -> Result<Vec<Notification>, StoreError> {
        let mut found: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| matches_notification(n, filter))
            .cloned()
            .collect();
        // Stable sort keeps batch order for same-instant alerts.
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    fn update_notification(&mut self, owner: &OwnerId, id: Uuid, patch: NotificationPatch) -> Result<bool, StoreError> {
        match self.notifications.iter_mut().find(|n| n.id == id && &n.owner == owner) {
            Some(n) => {
                apply_patch(n, patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update_notifications(&mut self, filter: &NotificationFilter, patch: NotificationPatch) -> Result<usize, StoreError> {
        let mut count = 0;
        for n in self.notifications.iter_mut().filter(|n| matches_notification(n, filter)) {
            apply_patch(n, patch);
            count += 1;
        }
        Ok(count)
    }

    fn delete_notification(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError> {
        let before = self.notifications.len();
        self.notifications.retain(|n| !(n.id == id && &n.owner == owner));
        Ok(self.notifications.len() != before)
    }

    fn delete_notifications(&mut self, filter: &NotificationFilter) -> Result<usize, StoreError> {
        let before = self.notifications.len();
        self.notifications.retain(|n| !matches_notification(n, filter));
        Ok(before - self.notifications.len())
    }
}

impl ReminderStore for MemoryStore {
    fn create_reminder(&mut self, reminder: ReminderSchedule) -> Result<ReminderSchedule, StoreError> {
        if self.reminders.iter().any(|r| r.id == reminder.id) {
            return Err(StoreError::Rejected(format!("duplicate reminder id {}", reminder.id)));
        }
        self.reminders.push(reminder.clone());
        Ok(reminder)
    }

    fn find_reminders(&self, filter: &ReminderFilter) -> Result<Vec<ReminderSchedule>, StoreError> {
        Ok(self
            .reminders
            .iter()
            .filter(|r| r.owner == filter.owner && (!filter.active_only || r.is_active))
            .cloned()
            .collect())
    }

    fn replace_reminder(&mut self, reminder: ReminderSchedule) -> Result<Option<ReminderSchedule>, StoreError> {
        match self
            .reminders
            .iter_mut()
            .find(|r| r.id == reminder.id && r.owner == reminder.owner)
        {
            Some(slot) => {
                *slot = reminder.clone();
                Ok(Some(reminder))
            }
            None => Ok(None),
        }
    }

    fn delete_reminder(&mut self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError> {
        let before = self.reminders.len();
        self.reminders.retain(|r| !(r.id == id && &r.owner == owner));
        Ok(self.reminders.len() != before)
    }
}
