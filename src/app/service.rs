//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the threshold configuration and exposes a
//! storage-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!   VitalStore ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │          AppService          │
//!  ReminderStore ◀─│ Abnormal · Classifier · Alert│◀── Clock
//!                  │         · Recurrence         │
//!                  └──────────────────────────────┘
//! ```
//!
//! A vitals submission makes two independent writes: the reading, then
//! its alert batch.  A failure of the second never undoes the first.

use log::{info, warn};
use uuid::Uuid;

use crate::abnormal::is_abnormal;
use crate::alerts::{self, AlertOutcome};
use crate::config::ThresholdConfig;
use crate::error::{Error, Result};
use crate::model::{Notification, OwnerId, VitalReading};
use crate::recurrence;
use crate::reminder::{Recurrence, ReminderSchedule};

use super::commands::{NewReminder, ReminderUpdate, SubmitVitals};
use super::events::{AppEvent, ReminderChange};
use super::ports::{
    Clock, EventSink, NotificationFilter, NotificationPatch, NotificationStore, ReminderFilter, ReminderStore,
    VitalFilter, VitalStore,
};

/// Result of a vitals submission.
///
/// The reading is always present: by the time this exists it has been
/// committed.  Alert persistence is reported separately in `alerts`.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalSubmission {
    pub reading: VitalReading,
    pub alerts: AlertOutcome,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: ThresholdConfig,
}

impl AppService {
    /// Construct the service from a validated configuration.
    pub fn new(config: ThresholdConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "AppService ready: {} classified metrics, {} flagged metrics",
            config.classifier.len(),
            config.abnormal.len()
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    // ── Vitals ────────────────────────────────────────────────

    /// Record a reading, then raise alerts for its abnormal metrics.
    ///
    /// The `store` parameter satisfies **both** [`VitalStore`] and
    /// [`NotificationStore`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn submit_vitals(
        &self,
        owner: &OwnerId,
        cmd: SubmitVitals,
        clock: &impl Clock,
        store: &mut (impl VitalStore + NotificationStore),
        sink: &mut impl EventSink,
    ) -> Result<VitalSubmission> {
        let now = clock.now();
        let values = cmd.values;
        let abnormal = is_abnormal(&values, &self.config);

        let reading = VitalReading {
            id: Uuid::new_v4(),
            owner: owner.clone(),
            values,
            note: cmd.note,
            recorded_at: cmd.recorded_at.unwrap_or(now),
            is_abnormal: abnormal,
        };

        // 1. Commit the reading.  Failure here is the caller's error.
        let reading = store.create_reading(reading)?;
        sink.emit(&AppEvent::ReadingRecorded {
            owner: owner.clone(),
            reading_id: reading.id,
            abnormal,
        });

        // 2. Alerts.  Failure here is reported, not propagated.
        let outcome = alerts::emit(&reading, &self.config, now, store);
        match &outcome {
            AlertOutcome::Clear => {}
            AlertOutcome::Raised(batch) => {
                let highest = batch.iter().map(|n| n.severity).max();
                if let Some(highest) = highest {
                    sink.emit(&AppEvent::AlertsRaised {
                        owner: owner.clone(),
                        reading_id: reading.id,
                        count: batch.len(),
                        highest,
                    });
                }
            }
            AlertOutcome::Failed(e) => {
                sink.emit(&AppEvent::AlertingFailed {
                    owner: owner.clone(),
                    reading_id: reading.id,
                    reason: e.to_string(),
                });
            }
        }

        Ok(VitalSubmission {
            reading,
            alerts: outcome,
        })
    }

    /// The owner's readings, newest first.
    pub fn list_readings(
        &self,
        owner: &OwnerId,
        abnormal_only: bool,
        store: &impl VitalStore,
    ) -> Result<Vec<VitalReading>> {
        let filter = VitalFilter {
            owner: owner.clone(),
            abnormal_only,
        };
        Ok(store.find_readings(&filter)?)
    }

    /// Delete a reading and every alert it raised.
    ///
    /// Alerts go first: if either write fails the reading is still there
    /// and the call can simply be repeated.
    pub fn delete_reading(
        &self,
        owner: &OwnerId,
        id: Uuid,
        store: &mut (impl VitalStore + NotificationStore),
    ) -> Result<usize> {
        let filter = NotificationFilter {
            related_vital_id: Some(id),
            ..NotificationFilter::owner(owner)
        };
        let removed = store.delete_notifications(&filter)?;
        if !store.delete_reading(owner, id)? {
            return Err(Error::NotFound("reading"));
        }
        info!("reading {} deleted with {} related alert(s)", id, removed);
        Ok(removed)
    }

    // ── Reminders ─────────────────────────────────────────────

    /// Active reminders due today and not yet passed, ordered by time.
    pub fn upcoming_reminders(
        &self,
        owner: &OwnerId,
        clock: &impl Clock,
        store: &impl ReminderStore,
        sink: &mut impl EventSink,
    ) -> Result<Vec<ReminderSchedule>> {
        let filter = ReminderFilter {
            owner: owner.clone(),
            active_only: true,
        };
        let reminders = store.find_reminders(&filter)?;
        let due = recurrence::upcoming(&reminders, clock.now());
        sink.emit(&AppEvent::UpcomingListed {
            owner: owner.clone(),
            due: due.len(),
        });
        Ok(due)
    }

    pub fn list_reminders(&self, owner: &OwnerId, store: &impl ReminderStore) -> Result<Vec<ReminderSchedule>> {
        let filter = ReminderFilter {
            owner: owner.clone(),
            active_only: false,
        };
        Ok(store.find_reminders(&filter)?)
    }

    pub fn create_reminder(
        &self,
        owner: &OwnerId,
        new: NewReminder,
        store: &mut impl ReminderStore,
        sink: &mut impl EventSink,
    ) -> Result<ReminderSchedule> {
        let reminder = ReminderSchedule {
            id: Uuid::new_v4(),
            owner: owner.clone(),
            name: new.name,
            description: new.description,
            time: new.time,
            recurrence: new.recurrence,
            is_active: new.is_active,
            category: new.category,
        };
        if let Err(e) = reminder.validate() {
            warn!("rejected reminder for {}: {}", owner, e);
            return Err(e.into());
        }
        let saved = store.create_reminder(reminder)?;
        sink.emit(&AppEvent::ReminderChanged {
            owner: owner.clone(),
            reminder_id: saved.id,
            change: ReminderChange::Created,
        });
        Ok(saved)
    }

    pub fn update_reminder(
        &self,
        owner: &OwnerId,
        id: Uuid,
        update: ReminderUpdate,
        store: &mut impl ReminderStore,
        sink: &mut impl EventSink,
    ) -> Result<ReminderSchedule> {
        let mut reminder = self.find_reminder(owner, id, store)?;

        reminder.recurrence = Self::merge_recurrence(reminder.recurrence, &update)?;
        if let Some(name) = update.name {
            reminder.name = name;
        }
        if let Some(description) = update.description {
            reminder.description = description;
        }
        if let Some(time) = update.time {
            reminder.time = time;
        }
        if let Some(active) = update.is_active {
            reminder.is_active = active;
        }
        if let Some(category) = update.category {
            reminder.category = category;
        }
        reminder.validate()?;

        let saved = store.replace_reminder(reminder)?.ok_or(Error::NotFound("reminder"))?;
        sink.emit(&AppEvent::ReminderChanged {
            owner: owner.clone(),
            reminder_id: id,
            change: ReminderChange::Updated,
        });
        Ok(saved)
    }

    /// Flip `isActive` and return the stored reminder.
    pub fn toggle_reminder(
        &self,
        owner: &OwnerId,
        id: Uuid,
        store: &mut impl ReminderStore,
        sink: &mut impl EventSink,
    ) -> Result<ReminderSchedule> {
        let mut reminder = self.find_reminder(owner, id, store)?;
        reminder.is_active = !reminder.is_active;
        let saved = store.replace_reminder(reminder)?.ok_or(Error::NotFound("reminder"))?;
        sink.emit(&AppEvent::ReminderChanged {
            owner: owner.clone(),
            reminder_id: id,
            change: ReminderChange::Toggled { active: saved.is_active },
        });
        Ok(saved)
    }

    pub fn delete_reminder(
        &self,
        owner: &OwnerId,
        id: Uuid,
        store: &mut impl ReminderStore,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if !store.delete_reminder(owner, id)? {
            return Err(Error::NotFound("reminder"));
        }
        sink.emit(&AppEvent::ReminderChanged {
            owner: owner.clone(),
            reminder_id: id,
            change: ReminderChange::Deleted,
        });
        Ok(())
    }

    // ── Notifications ─────────────────────────────────────────

    pub fn list_notifications(
        &self,
        owner: &OwnerId,
        unread_only: bool,
        store: &impl NotificationStore,
    ) -> Result<Vec<Notification>> {
        let filter = NotificationFilter {
            unread_only,
            ..NotificationFilter::owner(owner)
        };
        Ok(store.find_notifications(&filter)?)
    }

    pub fn unread_count(&self, owner: &OwnerId, store: &impl NotificationStore) -> Result<usize> {
        Ok(self.list_notifications(owner, true, store)?.len())
    }

    pub fn mark_read(&self, owner: &OwnerId, id: Uuid, store: &mut impl NotificationStore) -> Result<()> {
        let patch = NotificationPatch { is_read: Some(true) };
        if store.update_notification(owner, id, patch)? {
            Ok(())
        } else {
            Err(Error::NotFound("notification"))
        }
    }

    /// Mark every unread notification read; returns how many changed.
    pub fn mark_all_read(&self, owner: &OwnerId, store: &mut impl NotificationStore) -> Result<usize> {
        let filter = NotificationFilter {
            unread_only: true,
            ..NotificationFilter::owner(owner)
        };
        let patch = NotificationPatch { is_read: Some(true) };
        Ok(store.update_notifications(&filter, patch)?)
    }

    pub fn delete_notification(&self, owner: &OwnerId, id: Uuid, store: &mut impl NotificationStore) -> Result<()> {
        if store.delete_notification(owner, id)? {
            Ok(())
        } else {
            Err(Error::NotFound("notification"))
        }
    }

    /// Delete all of the owner's notifications; returns the count.
    pub fn clear_notifications(&self, owner: &OwnerId, store: &mut impl NotificationStore) -> Result<usize> {
        Ok(store.delete_notifications(&NotificationFilter::owner(owner))?)
    }

    // ── Internal ──────────────────────────────────────────────

    fn find_reminder(&self, owner: &OwnerId, id: Uuid, store: &impl ReminderStore) -> Result<ReminderSchedule> {
        let filter = ReminderFilter {
            owner: owner.clone(),
            active_only: false,
        };
        store
            .find_reminders(&filter)?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(Error::NotFound("reminder"))
    }

    /// Apply the pattern fields of an update to an existing recurrence.
    fn merge_recurrence(current: Recurrence, update: &ReminderUpdate) -> Result<Recurrence> {
        let frequency = update.frequency.unwrap_or(current.frequency());
        let days = update.days_of_week.or(current.days_of_week());
        let day = update.day_of_month.or(current.day_of_month());
        Ok(Recurrence::assemble(frequency, days, day)?)
    }
}
