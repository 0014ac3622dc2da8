//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  Whatever logger the host binary installs decides
//! where the lines end up.

use log::{info, warn};

use crate::app::events::{AppEvent, ReminderChange};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ReadingRecorded {
                owner,
                reading_id,
                abnormal,
            } => {
                info!(
                    "VITAL | owner={} | reading={} | abnormal={}",
                    owner, reading_id, abnormal
                );
            }
            AppEvent::AlertsRaised {
                owner,
                reading_id,
                count,
                highest,
            } => {
                info!(
                    "ALERT | owner={} | reading={} | count={} | highest={:?}",
                    owner, reading_id, count, highest
                );
            }
            AppEvent::AlertingFailed {
                owner,
                reading_id,
                reason,
            } => {
                warn!(
                    "ALERT | owner={} | reading={} | saved without alerts: {}",
                    owner, reading_id, reason
                );
            }
            AppEvent::ReminderChanged {
                owner,
                reminder_id,
                change,
            } => {
                let what = match change {
                    ReminderChange::Created => "created".to_owned(),
                    ReminderChange::Updated => "updated".to_owned(),
                    ReminderChange::Toggled { active } => format!("toggled active={active}"),
                    ReminderChange::Deleted => "deleted".to_owned(),
                };
                info!("REMIND | owner={} | reminder={} | {}", owner, reminder_id, what);
            }
            AppEvent::UpcomingListed { owner, due } => {
                info!("REMIND | owner={} | upcoming due={}", owner, due);
            }
        }
    }
}
