//! Vital alert emitter.
//!
//! Turns the classifier verdicts for one reading into [`Notification`]s
//! and persists them as a single batch.  One notification per abnormal
//! metric; a reading with nothing abnormal produces no store call at all.

use chrono::NaiveDateTime;
use log::{info, warn};
use uuid::Uuid;

use crate::app::ports::{NotificationStore, StoreError};
use crate::classifier::{Direction, Verdict, classify_metric};
use crate::config::{MetricBounds, ThresholdConfig};
use crate::metric::Metric;
use crate::model::{AlertMetadata, Notification, NotificationKind, Severity, VitalReading};

const CRITICAL_ACTION: &str = "Please seek medical attention immediately.";
const WARNING_ACTION: &str = "Please monitor your health and consult a doctor if this persists.";

/// What happened to the alerts of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// Every metric was normal or absent; nothing was written.
    Clear,
    /// The whole batch was persisted.
    Raised(Vec<Notification>),
    /// The store rejected the batch.  The reading itself is unaffected.
    Failed(StoreError),
}

impl AlertOutcome {
    /// Alerts that were persisted (empty unless `Raised`).
    pub fn notifications(&self) -> &[Notification] {
        match self {
            Self::Raised(batch) => batch,
            Self::Clear | Self::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Build (but do not persist) the alerts for `reading`.
pub fn build_alerts(reading: &VitalReading, config: &ThresholdConfig, now: NaiveDateTime) -> Vec<Notification> {
    reading
        .values
        .iter()
        .filter_map(|(metric, value)| {
            let bounds = config.bounds(metric)?;
            match classify_metric(config, metric, Some(value))? {
                Verdict::Normal => None,
                Verdict::Warning(dir) => Some(alert(reading, metric, value, bounds, Severity::Warning, dir, now)),
                Verdict::Critical(dir) => Some(alert(reading, metric, value, bounds, Severity::Critical, dir, now)),
            }
        })
        .collect()
}

/// Build and persist the alerts for `reading` as one batch.
pub fn emit(
    reading: &VitalReading,
    config: &ThresholdConfig,
    now: NaiveDateTime,
    store: &mut impl NotificationStore,
) -> AlertOutcome {
    let batch = build_alerts(reading, config, now);
    if batch.is_empty() {
        return AlertOutcome::Clear;
    }

    let count = batch.len();
    match store.create_notifications(batch) {
        Ok(saved) => {
            info!("{} alert(s) raised for reading {}", count, reading.id);
            AlertOutcome::Raised(saved)
        }
        Err(e) => {
            warn!("reading {} saved but alerting failed: {}", reading.id, e);
            AlertOutcome::Failed(e)
        }
    }
}

fn alert(
    reading: &VitalReading,
    metric: Metric,
    value: f64,
    bounds: &MetricBounds,
    severity: Severity,
    direction: Direction,
    now: NaiveDateTime,
) -> Notification {
    let critical = severity == Severity::Critical;
    let threshold = match (critical, direction) {
        (true, Direction::Low) => bounds.critical_min,
        (true, Direction::High) => bounds.critical_max,
        (false, Direction::Low) => bounds.warning_min,
        (false, Direction::High) => bounds.warning_max,
    };

    let title = format!(
        "{}: {} is {}",
        if critical { "CRITICAL" } else { "Warning" },
        bounds.label,
        direction.as_str()
    );

    let mut message = format!("Your {} reading of {} {} is ", bounds.label, value, bounds.unit);
    message.push_str(match direction {
        Direction::Low => "below",
        Direction::High => "above",
    });
    message.push_str(if critical { " the critical threshold" } else { " the normal threshold" });
    // A verdict always has its bound defined.
    if let Some(t) = threshold {
        message.push_str(&format!(" of {} {}", t, bounds.unit));
    }
    message.push_str(". ");
    message.push_str(if critical { CRITICAL_ACTION } else { WARNING_ACTION });

    Notification {
        id: Uuid::new_v4(),
        owner: reading.owner.clone(),
        title,
        message,
        kind: NotificationKind::VitalAlert,
        severity,
        related_vital_id: Some(reading.id),
        metadata: AlertMetadata {
            metric,
            value,
            unit: bounds.unit.clone(),
            direction,
            normal_range: bounds.normal_range(),
        },
        is_read: false,
        created_at: now,
    }
}
