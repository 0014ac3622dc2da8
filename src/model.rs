//! Persisted records: vital readings and alert notifications.
//!
//! Field names serialise in camelCase to match the document store the
//! records are written to.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::Direction;
use crate::metric::{Metric, MetricValues};

/// Authenticated owner of a record, supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl core::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Vital readings
// ───────────────────────────────────────────────────────────────

/// One timestamped submission of metric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalReading {
    pub id: Uuid,
    pub owner: OwnerId,
    pub values: MetricValues,
    #[serde(default)]
    pub note: String,
    pub recorded_at: NaiveDateTime,
    /// Computed once at creation; never recomputed.
    pub is_abnormal: bool,
}

// ───────────────────────────────────────────────────────────────
// Notifications
// ───────────────────────────────────────────────────────────────

/// Ordered severity tier: `Info < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Notification category.  Only vital alerts are produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    VitalAlert,
}

/// Context attached to a vital alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMetadata {
    pub metric: Metric,
    pub value: f64,
    pub unit: String,
    pub direction: Direction,
    pub normal_range: String,
}

/// A persisted alert for one abnormal metric of one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub owner: OwnerId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_vital_id: Option<Uuid>,
    pub metadata: AlertMetadata,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}
