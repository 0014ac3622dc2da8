//! Vital-sign metrics and sparse per-reading value maps.
//!
//! A [`MetricValues`] map only ever contains finite numbers.  Anything the
//! request decoder hands over as NaN or ±infinity is dropped on insert, so
//! downstream evaluators see such a metric as simply absent.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Every physiological metric a reading can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    BloodPressureSystolic,
    BloodPressureDiastolic,
    HeartRate,
    Temperature,
    BloodSugar,
    OxygenSaturation,
    Weight,
}

impl Metric {
    /// All metrics, in display order.
    pub const ALL: [Metric; 7] = [
        Metric::BloodPressureSystolic,
        Metric::BloodPressureDiastolic,
        Metric::HeartRate,
        Metric::Temperature,
        Metric::BloodSugar,
        Metric::OxygenSaturation,
        Metric::Weight,
    ];

    /// Wire name of the metric (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BloodPressureSystolic => "bloodPressureSystolic",
            Self::BloodPressureDiastolic => "bloodPressureDiastolic",
            Self::HeartRate => "heartRate",
            Self::Temperature => "temperature",
            Self::BloodSugar => "bloodSugar",
            Self::OxygenSaturation => "oxygenSaturation",
            Self::Weight => "weight",
        }
    }

    /// Human-readable label used in alert titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::BloodPressureSystolic => "Systolic Blood Pressure",
            Self::BloodPressureDiastolic => "Diastolic Blood Pressure",
            Self::HeartRate => "Heart Rate",
            Self::Temperature => "Body Temperature",
            Self::BloodSugar => "Blood Sugar",
            Self::OxygenSaturation => "Oxygen Saturation",
            Self::Weight => "Weight",
        }
    }

    /// Default unit of measurement.
    pub fn unit(self) -> &'static str {
        match self {
            Self::BloodPressureSystolic | Self::BloodPressureDiastolic => "mmHg",
            Self::HeartRate => "bpm",
            Self::Temperature => "\u{00b0}C",
            Self::BloodSugar => "mg/dL",
            Self::OxygenSaturation => "%",
            Self::Weight => "kg",
        }
    }
}

impl core::fmt::Display for Metric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse metric → value map for one reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricValues(BTreeMap<Metric, f64>);

impl MetricValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value.  Non-finite values are treated as absent: they are
    /// not stored and any previous value for the metric is removed.
    pub fn set(&mut self, metric: Metric, value: f64) {
        if value.is_finite() {
            self.0.insert(metric, value);
        } else {
            debug!("dropping non-finite {metric} value {value}");
            self.0.remove(&metric);
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(&metric).copied()
    }

    /// Iterate present `(metric, value)` pairs in metric order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Metric, f64)> for MetricValues {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (metric, value) in iter {
            values.set(metric, value);
        }
        values
    }
}

impl<'de> Deserialize<'de> for MetricValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // JSON `null` for a metric means "not measured".
        let raw = BTreeMap::<Metric, Option<f64>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(metric, value)| value.map(|v| (metric, v)))
            .collect())
    }
}
