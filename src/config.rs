//! Threshold configuration
//!
//! Two independently tuned tables live here side by side:
//!
//! - [`ThresholdConfig::classifier`] feeds the per-metric
//!   [`classify`](crate::classifier::classify) verdicts that raise alerts.
//! - [`ThresholdConfig::abnormal`] feeds the single
//!   [`is_abnormal`](crate::abnormal::is_abnormal) flag stored on a reading.
//!
//! The tables cover different metrics and use different cut-offs (blood
//! sugar alerts at 140 mg/dL but is only flagged abnormal above 180;
//! temperature and oxygen saturation are flagged but never alerted).
//! Whether that divergence is deliberate is unresolved, so both tables are
//! kept verbatim rather than merged.
//!
//! Defaults can be overridden from JSON via [`ThresholdConfig::from_json`].

use std::collections::BTreeMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::metric::Metric;

/// Warning/critical bounds for one classified metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_max: Option<f64>,
    /// Label used in alert titles and messages.
    pub label: String,
    pub unit: String,
}

impl MetricBounds {
    /// Bounds with every limit defined, labelled from the metric defaults.
    pub fn full(metric: Metric, critical_min: f64, warning_min: f64, warning_max: f64, critical_max: f64) -> Self {
        Self {
            warning_min: Some(warning_min),
            warning_max: Some(warning_max),
            critical_min: Some(critical_min),
            critical_max: Some(critical_max),
            label: metric.label().to_owned(),
            unit: metric.unit().to_owned(),
        }
    }

    /// Bounds with no limits; refine with struct update syntax.
    pub fn unbounded(metric: Metric) -> Self {
        Self {
            warning_min: None,
            warning_max: None,
            critical_min: None,
            critical_max: None,
            label: metric.label().to_owned(),
            unit: metric.unit().to_owned(),
        }
    }

    /// Human-readable normal range built from the warning bounds.
    pub fn normal_range(&self) -> String {
        match (self.warning_min, self.warning_max) {
            (Some(lo), Some(hi)) => format!("{lo}-{hi} {}", self.unit),
            (Some(lo), None) => format!(">= {lo} {}", self.unit),
            (None, Some(hi)) => format!("<= {hi} {}", self.unit),
            (None, None) => "not configured".to_owned(),
        }
    }

    /// Check `criticalMin <= warningMin <= warningMax <= criticalMax` for
    /// every pair of defined bounds.
    pub fn validate(&self, metric: Metric) -> Result<(), ValidationError> {
        let chain = [self.critical_min, self.warning_min, self.warning_max, self.critical_max];
        if chain.iter().flatten().any(|b| !b.is_finite()) {
            return Err(ValidationError::NonFiniteBound(metric));
        }
        let defined: Vec<f64> = chain.into_iter().flatten().collect();
        if defined.windows(2).any(|w| w[0] > w[1]) {
            return Err(ValidationError::UnorderedBounds(metric));
        }
        Ok(())
    }
}

/// Single low/high cut-offs for the abnormal flag.  Breach is strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl FlagBounds {
    pub const fn new(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    /// True if `value` lies strictly outside `[low, high]`.
    pub fn breached_by(&self, value: f64) -> bool {
        self.low.is_some_and(|lo| value < lo) || self.high.is_some_and(|hi| value > hi)
    }

    fn validate(&self, metric: Metric) -> Result<(), ValidationError> {
        if [self.low, self.high].iter().flatten().any(|b| !b.is_finite()) {
            return Err(ValidationError::NonFiniteBound(metric));
        }
        match (self.low, self.high) {
            (Some(lo), Some(hi)) if lo > hi => Err(ValidationError::UnorderedBounds(metric)),
            _ => Ok(()),
        }
    }
}

/// Both threshold tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Alerting bounds, consumed by the classifier.
    pub classifier: BTreeMap<Metric, MetricBounds>,
    /// Abnormal-flag bounds, consumed at reading creation.
    pub abnormal: BTreeMap<Metric, FlagBounds>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        let classifier = BTreeMap::from([
            (Metric::BloodPressureSystolic, MetricBounds::full(Metric::BloodPressureSystolic, 70.0, 90.0, 140.0, 180.0)),
            (Metric::BloodPressureDiastolic, MetricBounds::full(Metric::BloodPressureDiastolic, 40.0, 60.0, 90.0, 120.0)),
            (Metric::HeartRate, MetricBounds::full(Metric::HeartRate, 40.0, 60.0, 100.0, 150.0)),
            (Metric::BloodSugar, MetricBounds::full(Metric::BloodSugar, 54.0, 70.0, 140.0, 250.0)),
            (Metric::Weight, MetricBounds::full(Metric::Weight, 20.0, 30.0, 200.0, 300.0)),
        ]);

        let abnormal = BTreeMap::from([
            (Metric::BloodPressureSystolic, FlagBounds::new(90.0, 140.0)),
            (Metric::BloodPressureDiastolic, FlagBounds::new(60.0, 90.0)),
            (Metric::HeartRate, FlagBounds::new(60.0, 100.0)),
            (Metric::Temperature, FlagBounds::new(36.0, 37.5)),
            (Metric::BloodSugar, FlagBounds::new(70.0, 180.0)),
            (Metric::OxygenSaturation, FlagBounds { low: Some(95.0), high: None }),
        ]);

        Self { classifier, abnormal }
    }
}

impl ThresholdConfig {
    /// Bounds for a classified metric, if it has any.
    pub fn bounds(&self, metric: Metric) -> Option<&MetricBounds> {
        self.classifier.get(&metric)
    }

    /// Validate both tables.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (metric, bounds) in &self.classifier {
            bounds.validate(*metric)?;
        }
        for (metric, bounds) in &self.abnormal {
            bounds.validate(*metric)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON override.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("threshold config is not valid JSON")?;
        config.validate().context("threshold config rejected")?;
        Ok(config)
    }
}
