//! Threshold classifier.
//!
//! Maps one metric value onto a [`Verdict`] using that metric's
//! [`MetricBounds`].  Checks run in a fixed order and the first match wins:
//!
//! 1. below `criticalMin`  → `Critical(Low)`
//! 2. above `criticalMax`  → `Critical(High)`
//! 3. below `warningMin`   → `Warning(Low)`
//! 4. above `warningMax`   → `Warning(High)`
//! 5. otherwise            → `Normal`
//!
//! Every comparison is strict, so a value sitting exactly on a bound falls
//! into the milder tier.

use serde::{Deserialize, Serialize};

use crate::config::{MetricBounds, ThresholdConfig};
use crate::metric::Metric;
use crate::model::Severity;

/// Which side of the normal band a value fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Low,
    High,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Result of classifying one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Normal,
    Warning(Direction),
    Critical(Direction),
}

impl Verdict {
    /// Severity tier of the verdict (`Normal` maps to `Info`).
    pub fn severity(self) -> Severity {
        match self {
            Self::Normal => Severity::Info,
            Self::Warning(_) => Severity::Warning,
            Self::Critical(_) => Severity::Critical,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Normal => None,
            Self::Warning(d) | Self::Critical(d) => Some(d),
        }
    }

    pub fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Classify a finite value against `bounds`.
///
/// Returns `None` for NaN or infinite input: such a value is absent, not
/// abnormal.
pub fn classify(value: f64, bounds: &MetricBounds) -> Option<Verdict> {
    if !value.is_finite() {
        return None;
    }

    let below = |b: Option<f64>| b.is_some_and(|b| value < b);
    let above = |b: Option<f64>| b.is_some_and(|b| value > b);

    let verdict = if below(bounds.critical_min) {
        Verdict::Critical(Direction::Low)
    } else if above(bounds.critical_max) {
        Verdict::Critical(Direction::High)
    } else if below(bounds.warning_min) {
        Verdict::Warning(Direction::Low)
    } else if above(bounds.warning_max) {
        Verdict::Warning(Direction::High)
    } else {
        Verdict::Normal
    };
    Some(verdict)
}

/// Classify a possibly-missing value for `metric` using the configured
/// table.  `None` when the value is absent/non-finite or the metric has no
/// configured bounds.
pub fn classify_metric(config: &ThresholdConfig, metric: Metric, value: Option<f64>) -> Option<Verdict> {
    let bounds = config.bounds(metric)?;
    classify(value?, bounds)
}
