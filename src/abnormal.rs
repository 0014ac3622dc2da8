//! Whole-reading abnormal flag.
//!
//! Unlike the per-metric classifier this reduces a reading to one boolean
//! against the separate [`ThresholdConfig::abnormal`] table.  It is
//! evaluated once, when a reading is created, and stored on the record.

use crate::config::ThresholdConfig;
use crate::metric::MetricValues;

/// True if any present metric breaches its abnormal-flag bound.
pub fn is_abnormal(values: &MetricValues, config: &ThresholdConfig) -> bool {
    values.iter().any(|(metric, value)| {
        config
            .abnormal
            .get(&metric)
            .is_some_and(|bounds| value.is_finite() && bounds.breached_by(value))
    })
}
