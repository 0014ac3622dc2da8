//! Fuzz target: vitals submission through the service
//!
//! Builds a reading from arbitrary bit patterns (including NaN and the
//! infinities) and submits it against the in-memory store, verifying:
//! - No panics anywhere on the submission path
//! - Non-finite values never reach the stored reading
//! - Every alert belongs to the stored reading and is unread
//! - No alert is raised for a metric the classifier has no bounds for
//!
//! cargo fuzz run fuzz_vitals_submission

#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use vitaltrack::adapters::memory::MemoryStore;
use vitaltrack::adapters::time::FixedClock;
use vitaltrack::app::commands::SubmitVitals;
use vitaltrack::app::events::AppEvent;
use vitaltrack::app::ports::EventSink;
use vitaltrack::app::service::AppService;
use vitaltrack::config::ThresholdConfig;
use vitaltrack::metric::{Metric, MetricValues};
use vitaltrack::model::OwnerId;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _e: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut values = MetricValues::new();
    for (metric, chunk) in Metric::ALL.iter().zip(data.chunks_exact(8)) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        values.set(*metric, f64::from_le_bytes(raw));
    }

    let config = ThresholdConfig::default();
    let app = AppService::new(config.clone()).unwrap();
    let clock = FixedClock(
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap(),
    );
    let mut store = MemoryStore::new();
    let cmd = SubmitVitals {
        values,
        note: String::new(),
        recorded_at: None,
    };

    let out = app
        .submit_vitals(&OwnerId::new("fuzz"), cmd, &clock, &mut store, &mut NullSink)
        .unwrap();

    assert!(out.reading.values.iter().all(|(_, v)| v.is_finite()));
    for alert in out.alerts.notifications() {
        assert_eq!(alert.related_vital_id, Some(out.reading.id));
        assert!(!alert.is_read);
        assert!(config.bounds(alert.metadata.metric).is_some());
    }
});
