//! Vitals submission: abnormal flag, alert batch, and failure isolation.

use chrono::{NaiveDate, NaiveDateTime};
use vitaltrack::Error;
use vitaltrack::adapters::time::FixedClock;
use vitaltrack::alerts::AlertOutcome;
use vitaltrack::app::commands::SubmitVitals;
use vitaltrack::app::events::AppEvent;
use vitaltrack::app::ports::{StoreError, VitalStore};
use vitaltrack::app::service::AppService;
use vitaltrack::config::ThresholdConfig;
use vitaltrack::metric::{Metric, MetricValues};
use vitaltrack::model::{OwnerId, Severity};

use crate::mock_store::{MockStore, RecordingSink, StoreCall};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 14)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn setup() -> (AppService, MockStore, RecordingSink, FixedClock, OwnerId) {
    let app = AppService::new(ThresholdConfig::default()).unwrap();
    (app, MockStore::new(), RecordingSink::new(), FixedClock(now()), OwnerId::new("alice"))
}

fn submit(values: MetricValues) -> SubmitVitals {
    SubmitVitals {
        values,
        note: "after breakfast".into(),
        recorded_at: None,
    }
}

#[test]
fn normal_reading_is_saved_without_alert_call() {
    let (app, mut store, mut sink, clock, owner) = setup();
    let values = MetricValues::new()
        .with(Metric::HeartRate, 72.0)
        .with(Metric::Weight, 70.0);

    let out = app.submit_vitals(&owner, submit(values), &clock, &mut store, &mut sink).unwrap();

    assert!(!out.reading.is_abnormal);
    assert_eq!(out.reading.recorded_at, now());
    assert_eq!(out.alerts, AlertOutcome::Clear);
    assert_eq!(store.calls, vec![StoreCall::CreateReading]);
    assert_eq!(sink.events.len(), 1);
}

#[test]
fn abnormal_reading_raises_one_batch() {
    let (app, mut store, mut sink, clock, owner) = setup();
    let values = MetricValues::new()
        .with(Metric::BloodPressureSystolic, 185.0)
        .with(Metric::HeartRate, 45.0)
        .with(Metric::Weight, 70.0);

    let out = app.submit_vitals(&owner, submit(values), &clock, &mut store, &mut sink).unwrap();

    assert!(out.reading.is_abnormal);
    assert_eq!(store.batch_calls(), vec![2]);
    let alerts = out.alerts.notifications();
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|n| n.related_vital_id == Some(out.reading.id)));
    assert!(alerts.iter().all(|n| n.owner == owner));
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::AlertsRaised { count: 2, highest: Severity::Critical, .. }
    )));
}

#[test]
fn flag_and_alerts_can_disagree() {
    let (app, mut store, mut sink, clock, owner) = setup();

    // Temperature is flagged but never alerted.
    let fever = MetricValues::new().with(Metric::Temperature, 39.0);
    let out = app.submit_vitals(&owner, submit(fever), &clock, &mut store, &mut sink).unwrap();
    assert!(out.reading.is_abnormal);
    assert_eq!(out.alerts, AlertOutcome::Clear);

    // Blood sugar 160 alerts but is not flagged.
    let sugar = MetricValues::new().with(Metric::BloodSugar, 160.0);
    let out = app.submit_vitals(&owner, submit(sugar), &clock, &mut store, &mut sink).unwrap();
    assert!(!out.reading.is_abnormal);
    assert_eq!(out.alerts.notifications().len(), 1);
    assert_eq!(out.alerts.notifications()[0].severity, Severity::Warning);
}

#[test]
fn non_finite_values_are_absent_everywhere() {
    let (app, mut store, mut sink, clock, owner) = setup();
    let values = MetricValues::new()
        .with(Metric::HeartRate, f64::NAN)
        .with(Metric::BloodPressureSystolic, f64::INFINITY);

    let out = app.submit_vitals(&owner, submit(values), &clock, &mut store, &mut sink).unwrap();

    assert!(out.reading.values.is_empty());
    assert!(!out.reading.is_abnormal);
    assert_eq!(out.alerts, AlertOutcome::Clear);
    assert!(store.batch_calls().is_empty());
}

#[test]
fn alert_failure_keeps_the_reading() {
    let (app, mut store, mut sink, clock, owner) = setup();
    store.fail_notifications = true;
    let values = MetricValues::new().with(Metric::HeartRate, 160.0);

    let out = app.submit_vitals(&owner, submit(values), &clock, &mut store, &mut sink).unwrap();

    assert_eq!(out.alerts, AlertOutcome::Failed(StoreError::Unavailable));
    assert!(out.alerts.is_failed());
    assert_eq!(app.list_readings(&owner, false, &store).unwrap(), vec![out.reading.clone()]);
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::AlertingFailed { .. })));
}

#[test]
fn reading_failure_is_an_error_and_skips_alerts() {
    let (app, mut store, mut sink, clock, owner) = setup();
    store.fail_readings = true;
    let values = MetricValues::new().with(Metric::HeartRate, 160.0);

    let err = app
        .submit_vitals(&owner, submit(values), &clock, &mut store, &mut sink)
        .unwrap_err();

    assert_eq!(err, Error::Store(StoreError::Unavailable));
    assert!(store.batch_calls().is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn explicit_timestamp_is_kept() {
    let (app, mut store, mut sink, clock, owner) = setup();
    let taken = NaiveDate::from_ymd_opt(2026, 10, 13)
        .unwrap()
        .and_hms_opt(22, 0, 0)
        .unwrap();
    let cmd = SubmitVitals {
        values: MetricValues::new().with(Metric::Weight, 71.2),
        note: String::new(),
        recorded_at: Some(taken),
    };
    let out = app.submit_vitals(&owner, cmd, &clock, &mut store, &mut sink).unwrap();
    assert_eq!(out.reading.recorded_at, taken);
}

#[test]
fn delete_reading_removes_related_alerts() {
    let (app, mut store, mut sink, clock, owner) = setup();
    let bad = MetricValues::new()
        .with(Metric::HeartRate, 160.0)
        .with(Metric::BloodSugar, 40.0);
    let first = app.submit_vitals(&owner, submit(bad.clone()), &clock, &mut store, &mut sink).unwrap();
    let second = app.submit_vitals(&owner, submit(bad), &clock, &mut store, &mut sink).unwrap();

    let removed = app.delete_reading(&owner, first.reading.id, &mut store).unwrap();

    assert_eq!(removed, 2);
    let left = app.list_notifications(&owner, false, &store).unwrap();
    assert_eq!(left.len(), 2);
    assert!(left.iter().all(|n| n.related_vital_id == Some(second.reading.id)));
    assert_eq!(
        app.delete_reading(&owner, first.reading.id, &mut store),
        Err(Error::NotFound("reading"))
    );
}

#[test]
fn failed_alert_cleanup_leaves_reading_for_retry() {
    let (app, mut store, mut sink, clock, owner) = setup();
    let bad = MetricValues::new().with(Metric::HeartRate, 160.0);
    let out = app.submit_vitals(&owner, submit(bad), &clock, &mut store, &mut sink).unwrap();

    store.fail_notification_deletes = true;
    assert_eq!(
        app.delete_reading(&owner, out.reading.id, &mut store),
        Err(Error::Store(StoreError::Unavailable))
    );
    assert_eq!(app.list_readings(&owner, false, &store).unwrap().len(), 1);

    store.fail_notification_deletes = false;
    assert_eq!(app.delete_reading(&owner, out.reading.id, &mut store), Ok(1));
    assert!(app.list_readings(&owner, false, &store).unwrap().is_empty());
    assert!(app.list_notifications(&owner, false, &store).unwrap().is_empty());
    assert_eq!(store.inner.notification_count(), 0);
}

#[test]
fn readings_listed_newest_first_and_filtered() {
    let (app, mut store, mut sink, clock, owner) = setup();
    for (hour, hr) in [(7, 72.0), (8, 130.0), (9, 75.0)] {
        let cmd = SubmitVitals {
            values: MetricValues::new().with(Metric::HeartRate, hr),
            note: String::new(),
            recorded_at: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap().and_hms_opt(hour, 0, 0),
        };
        app.submit_vitals(&owner, cmd, &clock, &mut store, &mut sink).unwrap();
    }

    let all = app.list_readings(&owner, false, &store).unwrap();
    let hours: Vec<f64> = all.iter().filter_map(|r| r.values.get(Metric::HeartRate)).collect();
    assert_eq!(hours, vec![75.0, 130.0, 72.0]);

    let abnormal = app.list_readings(&owner, true, &store).unwrap();
    assert_eq!(abnormal.len(), 1);
    assert!(store.find_readings(&vitaltrack::app::ports::VitalFilter {
        owner: OwnerId::new("bob"),
        abnormal_only: false,
    })
    .unwrap()
    .is_empty());
}
