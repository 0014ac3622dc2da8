//! Notification read state, counts, and deletion.

use chrono::NaiveDate;
use uuid::Uuid;
use vitaltrack::Error;
use vitaltrack::adapters::time::FixedClock;
use vitaltrack::app::commands::SubmitVitals;
use vitaltrack::app::service::AppService;
use vitaltrack::config::ThresholdConfig;
use vitaltrack::metric::{Metric, MetricValues};
use vitaltrack::model::OwnerId;

use crate::mock_store::{MockStore, RecordingSink};

/// Submit a reading that raises three alerts for `owner`.
fn raise_three(app: &AppService, owner: &OwnerId, store: &mut MockStore) {
    let clock = FixedClock(
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    );
    let cmd = SubmitVitals {
        values: MetricValues::new()
            .with(Metric::BloodPressureSystolic, 190.0)
            .with(Metric::HeartRate, 45.0)
            .with(Metric::Weight, 15.0),
        note: String::new(),
        recorded_at: None,
    };
    let out = app
        .submit_vitals(owner, cmd, &clock, store, &mut RecordingSink::new())
        .unwrap();
    assert_eq!(out.alerts.notifications().len(), 3);
}

fn setup() -> (AppService, MockStore, OwnerId) {
    (
        AppService::new(ThresholdConfig::default()).unwrap(),
        MockStore::new(),
        OwnerId::new("alice"),
    )
}

#[test]
fn mark_read_lowers_unread_count() {
    let (app, mut store, owner) = setup();
    raise_three(&app, &owner, &mut store);
    assert_eq!(app.unread_count(&owner, &store).unwrap(), 3);

    let first = app.list_notifications(&owner, true, &store).unwrap()[0].id;
    app.mark_read(&owner, first, &mut store).unwrap();

    assert_eq!(app.unread_count(&owner, &store).unwrap(), 2);
    assert_eq!(app.list_notifications(&owner, false, &store).unwrap().len(), 3);
}

#[test]
fn mark_all_read_counts_only_changed() {
    let (app, mut store, owner) = setup();
    raise_three(&app, &owner, &mut store);
    let first = app.list_notifications(&owner, false, &store).unwrap()[0].id;
    app.mark_read(&owner, first, &mut store).unwrap();

    assert_eq!(app.mark_all_read(&owner, &mut store).unwrap(), 2);
    assert_eq!(app.unread_count(&owner, &store).unwrap(), 0);
    assert_eq!(app.mark_all_read(&owner, &mut store).unwrap(), 0);
}

#[test]
fn notifications_are_owner_scoped() {
    let (app, mut store, owner) = setup();
    let bob = OwnerId::new("bob");
    raise_three(&app, &owner, &mut store);
    raise_three(&app, &bob, &mut store);

    let alice_first = app.list_notifications(&owner, false, &store).unwrap()[0].id;
    assert_eq!(
        app.mark_read(&bob, alice_first, &mut store),
        Err(Error::NotFound("notification"))
    );
    assert_eq!(
        app.delete_notification(&bob, alice_first, &mut store),
        Err(Error::NotFound("notification"))
    );

    assert_eq!(app.clear_notifications(&bob, &mut store).unwrap(), 3);
    assert_eq!(app.unread_count(&owner, &store).unwrap(), 3);
}

#[test]
fn delete_single_and_missing() {
    let (app, mut store, owner) = setup();
    raise_three(&app, &owner, &mut store);
    let id = app.list_notifications(&owner, false, &store).unwrap()[1].id;

    app.delete_notification(&owner, id, &mut store).unwrap();
    assert_eq!(app.list_notifications(&owner, false, &store).unwrap().len(), 2);
    assert_eq!(
        app.delete_notification(&owner, id, &mut store),
        Err(Error::NotFound("notification"))
    );
    assert_eq!(
        app.mark_read(&owner, Uuid::new_v4(), &mut store),
        Err(Error::NotFound("notification"))
    );
}

#[test]
fn alert_json_uses_wire_names() {
    let (app, mut store, owner) = setup();
    raise_three(&app, &owner, &mut store);
    let alerts = app.list_notifications(&owner, false, &store).unwrap();
    let value = serde_json::to_value(&alerts[0]).unwrap();

    assert_eq!(value["type"], "vital_alert");
    assert_eq!(value["severity"], "critical");
    assert_eq!(value["isRead"], false);
    assert_eq!(value["metadata"]["metric"], "bloodPressureSystolic");
    assert!(value["relatedVitalId"].is_string());
}
