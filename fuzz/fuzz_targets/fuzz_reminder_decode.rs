//! Fuzz target: reminder JSON decoding + due evaluation
//!
//! Feeds arbitrary bytes to the `ReminderSchedule` decoder and, for every
//! record that decodes, verifies:
//! - No panics in `validate` or `is_due`
//! - Decoded field types are always in range (time, weekdays, day of month)
//! - Re-encoding and decoding yields the same record
//!
//! cargo fuzz run fuzz_reminder_decode

#![no_main]

use chrono::{Duration, NaiveDate};
use libfuzzer_sys::fuzz_target;
use vitaltrack::recurrence::is_due;
use vitaltrack::reminder::{Recurrence, ReminderSchedule};

fuzz_target!(|data: &[u8]| {
    let Some((&minute_seed, json)) = data.split_first() else {
        return;
    };
    let Ok(reminder) = serde_json::from_slice::<ReminderSchedule>(json) else {
        return;
    };

    assert!(reminder.time.hour() < 24 && reminder.time.minute() < 60);
    match reminder.recurrence {
        Recurrence::Weekly { days_of_week } => assert!(days_of_week.days().iter().all(|&d| d <= 6)),
        Recurrence::Monthly { day_of_month } => assert!((1..=31).contains(&day_of_month.get())),
        Recurrence::Daily | Recurrence::Once => {}
    }
    let _ = reminder.validate();

    let base = NaiveDate::from_ymd_opt(2026, 2, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    let now = base + Duration::minutes(i64::from(minute_seed) * 97);
    let due = is_due(&reminder, now);
    if !reminder.is_active {
        assert!(!due);
    }

    let encoded = serde_json::to_vec(&reminder).unwrap();
    let decoded: ReminderSchedule = serde_json::from_slice(&encoded).unwrap();
    assert_eq!(decoded, reminder);
});
