//! Reminder recurrence evaluator.
//!
//! Decides whether a reminder is due "today, not yet passed" for a given
//! wall-clock instant.  Rules run in order:
//!
//! 1. inactive reminders are never due;
//! 2. a reminder whose time is strictly earlier than now (to the minute)
//!    has already passed today;
//! 3. `daily` is due;
//! 4. `weekly` is due when today's weekday (0 = Sunday) is selected;
//! 5. `monthly` is due when today's day-of-month matches;
//! 6. `once` is due.
//!
//! A `once` reminder is never marked as fired, so it keeps showing up every
//! day until the user deactivates it.
//!
//! The evaluator is stateless and never mutates the reminder.

use chrono::{Datelike, NaiveDateTime};

use crate::reminder::{Recurrence, ReminderSchedule, TimeOfDay};

/// True if `reminder` is due at or after `now` today.
pub fn is_due(reminder: &ReminderSchedule, now: NaiveDateTime) -> bool {
    if !reminder.is_active {
        return false;
    }
    if reminder.time < TimeOfDay::of(now) {
        return false;
    }
    occurs_on(&reminder.recurrence, now)
}

/// Whether the recurrence pattern matches the calendar day of `now`.
pub fn occurs_on(recurrence: &Recurrence, now: NaiveDateTime) -> bool {
    match recurrence {
        Recurrence::Daily | Recurrence::Once => true,
        Recurrence::Weekly { days_of_week } => {
            days_of_week.contains(now.weekday().num_days_from_sunday() as u8)
        }
        Recurrence::Monthly { day_of_month } => u32::from(day_of_month.get()) == now.day(),
    }
}

/// Reminders from `reminders` due today, ordered by time then name.
pub fn upcoming<'a, I>(reminders: I, now: NaiveDateTime) -> Vec<ReminderSchedule>
where
    I: IntoIterator<Item = &'a ReminderSchedule>,
{
    let mut due: Vec<ReminderSchedule> = reminders
        .into_iter()
        .filter(|r| is_due(r, now))
        .cloned()
        .collect();
    due.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.name.cmp(&b.name)));
    due
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
