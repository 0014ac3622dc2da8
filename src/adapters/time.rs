//! Clock adapters.
//!
//! - [`SystemClock`] reads the server's local wall clock via `chrono`.
//! - [`FixedClock`] always returns the instant it was built with, for
//!   simulation and tests.

use chrono::{Local, NaiveDateTime};

use crate::app::ports::Clock;

/// Server wall clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
