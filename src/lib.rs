//! VitalTrack core library.
//!
//! The decision layer of a personal health tracker:
//!
//! - [`abnormal`] flags a whole reading as abnormal when it is stored;
//! - [`classifier`] grades each metric against warning/critical bounds;
//! - [`alerts`] turns those grades into persisted notifications;
//! - [`recurrence`] decides which reminders are still due today.
//!
//! [`app::service::AppService`] drives them through the port traits in
//! [`app::ports`]; [`adapters`] holds in-process implementations.

#![deny(unused_must_use)]

pub mod abnormal;
pub mod adapters;
pub mod alerts;
pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod metric;
pub mod model;
pub mod recurrence;
pub mod reminder;

pub use error::{Error, Result};
