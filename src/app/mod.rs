//! Application core: request orchestration, zero I/O.
//!
//! This module wires the evaluators (abnormal flag, threshold classifier,
//! alert emitter, recurrence) to the outside world.  All persistence and
//! clock access happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without a database.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
