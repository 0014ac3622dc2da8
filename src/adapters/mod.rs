//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to              |
//! |------------|--------------------|--------------------------|
//! | `log_sink` | EventSink          | `log` facade             |
//! | `memory`   | VitalStore         | In-process vectors       |
//! |            | NotificationStore  |                          |
//! |            | ReminderStore      |                          |
//! | `time`     | Clock              | Local wall clock / fixed |

pub mod log_sink;
pub mod memory;
pub mod time;
