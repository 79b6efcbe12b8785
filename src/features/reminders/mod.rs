//! # Reminders Feature
//!
//! Periodic due checks and the command loop that owns reminder state.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod scheduler;

pub use scheduler::{
    ReminderCommand, ReminderEvent, ReminderHandle, ReminderScheduler, ReminderSnapshot,
    DEFAULT_CHECK_INTERVAL,
};
