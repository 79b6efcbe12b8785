// Core layer - configuration, errors and the clock
pub mod core;

// Features layer - medications, notifications and the reminder scheduler
pub mod features;

// TUI layer - terminal user interface (optional feature)
#[cfg(feature = "tui")]
pub mod tui;

pub use core::{Config, ReminderError, ReminderResult};
pub use features::{
    Frequency, Medication, NewMedication, Notification, Permission, ReminderHandle,
    ReminderScheduler, ReminderStore, TimeOfDay,
};
