//! # Features Layer
//!
//! Medication tracking, reminder notifications and the scheduler that ties
//! them together.

pub mod medications;
pub mod notifications;
pub mod reminders;

pub use medications::{Frequency, Medication, NewMedication, ReminderStore, TimeOfDay};
pub use notifications::{Notification, NotificationDispatcher, Permission};
pub use reminders::{ReminderEvent, ReminderHandle, ReminderScheduler, ReminderSnapshot};

/// Metadata shown on the help screen
#[derive(Debug, Clone, Copy)]
pub struct FeatureInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

pub const FEATURES: &[FeatureInfo] = &[
    FeatureInfo {
        id: "medications",
        name: "Medications",
        version: "1.2.0",
        description: "Medication list saved on this device",
    },
    FeatureInfo {
        id: "notifications",
        name: "Notifications",
        version: "1.1.0",
        description: "Reminder banners and desktop notifications",
    },
    FeatureInfo {
        id: "reminders",
        name: "Reminders",
        version: "1.1.0",
        description: "Checks for due doses once a minute",
    },
];
