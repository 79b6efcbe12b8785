//! # Feature: Medications
//!
//! Medication records, the due checker and the persisted reminder store.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod checker;
pub mod model;
pub mod storage;
pub mod store;

pub use model::{Frequency, Medication, MedicationStatus, NewMedication, TimeOfDay};
pub use storage::{JsonFileStorage, MemoryStorage, Storage, MEDICATIONS_KEY, SCHEMA_VERSION};
pub use store::ReminderStore;
