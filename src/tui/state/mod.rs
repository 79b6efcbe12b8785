//! # TUI State Management
//!
//! Form buffers for screens that collect input.

mod form;

pub use form::{FormField, MedicationForm};
