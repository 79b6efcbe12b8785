//! # Reminder Store
//!
//! Owns the ordered medication list and mirrors it to storage. Every
//! mutation rewrites the whole list under [`MEDICATIONS_KEY`].
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Unreadable saved state is moved aside before starting empty
//! - 1.1.0: Versioned saved document
//! - 1.0.0: Initial store with add/delete/take/check

use crate::core::{ReminderError, ReminderResult};
use crate::features::medications::checker;
use crate::features::medications::model::{Medication, NewMedication};
use crate::features::medications::storage::{
    decode_medications, encode_medications, Storage, MEDICATIONS_KEY,
};
use crate::features::notifications::Notification;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use uuid::Uuid;

pub struct ReminderStore {
    medications: Vec<Medication>,
    storage: Box<dyn Storage>,
    last_write_error: Option<ReminderError>,
}

impl ReminderStore {
    /// Load the saved list, falling back to an empty one.
    ///
    /// Unparsable content is quarantined and logged; it never fails the load.
    pub fn load(storage: impl Storage + 'static) -> Self {
        let mut storage: Box<dyn Storage> = Box::new(storage);
        let medications = match read_saved(storage.as_ref()) {
            Ok(medications) => {
                info!("Loaded {} medications", medications.len());
                medications
            }
            Err(e) => {
                warn!("{e}; starting with an empty medication list");
                if let Err(q) = storage.quarantine(MEDICATIONS_KEY) {
                    warn!("Could not move unreadable medications aside: {q:#}");
                }
                Vec::new()
            }
        };

        ReminderStore {
            medications,
            storage,
            last_write_error: None,
        }
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn get(&self, id: Uuid) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == id)
    }

    /// Most recent failed write, cleared by the next successful one
    pub fn last_write_error(&self) -> Option<&ReminderError> {
        self.last_write_error.as_ref()
    }

    /// Validate and append a new medication
    pub fn add_medication(&mut self, new: NewMedication) -> ReminderResult<Medication> {
        let medication = new.validate()?.into_medication();
        debug!("Adding medication {} ({})", medication.name, medication.id);
        self.medications.push(medication.clone());
        self.save();
        Ok(medication)
    }

    /// Remove a medication; returns whether one was removed
    pub fn delete_medication(&mut self, id: Uuid) -> bool {
        let before = self.medications.len();
        self.medications.retain(|m| m.id != id);
        let removed = self.medications.len() != before;
        if removed {
            debug!("Deleted medication {id}");
        }
        self.save();
        removed
    }

    /// Record the dose as taken on `today` and clear the missed flag
    pub fn take_medication(&mut self, id: Uuid, today: NaiveDate) -> Option<Medication> {
        let medication = self.medications.iter_mut().find(|m| m.id == id)?;
        medication.last_taken = Some(today);
        medication.missed = false;
        let taken = medication.clone();
        debug!("Marked {} taken on {today}", taken.name);
        self.save();
        Some(taken)
    }

    /// Flag newly due medications and return their notifications
    pub fn check_due(&mut self, now: NaiveDateTime) -> Vec<Notification> {
        let emitted = checker::check_due(&mut self.medications, now);
        if !emitted.is_empty() {
            debug!("{} medications became due at {now}", emitted.len());
            self.save();
        }
        emitted
    }

    /// Write the full list; failures are logged and remembered
    fn save(&mut self) {
        match self.persist() {
            Ok(()) => self.last_write_error = None,
            Err(e) => {
                warn!("{e}");
                self.last_write_error = Some(e);
            }
        }
    }

    fn persist(&mut self) -> ReminderResult<()> {
        let encoded = encode_medications(&self.medications).map_err(|e| write_error(&e))?;
        self.storage
            .write(MEDICATIONS_KEY, &encoded)
            .map_err(|e| write_error(&e))
    }
}

fn read_saved(storage: &dyn Storage) -> ReminderResult<Vec<Medication>> {
    let read_error = |e: anyhow::Error| ReminderError::PersistenceRead {
        key: MEDICATIONS_KEY.to_string(),
        reason: format!("{e:#}"),
    };
    match storage.read(MEDICATIONS_KEY).map_err(read_error)? {
        Some(data) => decode_medications(&data).map_err(read_error),
        None => Ok(Vec::new()),
    }
}

fn write_error(e: &anyhow::Error) -> ReminderError {
    ReminderError::PersistenceWrite {
        key: MEDICATIONS_KEY.to_string(),
        reason: format!("{e:#}"),
    }
}
