//! # Medication Form State
//!
//! Field buffers for the add-medication screen.

use crate::core::ReminderResult;
use crate::features::medications::{Frequency, NewMedication, TimeOfDay};

/// Form fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Dosage,
    Frequency,
    Time,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Name,
            FormField::Dosage,
            FormField::Frequency,
            FormField::Time,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Dosage => "Dosage",
            FormField::Frequency => "Frequency",
            FormField::Time => "Time (HH:MM)",
        }
    }

    fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Dosage,
            FormField::Dosage => FormField::Frequency,
            FormField::Frequency => FormField::Time,
            FormField::Time => FormField::Name,
        }
    }

    fn previous(&self) -> FormField {
        match self {
            FormField::Name => FormField::Time,
            FormField::Dosage => FormField::Name,
            FormField::Frequency => FormField::Dosage,
            FormField::Time => FormField::Frequency,
        }
    }
}

/// Add-medication form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationForm {
    pub name: String,
    pub dosage: String,
    pub frequency: Frequency,
    pub time: String,
    pub field: FormField,
}

impl Default for MedicationForm {
    fn default() -> Self {
        MedicationForm {
            name: String::new(),
            dosage: String::new(),
            frequency: Frequency::default(),
            time: TimeOfDay::default().to_string(),
            field: FormField::default(),
        }
    }
}

impl MedicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    /// Type a character into the focused field. Space cycles frequency.
    pub fn input_char(&mut self, c: char) {
        match self.field {
            FormField::Name => self.name.push(c),
            FormField::Dosage => self.dosage.push(c),
            FormField::Frequency => {
                if c == ' ' {
                    self.frequency = self.frequency.next();
                }
            }
            FormField::Time => {
                if (c.is_ascii_digit() || c == ':') && self.time.len() < 5 {
                    self.time.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Dosage => {
                self.dosage.pop();
            }
            FormField::Frequency => {}
            FormField::Time => {
                self.time.pop();
            }
        }
    }

    pub fn cycle_frequency(&mut self, forward: bool) {
        if self.field == FormField::Frequency {
            self.frequency = if forward {
                self.frequency.next()
            } else {
                self.frequency.previous()
            };
        }
    }

    /// Text shown for a field
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Dosage => self.dosage.clone(),
            FormField::Frequency => format!("< {} >", self.frequency.label()),
            FormField::Time => self.time.clone(),
        }
    }

    /// Build the request; the store performs the remaining validation
    pub fn to_new_medication(&self) -> ReminderResult<NewMedication> {
        let time: TimeOfDay = self.time.parse()?;
        Ok(NewMedication::new(
            self.name.clone(),
            self.dosage.clone(),
            self.frequency,
            time,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut MedicationForm, s: &str) {
        for c in s.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        let form = MedicationForm::new();
        assert_eq!(form.frequency, Frequency::Daily);
        assert_eq!(form.time, "08:00");
        assert_eq!(form.field, FormField::Name);
    }

    #[test]
    fn test_typing_fills_focused_fields() {
        let mut form = MedicationForm::new();
        type_str(&mut form, "Aspirin");
        form.next_field();
        type_str(&mut form, "100mg");
        form.next_field();
        form.cycle_frequency(true);
        form.next_field();
        for _ in 0..5 {
            form.backspace();
        }
        type_str(&mut form, "21:45x");

        let new = form.to_new_medication().unwrap();
        assert_eq!(new.name, "Aspirin");
        assert_eq!(new.dosage, "100mg");
        assert_eq!(new.frequency, Frequency::TwiceDaily);
        assert_eq!(new.time.to_string(), "21:45");
    }

    #[test]
    fn test_bad_time_is_a_validation_error() {
        let mut form = MedicationForm::new();
        form.field = FormField::Time;
        form.backspace();
        form.backspace();
        let err = form.to_new_medication().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = MedicationForm::new();
        form.previous_field();
        assert_eq!(form.field, FormField::Time);
        form.next_field();
        assert_eq!(form.field, FormField::Name);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = MedicationForm::new();
        type_str(&mut form, "Aspirin");
        form.next_field();
        form.reset();
        assert_eq!(form, MedicationForm::new());
    }
}
