//! Medication records and their value types.

use crate::core::{ReminderError, ReminderResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How often a medication is meant to be taken.
///
/// Stored and displayed only; every frequency is checked once per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    Daily,
    TwiceDaily,
    Weekly,
    AsNeeded,
}

impl Frequency {
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Daily,
            Frequency::TwiceDaily,
            Frequency::Weekly,
            Frequency::AsNeeded,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::TwiceDaily => "Twice daily",
            Frequency::Weekly => "Weekly",
            Frequency::AsNeeded => "As needed",
        }
    }

    /// Next value in form order, wrapping around
    pub fn next(&self) -> Frequency {
        match self {
            Frequency::Daily => Frequency::TwiceDaily,
            Frequency::TwiceDaily => Frequency::Weekly,
            Frequency::Weekly => Frequency::AsNeeded,
            Frequency::AsNeeded => Frequency::Daily,
        }
    }

    /// Previous value in form order, wrapping around
    pub fn previous(&self) -> Frequency {
        match self {
            Frequency::Daily => Frequency::AsNeeded,
            Frequency::TwiceDaily => Frequency::Daily,
            Frequency::Weekly => Frequency::TwiceDaily,
            Frequency::AsNeeded => Frequency::Weekly,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Time of day a dose is scheduled for, serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> ReminderResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(ReminderError::validation(format!(
                "Invalid time {hour:02}:{minute:02}"
            )));
        }
        Ok(TimeOfDay { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        TimeOfDay { hour: 8, minute: 0 }
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        TimeOfDay {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ReminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReminderError::validation(format!("Time must be HH:MM (got '{}')", s.trim()));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour = h.parse::<u8>().map_err(|_| invalid())?;
        let minute = m.parse::<u8>().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ReminderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Minutes elapsed since local midnight for `now`
pub fn minutes_since_midnight(now: NaiveDateTime) -> u32 {
    now.hour() * 60 + now.minute()
}

/// One scheduled medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: Frequency,
    pub time: TimeOfDay,
    /// Last date the user confirmed the dose
    pub last_taken: Option<NaiveDate>,
    /// Today's dose time passed without confirmation
    pub missed: bool,
}

/// Display status of a medication on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicationStatus {
    TakenToday,
    Missed,
    Scheduled,
}

impl MedicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MedicationStatus::TakenToday => "Taken today",
            MedicationStatus::Missed => "Missed",
            MedicationStatus::Scheduled => "Scheduled",
        }
    }
}

impl Medication {
    pub fn taken_on(&self, date: NaiveDate) -> bool {
        self.last_taken == Some(date)
    }

    pub fn status(&self, today: NaiveDate) -> MedicationStatus {
        if self.taken_on(today) {
            MedicationStatus::TakenToday
        } else if self.missed {
            MedicationStatus::Missed
        } else {
            MedicationStatus::Scheduled
        }
    }

    /// "Daily at 08:00"
    pub fn schedule_label(&self) -> String {
        format!("{} at {}", self.frequency.label(), self.time)
    }

    /// Banner and desktop text for this medication
    pub fn reminder_text(&self) -> String {
        format!("Time to take {} ({})", self.name, self.dosage)
    }
}

/// Fields collected by the creation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: Frequency,
    pub time: TimeOfDay,
}

impl NewMedication {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: Frequency,
        time: TimeOfDay,
    ) -> Self {
        NewMedication {
            name: name.into(),
            dosage: dosage.into(),
            frequency,
            time,
        }
    }

    /// Trim text fields and reject empty ones
    pub fn validate(self) -> ReminderResult<NewMedication> {
        let name = self.name.trim().to_string();
        let dosage = self.dosage.trim().to_string();
        if name.is_empty() {
            return Err(ReminderError::validation("Name is required"));
        }
        if dosage.is_empty() {
            return Err(ReminderError::validation("Dosage is required"));
        }
        Ok(NewMedication { name, dosage, ..self })
    }

    pub(crate) fn into_medication(self) -> Medication {
        Medication {
            id: Uuid::new_v4(),
            name: self.name,
            dosage: self.dosage,
            frequency: self.frequency,
            time: self.time,
            last_taken: None,
            missed: false,
        }
    }
}
