//! # Due Checker
//!
//! Pure evaluation of which medications became due at a given instant.
//!
//! A medication is due when its time of day has been reached, it has not
//! been confirmed today, and it is not already flagged as missed. The
//! missed flag is what keeps a medication from being announced twice.
//! Frequency does not take part in the decision.

use crate::features::medications::model::{minutes_since_midnight, Medication};
use crate::features::notifications::Notification;
use chrono::NaiveDateTime;

/// Whether `medication` becomes due at `now`
pub fn is_due(medication: &Medication, now: NaiveDateTime) -> bool {
    minutes_since_midnight(now) >= medication.time.minutes_since_midnight()
        && !medication.taken_on(now.date())
        && !medication.missed
}

/// Flag every newly due medication as missed and return one notification each
pub fn check_due(medications: &mut [Medication], now: NaiveDateTime) -> Vec<Notification> {
    let mut emitted = Vec::new();
    for medication in medications.iter_mut() {
        if is_due(medication, now) {
            medication.missed = true;
            emitted.push(Notification::for_medication(medication));
        }
    }
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::medications::model::{Frequency, NewMedication, TimeOfDay};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn med(name: &str, h: u8, m: u8) -> Medication {
        NewMedication::new(name, "100mg", Frequency::Daily, TimeOfDay::new(h, m).unwrap())
            .into_medication()
    }

    #[test]
    fn test_not_due_before_time() {
        let mut meds = vec![med("Aspirin", 8, 0)];
        assert!(check_due(&mut meds, at(7, 59)).is_empty());
        assert!(!meds[0].missed);
    }

    #[test]
    fn test_due_at_exact_minute() {
        let mut meds = vec![med("Aspirin", 8, 0)];
        let notes = check_due(&mut meds, at(8, 0));
        assert_eq!(notes.len(), 1);
        assert!(meds[0].missed);
    }

    #[test]
    fn test_emits_once_per_missed_cycle() {
        let mut meds = vec![med("Aspirin", 8, 0)];
        let first = check_due(&mut meds, at(8, 1));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, "Time to take Aspirin (100mg)");
        assert_eq!(first[0].medication_id, meds[0].id);

        assert!(check_due(&mut meds, at(8, 1)).is_empty());
        assert!(check_due(&mut meds, at(12, 0)).is_empty());
        assert!(meds[0].missed);
    }

    #[test]
    fn test_taken_today_is_never_due() {
        let mut meds = vec![med("Aspirin", 8, 0)];
        meds[0].last_taken = Some(day());
        assert!(check_due(&mut meds, at(9, 0)).is_empty());
        assert!(!meds[0].missed);
    }

    #[test]
    fn test_taken_yesterday_is_due_again_today() {
        let mut meds = vec![med("Aspirin", 8, 0)];
        meds[0].last_taken = day().pred_opt();
        assert_eq!(check_due(&mut meds, at(8, 30)).len(), 1);
    }

    #[test]
    fn test_frequency_does_not_change_scheduling() {
        let mut meds: Vec<Medication> = Frequency::all()
            .iter()
            .map(|f| {
                NewMedication::new("Pill", "1", *f, TimeOfDay::new(6, 0).unwrap()).into_medication()
            })
            .collect();
        assert_eq!(check_due(&mut meds, at(6, 0)).len(), 4);
    }

    #[test]
    fn test_only_due_medications_are_flagged_in_order() {
        let mut meds = vec![med("Morning", 8, 0), med("Evening", 20, 0), med("Noon", 12, 0)];
        let notes = check_due(&mut meds, at(12, 30));
        let texts: Vec<&str> = notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Time to take Morning (100mg)", "Time to take Noon (100mg)"]
        );
        assert!(meds[0].missed && !meds[1].missed && meds[2].missed);
    }
}
