//! In-app reminder banners.

use crate::features::medications::Medication;
use uuid::Uuid;

/// A pending reminder for one medication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Medication this reminder belongs to
    pub medication_id: Uuid,
    pub text: String,
}

impl Notification {
    pub fn for_medication(medication: &Medication) -> Self {
        Notification {
            medication_id: medication.id,
            text: medication.reminder_text(),
        }
    }
}

/// Ordered, dismissible list of banners
#[derive(Debug, Clone, Default)]
pub struct BannerList {
    banners: Vec<Notification>,
}

impl BannerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.banners.push(notification);
    }

    /// Remove the banner at `index`; out of range is ignored
    pub fn dismiss(&mut self, index: usize) -> Option<Notification> {
        if index < self.banners.len() {
            Some(self.banners.remove(index))
        } else {
            None
        }
    }

    /// Remove every banner for `medication_id`, returning how many went
    pub fn retract(&mut self, medication_id: Uuid) -> usize {
        let before = self.banners.len();
        self.banners.retain(|n| n.medication_id != medication_id);
        before - self.banners.len()
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.banners
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: Uuid, text: &str) -> Notification {
        Notification {
            medication_id: id,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_dismiss_by_position() {
        let mut list = BannerList::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        list.push(note(a, "first"));
        list.push(note(b, "second"));

        assert_eq!(list.dismiss(5), None);
        assert_eq!(list.dismiss(0).map(|n| n.text), Some("first".to_string()));
        assert_eq!(list.as_slice(), &[note(b, "second")]);
    }

    #[test]
    fn test_retract_is_keyed_by_id_not_text() {
        let mut list = BannerList::new();
        let (vit, vit_d) = (Uuid::new_v4(), Uuid::new_v4());
        list.push(note(vit, "Time to take Vitamin (1 tab)"));
        list.push(note(vit_d, "Time to take Vitamin D (1 tab)"));

        assert_eq!(list.retract(vit), 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].medication_id, vit_d);
        assert_eq!(list.retract(vit), 0);
    }
}
