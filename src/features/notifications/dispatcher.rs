//! # Notification Dispatcher
//!
//! Tracks pending banners and the desktop permission state. It never talks
//! to the platform itself: [`NotificationDispatcher::dispatch`] returns the
//! notifications that should also be shown on the desktop and
//! [`NotificationDispatcher::on_permission`] says when to prompt.

use crate::features::notifications::banner::{BannerList, Notification};
use crate::features::notifications::desktop::Permission;
use log::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct NotificationDispatcher {
    banners: BannerList,
    permission: Permission,
    /// A prompt has been issued during this dispatcher's lifetime
    permission_requested: bool,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue banners for newly due medications.
    ///
    /// Returns the subset to show on the desktop, empty unless permission
    /// has been granted.
    pub fn dispatch(&mut self, notifications: Vec<Notification>) -> Vec<Notification> {
        for notification in &notifications {
            self.banners.push(notification.clone());
        }
        if self.permission == Permission::Granted {
            notifications
        } else {
            if !notifications.is_empty() {
                debug!(
                    "Skipping {} desktop notifications (permission {})",
                    notifications.len(),
                    self.permission.label()
                );
            }
            Vec::new()
        }
    }

    /// Record the platform permission. Returns `true` when a prompt should
    /// be issued, which happens at most once per dispatcher.
    pub fn on_permission(&mut self, permission: Permission) -> bool {
        self.permission = permission;
        if permission == Permission::Undetermined && !self.permission_requested {
            self.permission_requested = true;
            return true;
        }
        false
    }

    pub fn dismiss(&mut self, index: usize) -> Option<Notification> {
        self.banners.dismiss(index)
    }

    /// Drop every banner for a medication
    pub fn retract(&mut self, medication_id: Uuid) -> usize {
        self.banners.retract(medication_id)
    }

    pub fn banners(&self) -> &[Notification] {
        self.banners.as_slice()
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(text: &str) -> Notification {
        Notification {
            medication_id: Uuid::new_v4(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_banners_always_queued() {
        let mut dispatcher = NotificationDispatcher::new();
        let desktop = dispatcher.dispatch(vec![note("a"), note("b")]);
        assert!(desktop.is_empty());
        assert_eq!(dispatcher.banners().len(), 2);
    }

    #[test]
    fn test_desktop_only_when_granted() {
        let mut dispatcher = NotificationDispatcher::new();
        assert!(!dispatcher.on_permission(Permission::Granted));
        let desktop = dispatcher.dispatch(vec![note("a")]);
        assert_eq!(desktop.len(), 1);
        assert_eq!(dispatcher.banners().len(), 1);

        dispatcher.on_permission(Permission::Denied);
        assert!(dispatcher.dispatch(vec![note("b")]).is_empty());
    }

    #[test]
    fn test_prompts_once_when_undetermined() {
        let mut dispatcher = NotificationDispatcher::new();
        assert!(dispatcher.on_permission(Permission::Undetermined));
        assert!(!dispatcher.on_permission(Permission::Undetermined));
        assert_eq!(dispatcher.permission(), Permission::Undetermined);
    }

    #[test]
    fn test_denied_never_prompts() {
        let mut dispatcher = NotificationDispatcher::new();
        assert!(!dispatcher.on_permission(Permission::Denied));
        assert_eq!(dispatcher.permission(), Permission::Denied);
    }

    #[test]
    fn test_dismiss_and_retract() {
        let mut dispatcher = NotificationDispatcher::new();
        let a = note("a");
        let a_id = a.medication_id;
        dispatcher.dispatch(vec![a.clone(), note("b"), a]);

        assert_eq!(dispatcher.dismiss(1).map(|n| n.text), Some("b".to_string()));
        assert_eq!(dispatcher.retract(a_id), 2);
        assert!(dispatcher.banners().is_empty());
        assert!(dispatcher.dismiss(0).is_none());
    }
}
