//! # Feature: Notifications
//!
//! Reminder banners and desktop delivery.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.1.0: Banners keyed by medication id instead of matched by name
//! - 1.0.0: Initial release with banners and notify-send delivery

pub mod banner;
pub mod desktop;
pub mod dispatcher;

pub use banner::{BannerList, Notification};
pub use desktop::{backend_for, DesktopNotifier, Disabled, NotifySend, Permission, NOTIFICATION_TITLE};
pub use dispatcher::NotificationDispatcher;
