//! # Desktop Notifications
//!
//! Best-effort delivery of reminders through the desktop notification
//! daemon. Nothing here may fail a store mutation; callers log errors and
//! move on.

use crate::core::DesktopNotifications;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use tokio::process::Command;

/// Title used for every desktop reminder
pub const NOTIFICATION_TITLE: &str = "Medication Reminder";

/// Default notifier executable
const NOTIFY_SEND: &str = "notify-send";

/// Whether desktop notifications may be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    Granted,
    Denied,
    #[default]
    Undetermined,
}

impl Permission {
    pub fn label(&self) -> &'static str {
        match self {
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Undetermined => "not decided",
        }
    }
}

#[async_trait]
pub trait DesktopNotifier: Send + Sync {
    /// Current permission without prompting
    async fn permission(&self) -> Permission;

    /// Ask the platform for permission
    async fn request_permission(&self) -> Permission;

    async fn show(&self, title: &str, body: &str) -> Result<()>;
}

/// Shells out to `notify-send`
#[derive(Debug, Clone)]
pub struct NotifySend {
    program: String,
    configured: Permission,
}

impl NotifySend {
    pub fn new(configured: Permission) -> Self {
        NotifySend {
            program: NOTIFY_SEND.to_string(),
            configured,
        }
    }

    /// Use a different executable with the same arguments
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[async_trait]
impl DesktopNotifier for NotifySend {
    async fn permission(&self) -> Permission {
        self.configured
    }

    async fn request_permission(&self) -> Permission {
        match Command::new(&self.program).arg("--version").output().await {
            Ok(output) if output.status.success() => Permission::Granted,
            Ok(output) => {
                debug!("{} --version exited with {}", self.program, output.status);
                Permission::Denied
            }
            Err(e) => {
                debug!("{} is not available: {}", self.program, e);
                Permission::Denied
            }
        }
    }

    async fn show(&self, title: &str, body: &str) -> Result<()> {
        let output = Command::new(&self.program)
            .args(["--app-name", "medremind", title, body])
            .output()
            .await
            .map_err(|e| anyhow!("failed to run {}: {}", self.program, e))?;

        if !output.status.success() {
            return Err(anyhow!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(())
    }
}

/// Backend that never shows anything
#[derive(Debug, Default, Clone, Copy)]
pub struct Disabled;

#[async_trait]
impl DesktopNotifier for Disabled {
    async fn permission(&self) -> Permission {
        Permission::Denied
    }

    async fn request_permission(&self) -> Permission {
        Permission::Denied
    }

    async fn show(&self, _title: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

/// Pick the backend for the configured notification mode
pub fn backend_for(setting: DesktopNotifications) -> Arc<dyn DesktopNotifier> {
    match setting {
        DesktopNotifications::Off => Arc::new(Disabled),
        DesktopNotifications::Ask => Arc::new(NotifySend::new(Permission::Undetermined)),
        DesktopNotifications::Granted => Arc::new(NotifySend::new(Permission::Granted)),
        DesktopNotifications::Denied => Arc::new(NotifySend::new(Permission::Denied)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every call; answers with fixed permissions
    #[derive(Debug)]
    pub struct RecordingNotifier {
        pub current: Permission,
        pub on_request: Permission,
        pub fail_show: bool,
        pub shown: Mutex<Vec<(String, String)>>,
        pub requests: Mutex<usize>,
    }

    impl RecordingNotifier {
        pub fn new(current: Permission, on_request: Permission) -> Self {
            RecordingNotifier {
                current,
                on_request,
                fail_show: false,
                shown: Mutex::new(Vec::new()),
                requests: Mutex::new(0),
            }
        }

        pub fn shown(&self) -> Vec<(String, String)> {
            self.shown.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            *self.requests.lock().unwrap()
        }
    }

    #[async_trait]
    impl DesktopNotifier for RecordingNotifier {
        async fn permission(&self) -> Permission {
            self.current
        }

        async fn request_permission(&self) -> Permission {
            *self.requests.lock().unwrap() += 1;
            self.on_request
        }

        async fn show(&self, title: &str, body: &str) -> Result<()> {
            self.shown
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            if self.fail_show {
                Err(anyhow!("notification daemon unavailable"))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_backend_is_always_denied() {
        let backend = backend_for(DesktopNotifications::Off);
        assert_eq!(backend.permission().await, Permission::Denied);
        assert_eq!(backend.request_permission().await, Permission::Denied);
        assert!(backend.show("t", "b").await.is_ok());
    }

    #[tokio::test]
    async fn test_configured_permission_is_reported() {
        assert_eq!(
            backend_for(DesktopNotifications::Granted).permission().await,
            Permission::Granted
        );
        assert_eq!(
            backend_for(DesktopNotifications::Denied).permission().await,
            Permission::Denied
        );
        assert_eq!(
            backend_for(DesktopNotifications::Ask).permission().await,
            Permission::Undetermined
        );
    }

    #[tokio::test]
    async fn test_missing_program_denies_and_fails_show() {
        let backend = NotifySend::new(Permission::Undetermined)
            .with_program("medremind-no-such-notifier");
        assert_eq!(backend.request_permission().await, Permission::Denied);
        assert!(backend.show(NOTIFICATION_TITLE, "body").await.is_err());
    }
}
