//! # Configuration
//!
//! Runtime settings read from the environment (and an optional `.env`).
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Added MEDREMIND_LOG_FILE so logs stay out of the terminal UI
//! - 1.0.0: Initial environment-based configuration

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default period between due checks
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

/// Default UI poll rate
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Directory name used under the platform data dir
const APP_DIR_NAME: &str = "medremind";

/// How desktop notifications should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesktopNotifications {
    /// Not decided yet; the first reminder probes the platform
    #[default]
    Ask,
    /// Previously granted
    Granted,
    /// Previously denied; never prompt
    Denied,
    /// Backend disabled entirely
    Off,
}

impl DesktopNotifications {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "ask" => Ok(DesktopNotifications::Ask),
            "granted" | "on" | "true" => Ok(DesktopNotifications::Granted),
            "denied" => Ok(DesktopNotifications::Denied),
            "off" | "false" => Ok(DesktopNotifications::Off),
            other => Err(anyhow!(
                "MEDREMIND_DESKTOP_NOTIFICATIONS must be one of ask, granted, denied, off (got '{other}')"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the saved medication list
    pub data_dir: PathBuf,
    /// Period of the due checker
    pub check_interval: Duration,
    /// UI poll rate
    pub tick_rate: Duration,
    pub desktop_notifications: DesktopNotifications,
    pub log_level: String,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup("MEDREMIND_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(),
        };

        let check_secs = parse_u64(&lookup, "MEDREMIND_CHECK_INTERVAL_SECS", DEFAULT_CHECK_INTERVAL_SECS)?;
        if check_secs == 0 {
            return Err(anyhow!("MEDREMIND_CHECK_INTERVAL_SECS must be greater than zero"));
        }
        let tick_ms = parse_u64(&lookup, "MEDREMIND_TICK_RATE_MS", DEFAULT_TICK_RATE_MS)?.max(10);

        let desktop_notifications = match lookup("MEDREMIND_DESKTOP_NOTIFICATIONS") {
            Some(value) => DesktopNotifications::parse(&value)?,
            None => DesktopNotifications::default(),
        };

        let log_level = lookup("MEDREMIND_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());
        let log_file = lookup("MEDREMIND_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            data_dir,
            check_interval: Duration::from_secs(check_secs),
            tick_rate: Duration::from_millis(tick_ms),
            desktop_notifications,
            log_level,
            log_file,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            check_interval: Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS),
            tick_rate: Duration::from_millis(DEFAULT_TICK_RATE_MS),
            desktop_notifications: DesktopNotifications::default(),
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

/// Platform data directory, or `./.medremind` when there is none
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR_NAME}")))
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number (got '{raw}')")),
        None => Ok(default),
    }
}
