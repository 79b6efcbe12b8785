//! # Errors
//!
//! Error taxonomy shared by the store, the scheduler and the TUI.

/// Errors produced by reminder operations.
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    /// A required field was missing or malformed. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// Saved state could not be read or parsed.
    #[error("failed to read saved state '{key}': {reason}")]
    PersistenceRead { key: String, reason: String },

    /// Saved state could not be written. In-memory state is still correct.
    #[error("failed to save state '{key}': {reason}")]
    PersistenceWrite { key: String, reason: String },

    /// The scheduler task is no longer running.
    #[error("reminder scheduler has stopped")]
    SchedulerStopped,
}

impl ReminderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ReminderError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReminderError::Validation(_))
    }
}

pub type ReminderResult<T> = Result<T, ReminderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = ReminderError::validation("Name is required");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_persistence_errors_name_the_key() {
        let err = ReminderError::PersistenceWrite {
            key: "medications".to_string(),
            reason: "disk full".to_string(),
        };
        assert!(!err.is_validation());
        assert!(err.to_string().contains("medications"));
        assert!(err.to_string().contains("disk full"));
    }
}
