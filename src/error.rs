use thiserror::Error;

/// Failures the user can act on. Everything else in the tracker degrades to a
/// default instead of erroring.
#[derive(Debug, Error)]
pub enum ShiurError {
    #[error("invalid backup file: {0}")]
    InvalidBackup(#[from] serde_json::Error),

    #[error("account name must not be empty")]
    EmptyAccountName,

    #[error("unknown study mode '{0}' (expected 3-chapters or 1-chapter)")]
    UnknownStudyMode(String),

    #[error("schedule data for {mode} is invalid: {reason}")]
    Schedule { mode: &'static str, reason: String },
}
