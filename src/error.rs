use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the RSVP book and its persistence layer
#[derive(Error, Debug)]
pub enum RsvpError {
    /// A required field was empty or blank (surfaced to the attendee)
    #[error("validation failed: {0}")]
    Validation(String),

    /// A stored record broke a record invariant
    #[error("malformed record at position {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("no RSVP with id {0}")]
    NotFound(String),

    /// The data file exists but could not be parsed
    #[error("data file {path} is corrupt: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RsvpError {
    /// True for errors caused by what the attendee typed
    pub fn is_user_error(&self) -> bool {
        matches!(self, RsvpError::Validation(_) | RsvpError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, RsvpError>;
