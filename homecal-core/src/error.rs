//! Error types for homecal.

use thiserror::Error;

/// Errors that can occur outside the pure layout functions.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Please enter a title")]
    EmptyTitle,

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Please enter a comment")]
    EmptyComment,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Profile has no household code")]
    NoHousehold,

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Link not found: {0}")]
    LinkNotFound(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Unknown repeat frequency '{0}'")]
    InvalidRepeat(String),

    #[error("Invalid color '{0}'. Expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),

    #[error("Unknown time zone '{0}'")]
    InvalidZone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

/// Result type alias for homecal operations.
pub type CoreResult<T> = Result<T, CoreError>;
