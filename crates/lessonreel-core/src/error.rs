//! Error types for Lessonreel Core

use thiserror::Error;

use crate::player::playback_error_message;

/// Result type alias for lesson player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when the lesson catalog cannot be loaded
pub const LIST_FETCH_MESSAGE: &str =
    "Failed to load videos. Please make sure the backend server is running.";

/// Message shown when a lesson cannot be resolved to a playable video
pub const VIDEO_LOAD_MESSAGE: &str = "Failed to load video. Please try again.";

/// Lesson player error types
#[derive(Error, Debug)]
pub enum Error {
    // Catalog errors
    #[error("Failed to fetch lesson list: {0}")]
    ListFetch(String),

    // Resolution errors
    #[error("Failed to fetch video reference: {0}")]
    ReferenceFetch(String),

    #[error("Failed to decrypt video reference: {0}")]
    Decrypt(String),

    // Playback errors
    #[error("Embedded player reported error code {code}")]
    Playback { code: i32 },

    // Network errors
    #[error("Network error: {0}")]
    Network(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl Error {
    /// Returns the error code for logs and machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::ListFetch(_) => "LIST_FETCH",
            Error::ReferenceFetch(_) => "REFERENCE_FETCH",
            Error::Decrypt(_) => "DECRYPT",
            Error::Playback { .. } => "PLAYBACK",
            Error::Network(_) => "NETWORK",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// The plain-text message surfaced to the user.
    ///
    /// Detail strings stay in logs; users only ever see the fixed wording.
    pub fn user_message(&self) -> String {
        match self {
            Error::ListFetch(_) => LIST_FETCH_MESSAGE.to_string(),
            Error::ReferenceFetch(_) | Error::Decrypt(_) => VIDEO_LOAD_MESSAGE.to_string(),
            Error::Playback { code } => playback_error_message(*code),
            other => other.to_string(),
        }
    }
}
