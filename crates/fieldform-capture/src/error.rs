/*
[INPUT]:  Failure sources (geolocation payloads, timeouts, submission gate, storage)
[OUTPUT]: Structured error types with user-facing messages and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new failure sources or changing user-visible messages
*/

use thiserror::Error;

/// Why a capture attempt did not yield coordinates.
///
/// The `Display` text is the message shown to the user after
/// "Failed to capture coordinates: ".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureFailure {
    /// Browser or provider reported that location permission was denied
    #[error("{0}")]
    Denied(String),

    /// Position could not be determined (unavailable, browser timeout, transport)
    #[error("{0}")]
    Unavailable(String),

    /// Provider never resolved within the capture timeout
    #[error("Timed out waiting for location after {secs}s")]
    TimedOut { secs: u64 },

    /// Payload was a string but not valid JSON
    #[error("parse error")]
    PayloadParse,

    /// Payload was not a string at all
    #[error("Unexpected return type: {0}")]
    UnexpectedType(String),

    /// Coordinates present but not numeric or out of range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Valid JSON without coordinates or an error
    #[error("Unable to retrieve coordinates. Ensure location permissions are enabled.")]
    NotCaptured,
}

impl CaptureFailure {
    /// Check if the user refused location access
    pub fn is_permission_error(&self) -> bool {
        matches!(self, CaptureFailure::Denied(_))
    }

    /// Check if re-invoking capture without user action could help
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CaptureFailure::Unavailable(_) | CaptureFailure::TimedOut { .. }
        )
    }

    /// Failure message as carried by `CoordinateResult::Failure`
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Submission-time rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Coordinates not captured. Ensure location permissions are enabled and try again.")]
    MissingCoordinates,
}

/// Storage collaborator failure
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Data corruption: {0}")]
    DataCorruption(String),
}
