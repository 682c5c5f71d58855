/*
[INPUT]:  Gate state, capture outcomes and submission outcomes
[OUTPUT]: User-facing status messages with a severity level
[POS]:    Display channel - text shown by every front-end
[UPDATE]: When user-visible wording changes
[UPDATE]: 2026-10-18 Add retry hint for denied and transient capture failures
*/

use std::fmt;

use serde_json::Value;

use crate::error::{CaptureFailure, PersistError, SubmissionError};
use crate::gate::PermissionGate;
use crate::types::{CoordinateResult, FormSubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn gate_warning() -> Self {
        Self::new(StatusLevel::Warning, PermissionGate::WARNING)
    }

    /// Diagnostic echo of whatever the provider returned
    pub fn raw_payload(raw: Option<&Value>) -> Self {
        let rendered = match raw {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => "none".to_string(),
        };
        Self::new(StatusLevel::Info, format!("Raw location payload: {rendered}"))
    }

    pub fn capture(result: &CoordinateResult) -> Self {
        match result {
            CoordinateResult::Success(coords) => Self::new(
                StatusLevel::Success,
                format!(
                    "Coordinates Captured: {}, {}",
                    coords.latitude, coords.longitude
                ),
            ),
            CoordinateResult::Failure(CaptureFailure::NotCaptured) => {
                Self::new(StatusLevel::Error, CaptureFailure::NotCaptured.to_string())
            }
            CoordinateResult::Failure(failure) => Self::new(
                StatusLevel::Error,
                format!("Failed to capture coordinates: {failure}"),
            ),
        }
    }

    /// What the user can do about a failed capture, if anything specific
    pub fn capture_hint(result: &CoordinateResult) -> Option<Self> {
        let failure = result.failure()?;
        if failure.is_permission_error() {
            Some(Self::new(
                StatusLevel::Warning,
                "Location access was denied. Re-enable location permission, then retry.",
            ))
        } else if failure.is_retryable() {
            Some(Self::new(
                StatusLevel::Info,
                "Location is temporarily unavailable. Retrying may succeed.",
            ))
        } else {
            None
        }
    }

    pub fn submit_accepted() -> Self {
        Self::new(StatusLevel::Success, "Form submitted successfully!")
    }

    pub fn submit_rejected(error: &SubmissionError) -> Self {
        Self::new(StatusLevel::Warning, error.to_string())
    }

    pub fn record(submission: &FormSubmission) -> Self {
        Self::new(StatusLevel::Info, submission.to_string())
    }

    pub fn persist_failed(error: &PersistError) -> Self {
        Self::new(
            StatusLevel::Error,
            format!("Submission accepted but could not be saved: {error}"),
        )
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
