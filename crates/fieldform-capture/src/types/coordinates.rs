/*
[INPUT]:  Parsed geolocation payloads
[OUTPUT]: Coordinates and the tagged capture result
[POS]:    Data layer - outcome of one capture attempt
[UPDATE]: When capture outcomes gain new arms or validation rules
*/

use serde::{Deserialize, Serialize};

use crate::error::CaptureFailure;

/// A validated latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CaptureFailure> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CaptureFailure::InvalidCoordinates(format!(
                "latitude {latitude} out of range"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CaptureFailure::InvalidCoordinates(format!(
                "longitude {longitude} out of range"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Outcome of one capture attempt. Exactly one arm is populated.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateResult {
    Success(Coordinates),
    Failure(CaptureFailure),
}

impl CoordinateResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CoordinateResult::Success(_))
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            CoordinateResult::Success(coords) => Some(*coords),
            CoordinateResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&CaptureFailure> {
        match self {
            CoordinateResult::Success(_) => None,
            CoordinateResult::Failure(failure) => Some(failure),
        }
    }

    /// Latitude text for the read-only display field (empty on failure)
    pub fn latitude_display(&self) -> String {
        self.coordinates()
            .map(|coords| coords.latitude.to_string())
            .unwrap_or_default()
    }

    /// Longitude text for the read-only display field (empty on failure)
    pub fn longitude_display(&self) -> String {
        self.coordinates()
            .map(|coords| coords.longitude.to_string())
            .unwrap_or_default()
    }
}

impl From<Result<Coordinates, CaptureFailure>> for CoordinateResult {
    fn from(value: Result<Coordinates, CaptureFailure>) -> Self {
        match value {
            Ok(coords) => CoordinateResult::Success(coords),
            Err(failure) => CoordinateResult::Failure(failure),
        }
    }
}
