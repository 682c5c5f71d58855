/*
[INPUT]:  Untyped JSON payload returned by a geolocation provider
[OUTPUT]: Strictly validated CoordinateResult
[POS]:    Capture layer - payload parse-and-validate step
[UPDATE]: When the bridge payload shape changes
*/

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::CaptureFailure;
use crate::types::{CoordinateResult, Coordinates};

/// W3C GeolocationPositionError.PERMISSION_DENIED
const PERMISSION_DENIED_CODE: i64 = 1;

/// Parse a provider payload into a `CoordinateResult`.
///
/// The payload must be a JSON-encoded string. Anything else, and any string
/// that does not decode to a recognised shape, ends up in the `Failure` arm.
pub fn parse_payload(raw: &Value) -> CoordinateResult {
    let Value::String(text) = raw else {
        return CoordinateResult::Failure(CaptureFailure::UnexpectedType(
            json_type_name(raw).to_string(),
        ));
    };

    let decoded: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "location payload is not valid JSON");
            return CoordinateResult::Failure(CaptureFailure::PayloadParse);
        }
    };

    match decoded {
        Value::Object(fields) => parse_object(&fields),
        _ => CoordinateResult::Failure(CaptureFailure::NotCaptured),
    }
}

fn parse_object(fields: &Map<String, Value>) -> CoordinateResult {
    if let (Some(latitude), Some(longitude)) = (fields.get("latitude"), fields.get("longitude")) {
        return parse_coordinates(latitude, longitude).into();
    }

    match fields.get("error") {
        Some(Value::String(message)) => {
            CoordinateResult::Failure(classify_error(message, fields.get("code")))
        }
        _ => CoordinateResult::Failure(CaptureFailure::NotCaptured),
    }
}

fn parse_coordinates(latitude: &Value, longitude: &Value) -> Result<Coordinates, CaptureFailure> {
    let latitude = latitude.as_f64().ok_or_else(|| {
        CaptureFailure::InvalidCoordinates(format!("latitude is not a number: {latitude}"))
    })?;
    let longitude = longitude.as_f64().ok_or_else(|| {
        CaptureFailure::InvalidCoordinates(format!("longitude is not a number: {longitude}"))
    })?;
    Coordinates::new(latitude, longitude)
}

fn classify_error(message: &str, code: Option<&Value>) -> CaptureFailure {
    let denied = match code.and_then(Value::as_i64) {
        Some(code) => code == PERMISSION_DENIED_CODE,
        None => message.to_ascii_lowercase().contains("denied"),
    };
    if denied {
        CaptureFailure::Denied(message.to_string())
    } else {
        CaptureFailure::Unavailable(message.to_string())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Success payload in the bridge shape
pub fn success_payload(latitude: f64, longitude: f64) -> Value {
    Value::String(json!({ "latitude": latitude, "longitude": longitude }).to_string())
}

/// Failure payload in the bridge shape
pub fn error_payload(message: impl Into<String>) -> Value {
    Value::String(json!({ "error": message.into() }).to_string())
}
