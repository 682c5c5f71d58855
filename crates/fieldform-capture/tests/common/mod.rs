/*
[INPUT]:  Session flow tests and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for fieldform-capture tests

use std::sync::Arc;

use fieldform_capture::{FormFields, FormSession, LocationCapture, StaticProvider};
use serde_json::Value;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Session whose provider always returns `payload`
#[allow(dead_code)]
pub fn session_with_payload(payload: Value) -> FormSession {
    FormSession::new(LocationCapture::new(Arc::new(StaticProvider::new(payload))))
}

/// Session whose provider returns the raw bridge string `raw`
#[allow(dead_code)]
pub fn session_with_raw(raw: &str) -> FormSession {
    session_with_payload(Value::String(raw.to_string()))
}

#[allow(dead_code)]
pub fn alice_fields() -> FormFields {
    FormFields {
        name: "Alice".to_string(),
        role: "Field officer".to_string(),
        task: "Survey the north plot".to_string(),
        notes: String::new(),
    }
}
