/*
[INPUT]:  Position requests from LocationCapture
[OUTPUT]: Raw JSON payloads in the browser bridge shape
[POS]:    Capture layer - geolocation provider abstraction
[UPDATE]: When adding new provider kinds
*/

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// Source of device coordinates.
///
/// Resolution never fails at the transport level. A provider reports failure
/// inside the payload, normally as a JSON string such as
/// `{"error": "User denied Geolocation"}`. Success is a JSON string holding
/// `{"latitude": .., "longitude": ..}`. The payload is deliberately untyped;
/// `parse_payload` turns it into a `CoordinateResult`.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Request the current position once
    async fn request_position(&self) -> Value;
}

/// Provider that always resolves to the same payload
#[derive(Debug, Clone)]
pub struct StaticProvider {
    payload: Value,
    delay: Duration,
}

impl StaticProvider {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            delay: Duration::ZERO,
        }
    }

    /// Wrap a raw bridge string, e.g. `{"latitude":12.5,"longitude":77.6}`
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self::new(Value::String(raw.into()))
    }

    /// Delay resolution, used to simulate a slow position fix
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl GeolocationProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn request_position(&self) -> Value {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.payload.clone()
    }
}

/// Provider that replays a queue of payloads, repeating the last one
#[derive(Debug)]
pub struct ScriptedProvider {
    payloads: Mutex<VecDeque<Value>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(payloads: impl IntoIterator<Item = Value>) -> Self {
        Self {
            payloads: Mutex::new(payloads.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `request_position` was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeolocationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn request_position(&self) -> Value {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut payloads = self.payloads.lock().unwrap_or_else(PoisonError::into_inner);
        if payloads.len() > 1 {
            payloads.pop_front().unwrap_or(Value::Null)
        } else {
            payloads.front().cloned().unwrap_or(Value::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticProvider::from_raw(r#"{"latitude":1.0,"longitude":2.0}"#);
        assert_eq!(provider.name(), "static");
        let payload = provider.request_position().await;
        assert_eq!(
            payload,
            Value::String(r#"{"latitude":1.0,"longitude":2.0}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_scripted_provider_repeats_last() {
        let provider = ScriptedProvider::new([Value::from("a"), Value::from("b")]);
        assert_eq!(provider.request_position().await, Value::from("a"));
        assert_eq!(provider.request_position().await, Value::from("b"));
        assert_eq!(provider.request_position().await, Value::from("b"));
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_scripted_provider_empty_is_null() {
        let provider = ScriptedProvider::new(Vec::new());
        assert_eq!(provider.request_position().await, Value::Null);
    }
}
