/*
[INPUT]:  Lookup URL and HTTP timeouts
[OUTPUT]: Bridge-shaped payloads from an HTTP geolocation lookup
[POS]:    Capture layer - reqwest-backed geolocation provider
[UPDATE]: When supporting new lookup services or response shapes
*/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use super::payload::{error_payload, success_payload};
use super::provider::GeolocationProvider;

/// IP based lookup returning `latitude`/`longitude` at the top level
pub const DEFAULT_LOOKUP_URL: &str = "https://ipapi.co/json/";

/// HTTP provider configuration
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    pub url: Url,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl HttpProviderConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(8),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Provider that asks a JSON lookup endpoint for the current position.
///
/// Transport errors, non-success statuses and service error bodies are all
/// folded into `{"error": "..."}` payloads so callers see the same contract
/// as the browser bridge.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    http_client: Client,
    url: Url,
}

impl HttpProvider {
    /// Create a provider against the default lookup service
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(HttpProviderConfig::new(Url::parse(DEFAULT_LOOKUP_URL)?))
    }

    /// Create a provider with custom configuration
    pub fn with_config(config: HttpProviderConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("fieldform/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            url: config.url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn lookup(&self) -> Result<Value, String> {
        let response = self
            .http_client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|err| format!("Location lookup failed: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Location lookup returned HTTP {}", status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| format!("Location lookup returned an unreadable body: {err}"))
    }
}

#[async_trait]
impl GeolocationProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn request_position(&self) -> Value {
        match self.lookup().await {
            Ok(Value::Object(body)) => normalize_body(&body),
            Ok(other) => {
                debug!(body = %other, "location lookup returned a non-object body");
                Value::String(other.to_string())
            }
            Err(message) => {
                warn!(url = %self.url, "{message}");
                error_payload(message)
            }
        }
    }
}

fn normalize_body(body: &Map<String, Value>) -> Value {
    // ipapi style: {"error": true, "reason": "RateLimited"}
    if body.get("error").and_then(Value::as_bool) == Some(true) {
        let reason = body
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or("Location lookup failed");
        return error_payload(reason);
    }

    match (
        body.get("latitude").and_then(Value::as_f64),
        body.get("longitude").and_then(Value::as_f64),
    ) {
        (Some(latitude), Some(longitude)) => success_payload(latitude, longitude),
        _ => Value::String(Value::Object(body.clone()).to_string()),
    }
}
