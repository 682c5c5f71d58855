/*
[INPUT]:  GeolocationProvider, capture timeout and caching policy
[OUTPUT]: CaptureOutcome (raw payload plus parsed CoordinateResult)
[POS]:    Capture layer - timed one-shot capture with per-session cache
[UPDATE]: When capture timing or caching semantics change
[UPDATE]: 2026-10-18 Round sub-second timeouts up when reporting them
*/

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::payload::parse_payload;
use super::provider::GeolocationProvider;
use crate::error::CaptureFailure;
use crate::types::{CoordinateResult, Coordinates};

pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether re-renders reuse an earlier fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePolicy {
    /// Keep the first successful fix for the session; failures are retried
    #[default]
    CacheFirstSuccess,
    /// Ask the provider again on every render cycle
    RecaptureEveryCycle,
}

/// Result of one capture call
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    /// Payload as returned by the provider, `None` on timeout
    pub raw: Option<Value>,
    pub result: CoordinateResult,
    /// True when served from the session cache
    pub cached: bool,
}

/// Timed capture bound to one provider
pub struct LocationCapture {
    provider: Arc<dyn GeolocationProvider>,
    timeout: Duration,
    policy: CapturePolicy,
    cached: Option<(Value, Coordinates)>,
}

impl LocationCapture {
    pub fn new(provider: Arc<dyn GeolocationProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_CAPTURE_TIMEOUT,
            policy: CapturePolicy::default(),
            cached: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_policy(mut self, policy: CapturePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CapturePolicy {
        self.policy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Forget any cached fix so the next capture asks the provider again
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            debug!("cached location fix dropped");
        }
    }

    /// Capture coordinates once.
    ///
    /// Suspends until the provider resolves or the timeout expires. Every
    /// outcome is returned as data; this never errors.
    pub async fn capture(&mut self) -> CaptureOutcome {
        if self.policy == CapturePolicy::CacheFirstSuccess {
            if let Some((raw, coords)) = &self.cached {
                debug!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    "using cached location fix"
                );
                return CaptureOutcome {
                    raw: Some(raw.clone()),
                    result: CoordinateResult::Success(*coords),
                    cached: true,
                };
            }
        }

        info!(provider = self.provider.name(), "requesting location");
        let raw = match tokio::time::timeout(self.timeout, self.provider.request_position()).await
        {
            Ok(raw) => raw,
            Err(_) => {
                let secs = timeout_secs_rounded_up(self.timeout);
                warn!(provider = self.provider.name(), secs, "location request timed out");
                return CaptureOutcome {
                    raw: None,
                    result: CoordinateResult::Failure(CaptureFailure::TimedOut { secs }),
                    cached: false,
                };
            }
        };
        debug!(raw = %raw, "location payload received");

        let result = parse_payload(&raw);
        match &result {
            CoordinateResult::Success(coords) => {
                info!(
                    latitude = coords.latitude,
                    longitude = coords.longitude,
                    "location captured"
                );
                if self.policy == CapturePolicy::CacheFirstSuccess {
                    self.cached = Some((raw.clone(), *coords));
                }
            }
            CoordinateResult::Failure(failure) => {
                warn!(error = %failure, "location capture failed");
            }
        }

        CaptureOutcome {
            raw: Some(raw),
            result,
            cached: false,
        }
    }
}

impl std::fmt::Debug for LocationCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationCapture")
            .field("provider", &self.provider.name())
            .field("timeout", &self.timeout)
            .field("policy", &self.policy)
            .field("cached", &self.cached.is_some())
            .finish()
    }
}

/// Whole seconds for the user-facing message; never reports 0s for a real wait
fn timeout_secs_rounded_up(timeout: Duration) -> u64 {
    let secs = timeout.as_secs();
    if timeout.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::{ScriptedProvider, StaticProvider, error_payload, success_payload};

    #[tokio::test]
    async fn test_capture_success() {
        let provider = Arc::new(StaticProvider::new(success_payload(12.5, 77.6)));
        let mut capture = LocationCapture::new(provider);
        let outcome = capture.capture().await;
        assert!(outcome.result.is_success());
        assert!(outcome.raw.is_some());
        assert!(!outcome.cached);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_timeout_is_failure() {
        let provider = Arc::new(
            StaticProvider::new(success_payload(1.0, 1.0)).with_delay(Duration::from_secs(60)),
        );
        let mut capture = LocationCapture::new(provider).with_timeout(Duration::from_secs(10));
        let outcome = capture.capture().await;
        assert_eq!(outcome.raw, None);
        assert_eq!(
            outcome.result,
            CoordinateResult::Failure(CaptureFailure::TimedOut { secs: 10 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sub_second_timeout_reports_whole_second() {
        let provider = Arc::new(
            StaticProvider::new(success_payload(1.0, 1.0)).with_delay(Duration::from_secs(5)),
        );
        let mut capture = LocationCapture::new(provider).with_timeout(Duration::from_millis(500));
        let outcome = capture.capture().await;
        assert_eq!(
            outcome.result,
            CoordinateResult::Failure(CaptureFailure::TimedOut { secs: 1 })
        );
        assert_eq!(timeout_secs_rounded_up(Duration::from_millis(2500)), 3);
        assert_eq!(timeout_secs_rounded_up(Duration::from_secs(10)), 10);
    }

    #[tokio::test]
    async fn test_cache_first_success_skips_provider() {
        let provider = Arc::new(ScriptedProvider::new([
            success_payload(1.0, 2.0),
            success_payload(3.0, 4.0),
        ]));
        let mut capture = LocationCapture::new(provider.clone());
        let first = capture.capture().await;
        let second = capture.capture().await;
        assert_eq!(first.result, second.result);
        assert!(second.cached);
        assert_eq!(provider.calls(), 1);

        capture.invalidate();
        let third = capture.capture().await;
        assert_eq!(third.result.coordinates().map(|c| c.latitude), Some(3.0));
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = Arc::new(ScriptedProvider::new([
            error_payload("User denied Geolocation"),
            success_payload(5.0, 6.0),
        ]));
        let mut capture = LocationCapture::new(provider.clone());
        assert!(!capture.capture().await.result.is_success());
        assert!(capture.capture().await.result.is_success());
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_recapture_every_cycle() {
        let provider = Arc::new(ScriptedProvider::new([success_payload(1.0, 2.0)]));
        let mut capture =
            LocationCapture::new(provider.clone()).with_policy(CapturePolicy::RecaptureEveryCycle);
        capture.capture().await;
        let second = capture.capture().await;
        assert!(!second.cached);
        assert_eq!(provider.calls(), 2);
    }
}
