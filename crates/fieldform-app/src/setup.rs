/*
[INPUT]:  AppConfig sections
[OUTPUT]: Configured LocationCapture and SubmissionSink instances
[POS]:    Wiring layer - turns configuration into capture-crate objects
[UPDATE]: When adding provider kinds or sink backends
[UPDATE]: 2026-10-18 Tag stored records with the session that produced them
*/

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use fieldform_capture::{
    GeolocationProvider, HttpProvider, HttpProviderConfig, JsonFileSink, LocationCapture,
    StaticProvider,
};
use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::config::{CaptureConfig, ProviderConfig, StorageConfig};

/// Build the provider described by `config`
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn GeolocationProvider>> {
    let provider: Arc<dyn GeolocationProvider> = match config {
        ProviderConfig::Http { url } => {
            let url = Url::parse(url).with_context(|| format!("invalid lookup url: {url}"))?;
            let provider = HttpProvider::with_config(HttpProviderConfig::new(url))
                .map_err(|err| anyhow!("create HttpProvider failed: {err}"))?;
            Arc::new(provider)
        }
        ProviderConfig::Static { payload, delay_ms } => Arc::new(
            StaticProvider::new(payload.clone()).with_delay(Duration::from_millis(*delay_ms)),
        ),
    };
    Ok(provider)
}

/// Build a timed capture honoring the configured policy
pub fn build_capture(config: &CaptureConfig) -> Result<LocationCapture> {
    let provider = build_provider(&config.provider)?;
    info!(
        provider = provider.name(),
        timeout_secs = config.timeout_secs,
        policy = ?config.policy,
        "location capture configured"
    );
    Ok(LocationCapture::new(provider)
        .with_timeout(Duration::from_secs(config.timeout_secs))
        .with_policy(config.policy))
}

/// Open the JSON file store for accepted submissions of one session
pub async fn open_sink(config: &StorageConfig, session_id: Uuid) -> Result<Arc<JsonFileSink>> {
    let path = config.resolved_path()?;
    let sink = JsonFileSink::open(&path)
        .await
        .with_context(|| format!("open submission store {}", path.display()))?
        .with_session(session_id);
    info!(path = %path.display(), %session_id, "submission store ready");
    Ok(Arc::new(sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use fieldform_capture::CapturePolicy;

    #[tokio::test]
    async fn test_build_capture_from_static_config() {
        let mut config = AppConfig::default().with_static_payload(r#"{"latitude":1,"longitude":2}"#);
        config.capture.timeout_secs = 4;
        config.capture.policy = CapturePolicy::RecaptureEveryCycle;

        let mut capture = build_capture(&config.capture).unwrap();
        assert_eq!(capture.provider_name(), "static");
        assert_eq!(capture.timeout(), Duration::from_secs(4));
        assert_eq!(capture.policy(), CapturePolicy::RecaptureEveryCycle);
        assert!(capture.capture().await.result.is_success());
    }

    #[test]
    fn test_build_http_provider() {
        let provider = build_provider(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.name(), "http");
    }

    #[tokio::test]
    async fn test_open_sink_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("submissions.json");
        let sink = open_sink(
            &StorageConfig {
                path: Some(path.clone()),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        assert_eq!(sink.path(), path.as_path());
        assert!(path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_open_sink_tags_records_with_session() {
        use fieldform_capture::{FormSubmission, SubmissionSink};

        let dir = tempfile::tempdir().unwrap();
        let session_id = Uuid::new_v4();
        let sink = open_sink(
            &StorageConfig {
                path: Some(dir.path().join("submissions.json")),
            },
            session_id,
        )
        .await
        .unwrap();

        sink.persist(FormSubmission {
            name: "Dana".to_string(),
            role: String::new(),
            task: String::new(),
            notes: String::new(),
            latitude: Some(1.0),
            longitude: Some(2.0),
        })
        .await
        .unwrap();
        assert_eq!(sink.list().await[0].session_id, Some(session_id));
    }
}
