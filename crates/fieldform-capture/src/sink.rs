/*
[INPUT]:  Accepted FormSubmission values
[OUTPUT]: Persisted SubmissionRecord entries (memory or JSON file)
[POS]:    Storage collaborator - hand-off point after an accepted submit
[UPDATE]: When adding sink backends or changing the on-disk format
*/

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::PersistError;
use crate::types::{FormSubmission, SubmissionRecord};

/// External storage for accepted submissions
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn persist(&self, submission: FormSubmission) -> Result<(), PersistError>;
}

/// In-memory sink, used for dry runs and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn persist(&self, submission: FormSubmission) -> Result<(), PersistError> {
        self.records
            .lock()
            .await
            .push(SubmissionRecord::new(submission, None));
        Ok(())
    }
}

/// Sink writing every record to a single JSON array file
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    session_id: Option<Uuid>,
    records: Mutex<Vec<SubmissionRecord>>,
}

impl JsonFileSink {
    /// Open (or create) the store at `path`, loading existing records
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let records = Self::load_records(&path).await?;
        debug!(path = %path.display(), count = records.len(), "submission store opened");

        Ok(Self {
            path,
            session_id: None,
            records: Mutex::new(records),
        })
    }

    /// Tag records written through this sink with a session id
    pub fn with_session(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_records(path: &Path) -> Result<Vec<SubmissionRecord>, PersistError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|err| {
            PersistError::DataCorruption(format!("{}: {err}", path.display()))
        })
    }

    /// Records currently stored, oldest first
    pub async fn list(&self) -> Vec<SubmissionRecord> {
        self.records.lock().await.clone()
    }

    async fn save_records(&self, records: &[SubmissionRecord]) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(records)?;

        // Atomic write: write to temp file then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SubmissionSink for JsonFileSink {
    async fn persist(&self, submission: FormSubmission) -> Result<(), PersistError> {
        let record = SubmissionRecord::new(submission, self.session_id);
        let mut records = self.records.lock().await;
        records.push(record.clone());
        if let Err(err) = self.save_records(&records).await {
            records.pop();
            return Err(err);
        }
        info!(
            record_id = %record.id,
            path = %self.path.display(),
            total = records.len(),
            "submission saved"
        );
        Ok(())
    }
}
