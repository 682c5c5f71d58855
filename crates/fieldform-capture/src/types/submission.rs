/*
[INPUT]:  Questionnaire answers and captured coordinates
[OUTPUT]: Form fields, assembled submissions and stored records
[POS]:    Data layer - submission value objects
[UPDATE]: When questionnaire fields or the stored record change
*/

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-text answers as typed by the user. No validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub role: String,
    pub task: String,
    pub notes: String,
}

/// Questionnaire answers annotated with the captured coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub name: String,
    pub role: String,
    pub task: String,
    pub notes: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl fmt::Display for FormSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Role: {}, Task: {}, Notes: {}, Latitude: {}, Longitude: {}",
            self.name,
            self.role,
            self.task,
            self.notes,
            optional_degrees(self.latitude),
            optional_degrees(self.longitude),
        )
    }
}

fn optional_degrees(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// A persisted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub session_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub submission: FormSubmission,
}

impl SubmissionRecord {
    pub fn new(submission: FormSubmission, session_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            submitted_at: Utc::now(),
            submission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_display() {
        let submission = FormSubmission {
            name: "Alice".to_string(),
            role: "Surveyor".to_string(),
            task: String::new(),
            notes: String::new(),
            latitude: Some(12.5),
            longitude: Some(77.6),
        };
        let rendered = submission.to_string();
        assert!(rendered.starts_with("Name: Alice, Role: Surveyor"));
        assert!(rendered.ends_with("Latitude: 12.5, Longitude: 77.6"));
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = SubmissionRecord::new(
            FormSubmission {
                name: "Bob".to_string(),
                role: String::new(),
                task: String::new(),
                notes: String::new(),
                latitude: Some(1.0),
                longitude: Some(2.0),
            },
            None,
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "Bob");
        assert_eq!(value["latitude"], 1.0);
        assert!(value.get("submission").is_none());
    }
}
