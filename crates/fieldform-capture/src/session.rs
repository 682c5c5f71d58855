/*
[INPUT]:  PermissionGate, LocationCapture, FormFields and a SubmissionSink
[OUTPUT]: RenderView per render cycle and SubmitOutcome per submit
[POS]:    Session layer - orchestrates gate, capture and submission for one user
[UPDATE]: When render or submit sequencing changes
*/

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::SubmissionError;
use crate::flow::{FlowEvent, FlowState};
use crate::gate::PermissionGate;
use crate::geolocation::LocationCapture;
use crate::sink::SubmissionSink;
use crate::status::StatusMessage;
use crate::submission::build_submission;
use crate::types::{CoordinateResult, FormFields, FormSubmission};

/// What a front-end should show after a render cycle
#[derive(Debug, Clone, PartialEq)]
pub enum RenderView {
    /// Only the warning and the acknowledgement control
    Gated { messages: Vec<StatusMessage> },
    /// The questionnaire, with coordinates echoed into read-only fields
    Form {
        messages: Vec<StatusMessage>,
        latitude: String,
        longitude: String,
        result: CoordinateResult,
    },
}

impl RenderView {
    pub fn messages(&self) -> &[StatusMessage] {
        match self {
            RenderView::Gated { messages } | RenderView::Form { messages, .. } => messages,
        }
    }
}

/// Outcome of one submit action
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted {
        submission: FormSubmission,
        messages: Vec<StatusMessage>,
        persisted: bool,
    },
    Rejected {
        error: SubmissionError,
        messages: Vec<StatusMessage>,
    },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }

    pub fn messages(&self) -> &[StatusMessage] {
        match self {
            SubmitOutcome::Accepted { messages, .. } | SubmitOutcome::Rejected { messages, .. } => {
                messages
            }
        }
    }
}

/// One user's pass through gate, capture and submission
#[derive(Debug)]
pub struct FormSession {
    id: Uuid,
    gate: PermissionGate,
    state: FlowState,
    capture: LocationCapture,
    last_result: Option<CoordinateResult>,
}

impl FormSession {
    pub fn new(capture: LocationCapture) -> Self {
        let id = Uuid::new_v4();
        info!(session_id = %id, provider = capture.provider_name(), "form session created");
        Self {
            id,
            gate: PermissionGate::new(),
            state: FlowState::Gated,
            capture,
            last_result: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_open()
    }

    pub fn last_result(&self) -> Option<&CoordinateResult> {
        self.last_result.as_ref()
    }

    /// Open the gate, or re-arm capture after a failed one
    pub fn acknowledge(&mut self) {
        self.gate.acknowledge();
        self.apply(FlowEvent::Acknowledge);
        if self.state == FlowState::Capturing {
            self.capture.invalidate();
        }
    }

    /// Drop any cached fix so the next render asks the provider again
    pub fn request_recapture(&mut self) {
        self.capture.invalidate();
    }

    /// Run one render cycle.
    ///
    /// While the gate is closed nothing is captured. Otherwise this suspends
    /// on the capture call and only then produces the form view.
    pub async fn render(&mut self) -> RenderView {
        if !self.gate.is_enabled() {
            return RenderView::Gated {
                messages: vec![StatusMessage::gate_warning()],
            };
        }

        if self.state != FlowState::Capturing {
            self.apply(FlowEvent::BeginCapture);
        }

        let outcome = self.capture.capture().await;
        self.apply(FlowEvent::Resolve {
            success: outcome.result.is_success(),
        });

        let messages = vec![
            StatusMessage::raw_payload(outcome.raw.as_ref()),
            StatusMessage::capture(&outcome.result),
        ];
        let view = RenderView::Form {
            messages,
            latitude: outcome.result.latitude_display(),
            longitude: outcome.result.longitude_display(),
            result: outcome.result.clone(),
        };
        self.last_result = Some(outcome.result);
        view
    }

    /// Submit answers against the latest capture.
    ///
    /// Accepted submissions are handed to `sink`. A sink failure is reported
    /// in the messages but does not undo acceptance.
    pub async fn submit(&mut self, fields: FormFields, sink: &dyn SubmissionSink) -> SubmitOutcome {
        let built = match &self.last_result {
            Some(result) => build_submission(fields, result),
            None => Err(SubmissionError::MissingCoordinates),
        };

        if self.state.can_transition(FlowEvent::Submit) {
            self.apply(FlowEvent::Submit);
        }

        match built {
            Ok(submission) => {
                info!(session_id = %self.id, name = %submission.name, "submission accepted");
                let mut messages = vec![
                    StatusMessage::submit_accepted(),
                    StatusMessage::record(&submission),
                ];
                let persisted = match sink.persist(submission.clone()).await {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(session_id = %self.id, error = %err, "failed to persist submission");
                        messages.push(StatusMessage::persist_failed(&err));
                        false
                    }
                };
                SubmitOutcome::Accepted {
                    submission,
                    messages,
                    persisted,
                }
            }
            Err(error) => {
                warn!(session_id = %self.id, "submission rejected: missing coordinates");
                SubmitOutcome::Rejected {
                    messages: vec![StatusMessage::submit_rejected(&error)],
                    error,
                }
            }
        }
    }

    fn apply(&mut self, event: FlowEvent) {
        match self.state.next(event) {
            Ok(next) => {
                if next != self.state {
                    info!(session_id = %self.id, from = ?self.state, to = ?next, "flow transition");
                }
                self.state = next;
            }
            Err(err) => {
                tracing::debug!(session_id = %self.id, error = %err, "flow event ignored");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::geolocation::{ScriptedProvider, StaticProvider, error_payload, success_payload};
    use crate::sink::MemorySink;

    fn session_with(provider: Arc<dyn crate::geolocation::GeolocationProvider>) -> FormSession {
        FormSession::new(LocationCapture::new(provider))
    }

    #[tokio::test]
    async fn test_gated_render_captures_nothing() {
        let provider = Arc::new(ScriptedProvider::new([success_payload(1.0, 2.0)]));
        let mut session = session_with(provider.clone());
        let view = session.render().await;
        assert_eq!(
            view,
            RenderView::Gated {
                messages: vec![StatusMessage::gate_warning()],
            }
        );
        assert_eq!(provider.calls(), 0);
        assert_eq!(session.state(), FlowState::Gated);
    }

    #[tokio::test]
    async fn test_submit_before_capture_is_rejected() {
        let provider = Arc::new(StaticProvider::new(success_payload(1.0, 2.0)));
        let mut session = session_with(provider);
        let sink = MemorySink::new();
        let outcome = session.submit(FormFields::default(), &sink).await;
        assert!(!outcome.is_accepted());
        assert_eq!(session.state(), FlowState::Gated);
        assert!(sink.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_reacknowledge_after_failure_retries() {
        let provider = Arc::new(ScriptedProvider::new([
            error_payload("User denied Geolocation"),
            success_payload(12.5, 77.6),
        ]));
        let mut session = session_with(provider);
        session.acknowledge();
        let view = session.render().await;
        assert!(matches!(view, RenderView::Form { ref latitude, .. } if latitude.is_empty()));
        assert_eq!(session.state(), FlowState::CapturedFailure);

        let sink = MemorySink::new();
        let outcome = session.submit(FormFields::default(), &sink).await;
        assert!(!outcome.is_accepted());
        assert_eq!(session.state(), FlowState::SubmitRejected);
        assert!(session.is_enabled());

        session.acknowledge();
        assert_eq!(session.state(), FlowState::Capturing);
        let view = session.render().await;
        match view {
            RenderView::Form {
                latitude,
                longitude,
                ..
            } => {
                assert_eq!(latitude, "12.5");
                assert_eq!(longitude, "77.6");
            }
            other => panic!("expected form view, got {other:?}"),
        }
        assert_eq!(session.state(), FlowState::CapturedSuccess);
    }
}
