/*
[INPUT]:  Form session, submission store, log buffer
[OUTPUT]: AppState helpers for gate, capture and submit in the TUI
[POS]:    TUI app state
[UPDATE]: When adding screens or changing how capture results are shown
[UPDATE]: 2026-10-18 Show retry hint under failed captures
*/

use std::sync::Arc;

use fieldform_capture::{
    FormSession, JsonFileSink, PermissionGate, RenderView, StatusMessage, SubmitOutcome,
};
use tracing::info;

use super::ui::FieldForm;
use fieldform_app::logging::LogBufferHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Form,
    Logs,
}

pub(super) struct AppState {
    pub(super) session: FormSession,
    pub(super) sink: Arc<JsonFileSink>,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) form: FieldForm,
    pub(super) capture_messages: Vec<StatusMessage>,
    pub(super) submit_messages: Vec<StatusMessage>,
    /// Set when the next loop iteration must run a capture
    pub(super) pending_capture: bool,
    pub(super) current_tab: Tab,
    pub(super) status_message: String,
}

impl AppState {
    pub(super) fn new(
        session: FormSession,
        sink: Arc<JsonFileSink>,
        log_buffer: LogBufferHandle,
    ) -> Self {
        Self {
            session,
            sink,
            log_buffer,
            form: FieldForm::new(),
            capture_messages: vec![StatusMessage::gate_warning()],
            submit_messages: Vec::new(),
            pending_capture: false,
            current_tab: Tab::Form,
            status_message: "Waiting for location".to_string(),
        }
    }

    pub(super) fn is_gated(&self) -> bool {
        !self.session.is_enabled()
    }

    pub(super) fn acknowledge(&mut self) {
        self.session.acknowledge();
        self.pending_capture = true;
        self.status_message = PermissionGate::ACKNOWLEDGE_LABEL.to_string();
    }

    pub(super) fn retry_capture(&mut self) {
        self.session.acknowledge();
        self.session.request_recapture();
        self.submit_messages.clear();
        self.pending_capture = true;
        self.status_message = "Retrying location".to_string();
    }

    pub(super) async fn run_capture(&mut self) {
        self.pending_capture = false;
        let view = self.session.render().await;
        self.apply_view(view);
    }

    fn apply_view(&mut self, view: RenderView) {
        self.capture_messages = view.messages().to_vec();
        if let RenderView::Form {
            latitude,
            longitude,
            result,
            ..
        } = view
        {
            self.status_message = if result.is_success() {
                "Location captured".to_string()
            } else {
                "Location unavailable".to_string()
            };
            if let Some(hint) = StatusMessage::capture_hint(&result) {
                self.capture_messages.push(hint);
            }
            self.form.set_coordinates(latitude, longitude);
        }
    }

    pub(super) async fn submit(&mut self) {
        let fields = self.form.answers();
        let outcome = self.session.submit(fields, self.sink.as_ref()).await;
        self.submit_messages = outcome.messages().to_vec();
        match outcome {
            SubmitOutcome::Accepted { persisted, .. } => {
                info!(session_id = %self.session.id(), persisted, "tui submission accepted");
                self.status_message = if persisted {
                    format!("Saved to {}", self.sink.path().display())
                } else {
                    "Submitted, not saved".to_string()
                };
                self.form.clear_answers();
                // next record gets a fresh render cycle
                self.pending_capture = true;
            }
            SubmitOutcome::Rejected { .. } => {
                self.status_message = "Submission rejected".to_string();
            }
        }
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Form => Tab::Logs,
            Tab::Logs => Tab::Form,
        };
    }
}
