/*
[INPUT]:  Current FlowState and FlowEvent
[OUTPUT]: Validated state transitions for the capture/submit flow
[POS]:    Session domain logic - state machine for one form session
[UPDATE]: When flow states or transition rules change
*/

use thiserror::Error;

/// Where a form session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Gated,
    Capturing,
    CapturedSuccess,
    CapturedFailure,
    SubmitAccepted,
    SubmitRejected,
}

/// Events that can move a session between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Acknowledge,
    BeginCapture,
    Resolve { success: bool },
    Submit,
}

/// Errors occurring during state transitions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("Invalid transition: {from:?} -> {event:?}")]
    InvalidTransition { from: FlowState, event: FlowEvent },
}

impl FlowState {
    /// Whether the form is reachable from this state
    pub fn is_open(self) -> bool {
        !matches!(self, FlowState::Gated)
    }

    /// A rejected submission behaves as a failed capture for outgoing edges
    fn normalized(self) -> Self {
        match self {
            FlowState::SubmitRejected => FlowState::CapturedFailure,
            other => other,
        }
    }

    /// Check whether `event` is allowed from this state
    pub fn can_transition(self, event: FlowEvent) -> bool {
        self.next(event).is_ok()
    }

    /// Compute the state reached by applying `event`
    pub fn next(self, event: FlowEvent) -> Result<FlowState, FlowError> {
        let next = match (self.normalized(), event) {
            (FlowState::Gated, FlowEvent::Acknowledge) => FlowState::Capturing,
            (FlowState::Capturing, FlowEvent::Resolve { success: true }) => {
                FlowState::CapturedSuccess
            }
            (FlowState::Capturing, FlowEvent::Resolve { success: false }) => {
                FlowState::CapturedFailure
            }
            (FlowState::CapturedSuccess, FlowEvent::Submit) => FlowState::SubmitAccepted,
            (FlowState::CapturedFailure, FlowEvent::Submit) => FlowState::SubmitRejected,
            (FlowState::CapturedFailure, FlowEvent::Acknowledge) => FlowState::Capturing,
            (
                FlowState::CapturedSuccess | FlowState::CapturedFailure | FlowState::SubmitAccepted,
                FlowEvent::BeginCapture,
            ) => FlowState::Capturing,
            _ => {
                return Err(FlowError::InvalidTransition { from: self, event });
            }
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path() {
        let state = FlowState::Gated;
        let state = state.next(FlowEvent::Acknowledge).unwrap();
        assert_eq!(state, FlowState::Capturing);
        let state = state.next(FlowEvent::Resolve { success: true }).unwrap();
        assert_eq!(state, FlowState::CapturedSuccess);
        let state = state.next(FlowEvent::Submit).unwrap();
        assert_eq!(state, FlowState::SubmitAccepted);
        // page stays live for further submissions
        let state = state.next(FlowEvent::BeginCapture).unwrap();
        assert_eq!(state, FlowState::Capturing);
    }

    #[test]
    fn test_failure_path_and_retry() {
        let state = FlowState::Capturing
            .next(FlowEvent::Resolve { success: false })
            .unwrap();
        assert_eq!(state, FlowState::CapturedFailure);

        let rejected = state.next(FlowEvent::Submit).unwrap();
        assert_eq!(rejected, FlowState::SubmitRejected);
        assert_eq!(
            rejected.next(FlowEvent::Submit).unwrap(),
            FlowState::SubmitRejected
        );
        assert_eq!(
            rejected.next(FlowEvent::Acknowledge).unwrap(),
            FlowState::Capturing
        );
        assert_eq!(
            rejected.next(FlowEvent::BeginCapture).unwrap(),
            FlowState::Capturing
        );
    }

    #[test]
    fn test_invalid_transitions() {
        let result = FlowState::Gated.next(FlowEvent::Submit);
        assert_eq!(
            result,
            Err(FlowError::InvalidTransition {
                from: FlowState::Gated,
                event: FlowEvent::Submit,
            })
        );
        assert!(!FlowState::Gated.can_transition(FlowEvent::BeginCapture));
        assert!(!FlowState::Capturing.can_transition(FlowEvent::Submit));
        assert!(!FlowState::CapturedSuccess.can_transition(FlowEvent::Acknowledge));
    }

    #[test]
    fn test_is_open() {
        assert!(!FlowState::Gated.is_open());
        assert!(FlowState::CapturedFailure.is_open());
    }
}
