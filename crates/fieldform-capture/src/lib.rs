/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public field form capture crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod error;
pub mod flow;
pub mod gate;
pub mod geolocation;
pub mod session;
pub mod sink;
pub mod status;
pub mod submission;
pub mod types;

// Re-export commonly used error types
pub use error::{CaptureFailure, PersistError, SubmissionError};

// Re-export flow and session types
pub use flow::{FlowError, FlowEvent, FlowState};
pub use gate::PermissionGate;
pub use session::{FormSession, RenderView, SubmitOutcome};

// Re-export geolocation capture types
pub use geolocation::{
    CaptureOutcome,
    CapturePolicy,
    GeolocationProvider,
    HttpProvider,
    HttpProviderConfig,
    LocationCapture,
    ScriptedProvider,
    StaticProvider,
    parse_payload,
};

// Re-export sinks
pub use sink::{JsonFileSink, MemorySink, SubmissionSink};

pub use status::{StatusLevel, StatusMessage};
pub use submission::build_submission;

// Re-export all types
pub use types::*;
