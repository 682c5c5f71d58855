/*
[INPUT]:  Geolocation providers and their untyped payloads
[OUTPUT]: Provider trait, payload parser and timed capture with caching policy
[POS]:    Capture layer - the single suspension point of a form session
[UPDATE]: When adding providers or changing capture semantics
*/

mod capture;
mod http;
mod payload;
mod provider;

pub use capture::{CaptureOutcome, CapturePolicy, DEFAULT_CAPTURE_TIMEOUT, LocationCapture};
pub use http::{DEFAULT_LOOKUP_URL, HttpProvider, HttpProviderConfig};
pub use payload::{error_payload, parse_payload, success_payload};
pub use provider::{GeolocationProvider, ScriptedProvider, StaticProvider};
