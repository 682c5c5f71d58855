/*
[INPUT]:  Public API exports for fieldform-app crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point shared by the binary and tests
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod logging;
pub mod setup;

// Re-export main types for convenience
pub use config::AppConfig;
pub use setup::{build_capture, open_sink};
