/*
[INPUT]:  Capture payload shapes and questionnaire fields
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions shared by capture, session and sinks
[UPDATE]: When the captured data or the stored record shape changes
*/

pub mod coordinates;
pub mod submission;

pub use coordinates::*;
pub use submission::*;
