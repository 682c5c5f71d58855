/*
[INPUT]:  FormFields and the latest CoordinateResult
[OUTPUT]: FormSubmission or SubmissionError
[POS]:    Submission gate - coordinates are the only hard requirement
[UPDATE]: When submission acceptance rules change
*/

use crate::error::SubmissionError;
use crate::types::{CoordinateResult, FormFields, FormSubmission};

/// Assemble a submission, accepting it only when coordinates were captured.
///
/// Text fields are never validated; empty answers are fine.
pub fn build_submission(
    fields: FormFields,
    result: &CoordinateResult,
) -> Result<FormSubmission, SubmissionError> {
    let coords = result
        .coordinates()
        .ok_or(SubmissionError::MissingCoordinates)?;

    Ok(FormSubmission {
        name: fields.name,
        role: fields.role,
        task: fields.task,
        notes: fields.notes,
        latitude: Some(coords.latitude),
        longitude: Some(coords.longitude),
    })
}
