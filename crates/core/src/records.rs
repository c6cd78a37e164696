//! Record ingestion rules and review-queue filter handling.

use std::collections::HashSet;

use crate::error::CoreError;

/// Maximum number of records accepted in one ingestion request.
pub const MAX_INGEST_BATCH: usize = 1_000;

/// Validate the identifying fields of a record about to be ingested and
/// return the trimmed `(key, exam_uid)` to persist.
///
/// Exam filters are matched after trimming, so stored values must be trimmed
/// too or a padded exam uid could never be selected.
pub fn validate_record_identity(
    key: &str,
    exam_uid: &str,
    position: i32,
) -> Result<(String, String), CoreError> {
    let key = key.trim();
    let exam_uid = exam_uid.trim();
    if key.is_empty() {
        return Err(CoreError::Validation("record key must not be blank".to_string()));
    }
    if exam_uid.is_empty() {
        return Err(CoreError::Validation(format!(
            "record '{key}' has a blank exam_uid"
        )));
    }
    if position < 0 {
        return Err(CoreError::Validation(format!(
            "record '{key}' has negative position {position}"
        )));
    }
    Ok((key.to_string(), exam_uid.to_string()))
}

/// Validate the size of an ingestion batch.
pub fn validate_batch_size(len: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("records must not be empty".to_string()));
    }
    if len > MAX_INGEST_BATCH {
        return Err(CoreError::Validation(format!(
            "at most {MAX_INGEST_BATCH} records may be ingested per request, got {len}"
        )));
    }
    Ok(())
}

/// Turn the raw `exams[]` query values into an exam filter.
///
/// Values are trimmed, blanks dropped and duplicates removed (first
/// occurrence wins). `None` means "no filter": every exam is eligible.
pub fn normalize_exam_filter(raw: Vec<String>) -> Option<Vec<String>> {
    let mut seen = HashSet::new();
    let exams: Vec<String> = raw
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .filter(|e| seen.insert(e.clone()))
        .collect();

    if exams.is_empty() {
        None
    } else {
        Some(exams)
    }
}
