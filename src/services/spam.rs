use crate::domain::submission::SubmissionRecord;
use std::time::{SystemTime, UNIX_EPOCH};

/// Submissions completed faster than this are treated as automated.
pub const MIN_FILL_TIME_MILLIS: f64 = 3000.0;

/// Current wall-clock time in epoch milliseconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn epoch_millis_now() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0.0, |elapsed| elapsed.as_millis() as f64)
}

/// Decides whether a submission looks human. Pure; no side effects.
///
/// A submission is rejected when the honeypot field contains text, or
/// when the form was submitted less than [`MIN_FILL_TIME_MILLIS`]
/// after it was rendered.
///
/// An absent `startTime` evaluates to 0, so the elapsed-time check can
/// never block it and only the honeypot applies. That hole is known
/// and deliberately left as-is; clients that omit the field would
/// otherwise all be rejected.
#[must_use]
pub fn is_human(record: &SubmissionRecord, now_millis: f64) -> bool {
    if !record.company.trim().is_empty() {
        return false;
    }

    if let Some(start) = record.start_time.epoch_millis() {
        if now_millis - start < MIN_FILL_TIME_MILLIS {
            return false;
        }
    }

    true
}
