//! Trace emission helper shared by the handlers.

use serde::Serialize;
use tracing::warn;

use crate::domain::foundation::RunId;
use crate::ports::{TraceEntry, TraceObserver};

/// Serializes `payload` and hands it to the observer. A payload that
/// cannot be serialized is logged and skipped.
pub(crate) fn emit<T: Serialize>(
    observer: &dyn TraceObserver,
    run_id: RunId,
    stage: &str,
    subject: &str,
    payload: &T,
) {
    match serde_json::to_value(payload) {
        Ok(value) => observer.record(TraceEntry::new(run_id, stage, subject, value)),
        Err(error) => warn!(%run_id, stage, subject, %error, "trace payload not serializable"),
    }
}
