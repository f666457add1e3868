//! TraceObserver port - Interface for receiving the audit trail of a run.
//!
//! Handlers emit one entry per pipeline stage and subject. Pure domain
//! computations never see this port; they return typed traces that the
//! handlers serialize into entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RunId, Timestamp};

/// One audit record: which run, which stage, which criterion or principle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub run_id: RunId,
    pub stage: String,
    pub subject: String,
    pub timestamp: Timestamp,
    /// Serialized typed trace of the stage.
    pub payload: serde_json::Value,
}

impl TraceEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(
        run_id: RunId,
        stage: impl Into<String>,
        subject: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            run_id,
            stage: stage.into(),
            subject: subject.into(),
            timestamp: Timestamp::now(),
            payload,
        }
    }
}

/// Port for receiving trace entries.
///
/// Implementations must not fail the run: recording is best-effort and
/// has no return value.
pub trait TraceObserver: Send + Sync {
    /// Record a single entry.
    fn record(&self, entry: TraceEntry);
}
