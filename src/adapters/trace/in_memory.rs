//! In-memory trace recorder.
//!
//! Collects every entry of a run so a report renderer or a test can read
//! the full audit trail afterwards.

use std::sync::{PoisonError, RwLock};

use crate::ports::{TraceEntry, TraceObserver};

/// Trace observer that keeps entries in memory.
///
/// # Example
///
/// ```ignore
/// let recorder = Arc::new(InMemoryTraceRecorder::new());
/// let handler = RankCertainAlternativesHandler::new(
///     recorder.clone(),
///     AggregationParams::default(),
///     concordance_threshold,
/// );
/// handler.handle(command)?;
///
/// assert!(recorder.has_stage("selection"));
/// ```
#[derive(Default)]
pub struct InMemoryTraceRecorder {
    entries: RwLock<Vec<TraceEntry>>,
}

impl InMemoryTraceRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded entries in arrival order.
    pub fn entries(&self) -> Vec<TraceEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns entries of one stage.
    pub fn entries_for_stage(&self, stage: &str) -> Vec<TraceEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.stage == stage)
            .collect()
    }

    /// Checks if any entry of the stage was recorded.
    pub fn has_stage(&self, stage: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.stage == stage)
    }

    /// Returns the number of recorded entries.
    pub fn entry_count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clears all recorded entries.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TraceObserver for InMemoryTraceRecorder {
    fn record(&self, entry: TraceEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RunId;
    use serde_json::json;

    fn entry(stage: &str, subject: &str) -> TraceEntry {
        TraceEntry::new(RunId::new(), stage, subject, json!({}))
    }

    #[test]
    fn records_entries_in_order() {
        let recorder = InMemoryTraceRecorder::new();
        recorder.record(entry("aggregation", "quality"));
        recorder.record(entry("selection", "pareto"));

        let entries = recorder.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].subject, "quality");
        assert_eq!(entries[1].subject, "pareto");
    }

    #[test]
    fn filters_by_stage() {
        let recorder = InMemoryTraceRecorder::new();
        recorder.record(entry("selection", "pareto"));
        recorder.record(entry("selection", "equal"));
        recorder.record(entry("normalization", "matrix"));

        assert_eq!(recorder.entries_for_stage("selection").len(), 2);
        assert!(recorder.has_stage("normalization"));
        assert!(!recorder.has_stage("resolution"));
    }

    #[test]
    fn clear_removes_everything() {
        let recorder = InMemoryTraceRecorder::new();
        recorder.record(entry("selection", "pareto"));
        recorder.clear();
        assert_eq!(recorder.entry_count(), 0);
    }
}
