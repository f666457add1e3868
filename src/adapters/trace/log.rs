//! Trace observer that forwards entries to `tracing`.

use tracing::debug;

use crate::ports::{TraceEntry, TraceObserver};

/// Emits every entry as a debug event with the payload as JSON text.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTraceObserver;

impl LogTraceObserver {
    pub fn new() -> Self {
        Self
    }
}

impl TraceObserver for LogTraceObserver {
    fn record(&self, entry: TraceEntry) {
        debug!(
            run_id = %entry.run_id,
            stage = %entry.stage,
            subject = %entry.subject,
            payload = %entry.payload,
            "trace entry"
        );
    }
}
