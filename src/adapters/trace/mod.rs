//! Trace adapters - observers for the audit trail.
//!
//! - `InMemoryTraceRecorder` - Keeps entries for reports and tests
//! - `LogTraceObserver` - Forwards entries to the tracing subscriber

mod in_memory;
mod log;

pub use in_memory::InMemoryTraceRecorder;
pub use log::LogTraceObserver;
