//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the engine to its observers:
//! - `trace` - Audit trail recorders (in-memory, tracing)

pub mod trace;

pub use trace::{InMemoryTraceRecorder, LogTraceObserver};
