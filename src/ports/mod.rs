//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application handlers and the outside world. Adapters implement these ports.
//!
//! - `TraceObserver` - Receives the audit trail of every analysis run

mod trace_observer;

pub use trace_observer::{TraceEntry, TraceObserver};
