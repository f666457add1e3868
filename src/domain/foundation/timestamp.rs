//! Timestamp value object for audit trail entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC instant at which a trace entry was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Milliseconds from `earlier` to this instant; negative if `earlier` is later.
    pub fn millis_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_milliseconds()
    }
}
