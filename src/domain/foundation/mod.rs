//! Foundation module - Shared domain primitives.
//!
//! Contains the decision matrix, identifiers, numeric helpers and the error
//! taxonomy that form the vocabulary of the analysis core.

mod errors;
mod identifier;
mod ids;
mod matrix;
pub mod numeric;
mod timestamp;

pub use errors::{AnalysisError, ConfigurationError, ErrorCode, NumericError, ValidationError};
pub use identifier::{canonical_identifier, resolve_identifier};
pub use ids::RunId;
pub use matrix::{DecisionMatrix, DecisionMatrixBuilder};
pub use timestamp::Timestamp;
