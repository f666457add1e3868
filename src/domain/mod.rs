//! Domain layer containing the analysis core.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (decision matrix, IDs, numeric helpers, errors)
//! - `aggregation` - Expert panel aggregation and concordance
//! - `scaling` - Direction change and normalization
//! - `uncertainty` - Resolution of states-of-nature tables
//! - `optimality` - The ten optimality principles, consensus and constrained mode
//! - `fuzzy` - Fuzzy evaluation and rule inference

pub mod aggregation;
pub mod foundation;
pub mod fuzzy;
pub mod optimality;
pub mod scaling;
pub mod uncertainty;
