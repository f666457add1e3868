//! Scaling Module - direction change and normalization.
//!
//! Both stages are shared by the certain and uncertain pipelines. They take a
//! matrix (or a raw block of state values) and return a new owned copy.
//!
//! # Components
//!
//! - `DirectionChanger` - negation or Savage transform of minimization criteria
//! - `Normalizer` - comparative, relative, natural and full rescaling plus the floor clamp

mod direction;
mod normalization;

pub use direction::{DirectionChange, DirectionChanger, DirectionPlan};
pub use normalization::{NormalizationMethod, NormalizationPlan, Normalizer};
