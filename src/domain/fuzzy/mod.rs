//! Fuzzy module - evaluation of alternatives described by fuzzy degrees.
//!
//! Independent of the decision-matrix pipeline. Supports non-additive and
//! additive aggregation of belonging degrees, additive aggregation of
//! linguistic labels with defuzzification, and Mamdani rule inference.

mod defuzzify;
mod evaluator;
mod inference;
mod quadrature;
mod scale;
mod triangular;

pub use defuzzify::{area_bisector, centroid, Defuzzification};
pub use evaluator::{
    AlternativeRating, FuzzyEvaluation, FuzzyEvaluator, FuzzyTask, FuzzyTaskKind, FuzzyTrace,
};
pub use inference::{firing_strength, FuzzyRule, Inference, RuleFiring};
pub use quadrature::{bisect, integrate, integrate_piecewise, NumericSettings};
pub use scale::LinguisticScale;
pub use triangular::TriangularFuzzyNumber;
