//! Error types for the analysis core.
//!
//! Three families mirror how a task can fail:
//! - `ConfigurationError` - the caller asked for something that does not exist
//!   or is not legal in the current context
//! - `ValidationError` - the input tables are malformed
//! - `NumericError` - a computation degenerated past every fallback
//!
//! `AnalysisError` unifies them and carries stage context for reporting.

use std::fmt;
use thiserror::Error;

/// Errors raised while constructing or checking input values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: String, name: String },

    #[error("Field '{field}' expected {expected} entries, got {actual}")]
    DimensionMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Field '{field}' has a non-finite value at ({row}, {column})")]
    NonFinite {
        field: String,
        row: usize,
        column: usize,
    },

    #[error("Probabilities must sum to 1, got {sum}")]
    ProbabilitiesDoNotSumToOne { sum: f64 },

    #[error("Probability for state '{state}' is negative: {value}")]
    NegativeProbability { state: String, value: f64 },

    #[error("Deviation table is not symmetric at ('{row}', '{column}')")]
    AsymmetricDeviationTable { row: String, column: String },

    #[error("Unknown {kind} '{name}'")]
    UnknownName { kind: String, name: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Triangular number requires start <= peak <= end, got ({start}, {peak}, {end})")]
    UnorderedTriangle { start: f64, peak: f64, end: f64 },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a duplicate name validation error.
    pub fn duplicate_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        ValidationError::DuplicateName {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a dimension mismatch validation error.
    pub fn dimension_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::DimensionMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a non-finite value validation error.
    pub fn non_finite(field: impl Into<String>, row: usize, column: usize) -> Self {
        ValidationError::NonFinite {
            field: field.into(),
            row,
            column,
        }
    }

    /// Creates an unknown name validation error.
    pub fn unknown_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        ValidationError::UnknownName {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }
}

/// Errors raised when a requested method, principle or regime cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Unknown {kind} '{name}'")]
    UnknownIdentifier { kind: String, name: String },

    #[error("Method '{method}' is not available under the '{regime}' regime")]
    MethodNotAllowed { method: String, regime: String },

    #[error("Main-criterion principle is inapplicable: criteria {tied:?} share the maximum weight")]
    MainCriterionInapplicable { tied: Vec<String> },

    #[error("Method '{method}' requires parameter '{parameter}'")]
    MissingParameter { method: String, parameter: String },

    #[error("Principle '{principle}' cannot be used in constrained mode")]
    UnsupportedConstrainedPrinciple { principle: String },

    #[error("Generalized ranking needs concordance above {threshold}, got {concordance}")]
    InsufficientConcordance { concordance: f64, threshold: f64 },
}

impl ConfigurationError {
    /// Creates an unknown identifier error.
    pub fn unknown(kind: impl Into<String>, name: impl Into<String>) -> Self {
        ConfigurationError::UnknownIdentifier {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a missing parameter error.
    pub fn missing_parameter(method: impl Into<String>, parameter: impl Into<String>) -> Self {
        ConfigurationError::MissingParameter {
            method: method.into(),
            parameter: parameter.into(),
        }
    }
}

/// Errors raised when a computation degenerates past its fallbacks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("Division by zero in {operation}")]
    ZeroDivision { operation: String },

    #[error("Non-finite result in {operation}")]
    NonFinite { operation: String },

    #[error("Quadrature did not reach tolerance {tolerance} within depth {max_depth}")]
    QuadratureDidNotConverge { tolerance: f64, max_depth: u32 },

    #[error("Root finder failed in {operation}: {reason}")]
    RootNotFound { operation: String, reason: String },
}

impl NumericError {
    /// Creates a zero division error.
    pub fn zero_division(operation: impl Into<String>) -> Self {
        NumericError::ZeroDivision {
            operation: operation.into(),
        }
    }

    /// Creates a non-finite result error.
    pub fn non_finite(operation: impl Into<String>) -> Self {
        NumericError::NonFinite {
            operation: operation.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigurationError,
    ValidationError,
    NumericError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NumericError => "NUMERIC_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Unified error for every analysis operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error("[{stage}] {subject}: {source}")]
    Stage {
        stage: String,
        subject: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Returns the category code, looking through stage context.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::Configuration(_) => ErrorCode::ConfigurationError,
            AnalysisError::Validation(_) => ErrorCode::ValidationError,
            AnalysisError::Numeric(_) => ErrorCode::NumericError,
            AnalysisError::Stage { source, .. } => source.code(),
        }
    }

    /// Attaches the pipeline stage and subject (criterion, principle) to the error.
    pub fn in_stage(self, stage: impl Into<String>, subject: impl Into<String>) -> Self {
        AnalysisError::Stage {
            stage: stage.into(),
            subject: subject.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error without stage context.
    pub fn root(&self) -> &AnalysisError {
        match self {
            AnalysisError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}
