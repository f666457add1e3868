//! Optimality principles.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{resolve_identifier, ConfigurationError};

/// Rule deciding which alternatives are optimal for a decision matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimalityPrinciple {
    IdealPoint,
    AntiIdealPoint,
    Pareto,
    Equal,
    QuasiEqual,
    AbsoluteConcession,
    RelativeConcession,
    MainCriterion,
    LexEqual,
    LexQuasiEqual,
}

static PRINCIPLES: Lazy<HashMap<&'static str, OptimalityPrinciple>> = Lazy::new(|| {
    OptimalityPrinciple::all()
        .iter()
        .map(|p| (p.as_str(), *p))
        .collect()
});

impl OptimalityPrinciple {
    /// All ten principles in consensus-table order.
    pub fn all() -> &'static [OptimalityPrinciple] {
        &[
            OptimalityPrinciple::IdealPoint,
            OptimalityPrinciple::AntiIdealPoint,
            OptimalityPrinciple::Pareto,
            OptimalityPrinciple::Equal,
            OptimalityPrinciple::QuasiEqual,
            OptimalityPrinciple::AbsoluteConcession,
            OptimalityPrinciple::RelativeConcession,
            OptimalityPrinciple::MainCriterion,
            OptimalityPrinciple::LexEqual,
            OptimalityPrinciple::LexQuasiEqual,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimalityPrinciple::IdealPoint => "ideal-point",
            OptimalityPrinciple::AntiIdealPoint => "anti-ideal-point",
            OptimalityPrinciple::Pareto => "pareto",
            OptimalityPrinciple::Equal => "equal",
            OptimalityPrinciple::QuasiEqual => "quasi-equal",
            OptimalityPrinciple::AbsoluteConcession => "absolute-concession",
            OptimalityPrinciple::RelativeConcession => "relative-concession",
            OptimalityPrinciple::MainCriterion => "main-criterion",
            OptimalityPrinciple::LexEqual => "lex-equal",
            OptimalityPrinciple::LexQuasiEqual => "lex-quasi-equal",
        }
    }

    /// Whether the principle can drive constrained goal/restriction selection.
    pub fn supports_constraints(&self) -> bool {
        matches!(
            self,
            OptimalityPrinciple::IdealPoint
                | OptimalityPrinciple::AntiIdealPoint
                | OptimalityPrinciple::AbsoluteConcession
                | OptimalityPrinciple::RelativeConcession
        )
    }
}

impl fmt::Display for OptimalityPrinciple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptimalityPrinciple {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&PRINCIPLES, "optimality principle", s)
    }
}
