//! Prior-information regimes and the resolution methods legal under each.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{resolve_identifier, ConfigurationError};

/// What is known about the states of nature for a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorInformationRegime {
    /// State probabilities are known.
    Certainty,
    /// Nothing is known about the states.
    Ignorance,
    /// Probabilities are known but the decision maker weighs risk explicitly.
    Risk,
}

/// Rule reducing a state table to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMethod {
    BayesLaplace,
    MinMse,
    MaxProbability,
    Modal,
    MinEntropy,
    Hermeyer,
    Wald,
    MinimaxRegret,
    Hurwicz,
    HodgesLehmann,
    Universal,
}

static REGIMES: Lazy<HashMap<&'static str, PriorInformationRegime>> = Lazy::new(|| {
    HashMap::from([
        ("certainty", PriorInformationRegime::Certainty),
        ("ignorance", PriorInformationRegime::Ignorance),
        ("risk", PriorInformationRegime::Risk),
    ])
});

static RESOLUTION_METHODS: Lazy<HashMap<&'static str, ResolutionMethod>> = Lazy::new(|| {
    HashMap::from([
        ("bayes-laplace", ResolutionMethod::BayesLaplace),
        ("min-mse", ResolutionMethod::MinMse),
        ("max-probability", ResolutionMethod::MaxProbability),
        ("modal", ResolutionMethod::Modal),
        ("min-entropy", ResolutionMethod::MinEntropy),
        ("hermeyer", ResolutionMethod::Hermeyer),
        ("wald", ResolutionMethod::Wald),
        ("minimax-regret", ResolutionMethod::MinimaxRegret),
        ("savage", ResolutionMethod::MinimaxRegret),
        ("hurwicz", ResolutionMethod::Hurwicz),
        ("hodges-lehmann", ResolutionMethod::HodgesLehmann),
        ("hodges-lehman", ResolutionMethod::HodgesLehmann),
        ("universal", ResolutionMethod::Universal),
    ])
});

impl PriorInformationRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorInformationRegime::Certainty => "certainty",
            PriorInformationRegime::Ignorance => "ignorance",
            PriorInformationRegime::Risk => "risk",
        }
    }

    /// Methods that may be used under this regime.
    pub fn allowed_methods(&self) -> &'static [ResolutionMethod] {
        match self {
            PriorInformationRegime::Certainty => &[
                ResolutionMethod::BayesLaplace,
                ResolutionMethod::MinMse,
                ResolutionMethod::MaxProbability,
                ResolutionMethod::Modal,
                ResolutionMethod::MinEntropy,
                ResolutionMethod::Hermeyer,
                ResolutionMethod::Universal,
            ],
            PriorInformationRegime::Ignorance => &[
                ResolutionMethod::Wald,
                ResolutionMethod::MinimaxRegret,
                ResolutionMethod::Universal,
            ],
            PriorInformationRegime::Risk => &[
                ResolutionMethod::Hurwicz,
                ResolutionMethod::HodgesLehmann,
                ResolutionMethod::Universal,
            ],
        }
    }

    /// Fails with `ConfigurationError::MethodNotAllowed` if `method` is not legal here.
    pub fn ensure_allows(&self, method: ResolutionMethod) -> Result<(), ConfigurationError> {
        if self.allowed_methods().contains(&method) {
            Ok(())
        } else {
            Err(ConfigurationError::MethodNotAllowed {
                method: method.to_string(),
                regime: self.to_string(),
            })
        }
    }

    /// Whether state probabilities are used under this regime.
    pub fn uses_probabilities(&self) -> bool {
        !matches!(self, PriorInformationRegime::Ignorance)
    }
}

impl ResolutionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMethod::BayesLaplace => "bayes-laplace",
            ResolutionMethod::MinMse => "min-mse",
            ResolutionMethod::MaxProbability => "max-probability",
            ResolutionMethod::Modal => "modal",
            ResolutionMethod::MinEntropy => "min-entropy",
            ResolutionMethod::Hermeyer => "hermeyer",
            ResolutionMethod::Wald => "wald",
            ResolutionMethod::MinimaxRegret => "minimax-regret",
            ResolutionMethod::Hurwicz => "hurwicz",
            ResolutionMethod::HodgesLehmann => "hodges-lehmann",
            ResolutionMethod::Universal => "universal",
        }
    }
}

impl fmt::Display for PriorInformationRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriorInformationRegime {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&REGIMES, "regime", s)
    }
}

impl FromStr for ResolutionMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&RESOLUTION_METHODS, "resolution method", s)
    }
}
