//! Defuzzification of triangular fuzzy numbers.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::quadrature::{bisect, NumericSettings};
use super::triangular::TriangularFuzzyNumber;
use crate::domain::foundation::{resolve_identifier, ConfigurationError, NumericError};

/// How a fuzzy aggregate becomes a crisp score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Defuzzification {
    /// The triangle peak.
    Max,
    /// Center of gravity of the membership area.
    Centroid,
    /// Abscissa splitting the membership area in half.
    AreaBisector,
}

static DEFUZZIFICATIONS: Lazy<HashMap<&'static str, Defuzzification>> = Lazy::new(|| {
    HashMap::from([
        ("max", Defuzzification::Max),
        ("maximum", Defuzzification::Max),
        ("centroid", Defuzzification::Centroid),
        ("center-of-gravity", Defuzzification::Centroid),
        ("area-bisector", Defuzzification::AreaBisector),
        ("center-of-area", Defuzzification::AreaBisector),
    ])
});

impl Defuzzification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Defuzzification::Max => "max",
            Defuzzification::Centroid => "centroid",
            Defuzzification::AreaBisector => "area-bisector",
        }
    }

    /// Crisp value of `number`.
    ///
    /// # Errors
    /// - `NumericError::RootNotFound` if the area bisector does not converge
    pub fn apply(
        &self,
        number: &TriangularFuzzyNumber,
        settings: &NumericSettings,
    ) -> Result<f64, NumericError> {
        match self {
            Defuzzification::Max => Ok(number.peak()),
            Defuzzification::Centroid => Ok(centroid(number)),
            Defuzzification::AreaBisector => area_bisector(number, settings),
        }
    }
}

impl fmt::Display for Defuzzification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Defuzzification {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_identifier(&DEFUZZIFICATIONS, "defuzzification method", s)
    }
}

/// Closed-form centroid; a zero-width triangle is its peak.
pub fn centroid(number: &TriangularFuzzyNumber) -> f64 {
    let area = number.area();
    if area == 0.0 {
        return number.peak();
    }
    let (left, right) = number.moments();
    (left + right) / area
}

/// Root of `cumulative_area(x) = area / 2`, searched on the rising side when
/// it holds at least half the area and on the falling side otherwise.
pub fn area_bisector(
    number: &TriangularFuzzyNumber,
    settings: &NumericSettings,
) -> Result<f64, NumericError> {
    let half = number.area() / 2.0;
    if half == 0.0 {
        return Ok(number.peak());
    }
    let (lo, hi) = if number.left_area() >= half {
        (number.start(), number.peak())
    } else {
        (number.peak(), number.end())
    };
    bisect(
        &|x: f64| number.cumulative_area(x) - half,
        lo,
        hi,
        "area bisector",
        settings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(s: f64, p: f64, e: f64) -> TriangularFuzzyNumber {
        TriangularFuzzyNumber::new(s, p, e).unwrap()
    }

    #[test]
    fn centroid_of_symmetric_triangle_is_peak() {
        assert!((centroid(&tri(1.0, 2.0, 3.0)) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn centroid_is_mean_of_vertices() {
        assert!((centroid(&tri(0.0, 0.0, 3.0)) - 1.0).abs() < 1e-12);
        assert!((centroid(&tri(1.0, 4.0, 4.0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_triangle_defuzzifies_to_peak() {
        let point = tri(0.4, 0.4, 0.4);
        let settings = NumericSettings::default();
        for method in [
            Defuzzification::Max,
            Defuzzification::Centroid,
            Defuzzification::AreaBisector,
        ] {
            assert_eq!(method.apply(&point, &settings).unwrap(), 0.4);
        }
    }

    #[test]
    fn bisector_of_symmetric_triangle_is_peak() {
        let x = area_bisector(&tri(0.0, 1.0, 2.0), &NumericSettings::default()).unwrap();
        assert!((x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bisector_on_falling_side() {
        // right triangle (0, 0, 1): half area at 1 - sqrt(1/2)
        let x = area_bisector(&tri(0.0, 0.0, 1.0), &NumericSettings::default()).unwrap();
        assert!((x - (1.0 - 0.5f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn bisector_on_rising_side() {
        // (0, 1, 1): half area at sqrt(1/2)
        let x = area_bisector(&tri(0.0, 1.0, 1.0), &NumericSettings::default()).unwrap();
        assert!((x - 0.5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn max_is_peak() {
        let settings = NumericSettings::default();
        assert_eq!(Defuzzification::Max.apply(&tri(0.0, 0.3, 1.0), &settings).unwrap(), 0.3);
    }

    #[test]
    fn identifiers_accept_aliases() {
        assert_eq!("Center of Gravity".parse::<Defuzzification>().unwrap(), Defuzzification::Centroid);
        assert!(matches!(
            "mean-of-maxima".parse::<Defuzzification>(),
            Err(ConfigurationError::UnknownIdentifier { .. })
        ));
    }
}
