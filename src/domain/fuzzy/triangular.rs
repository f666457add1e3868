//! Triangular fuzzy numbers.

use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::domain::foundation::ValidationError;

/// A fuzzy quantity `(start, peak, end)` with `start <= peak <= end`.
///
/// Membership rises linearly from `start` to 1 at `peak` and falls back to 0
/// at `end`. A zero-width side is a vertical edge with membership 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTriangle")]
pub struct TriangularFuzzyNumber {
    start: f64,
    peak: f64,
    end: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTriangle {
    Triple([f64; 3]),
    Named { start: f64, peak: f64, end: f64 },
}

impl TryFrom<RawTriangle> for TriangularFuzzyNumber {
    type Error = ValidationError;

    fn try_from(raw: RawTriangle) -> Result<Self, Self::Error> {
        match raw {
            RawTriangle::Triple([start, peak, end]) => Self::new(start, peak, end),
            RawTriangle::Named { start, peak, end } => Self::new(start, peak, end),
        }
    }
}

impl TriangularFuzzyNumber {
    /// Creates a validated triangle.
    ///
    /// # Errors
    /// - `ValidationError::NonFinite` for NaN or infinite vertices
    /// - `ValidationError::UnorderedTriangle` unless `start <= peak <= end`
    pub fn new(start: f64, peak: f64, end: f64) -> Result<Self, ValidationError> {
        for (i, v) in [start, peak, end].into_iter().enumerate() {
            if !v.is_finite() {
                return Err(ValidationError::non_finite("triangle", 0, i));
            }
        }
        if start > peak || peak > end {
            return Err(ValidationError::UnorderedTriangle { start, peak, end });
        }
        Ok(Self { start, peak, end })
    }

    /// A crisp value as a degenerate triangle.
    pub fn crisp(value: f64) -> Result<Self, ValidationError> {
        Self::new(value, value, value)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Vertex-wise product, as used for `compliance x importance`.
    ///
    /// # Errors
    /// - `ValidationError::UnorderedTriangle` when negative vertices break the ordering
    pub fn product(&self, other: &Self) -> Result<Self, ValidationError> {
        Self::new(
            self.start * other.start,
            self.peak * other.peak,
            self.end * other.end,
        )
    }

    /// Degree of membership of `x`.
    pub fn membership(&self, x: f64) -> f64 {
        if x < self.start || x > self.end {
            0.0
        } else if x <= self.peak {
            if self.peak == self.start {
                1.0
            } else {
                (x - self.start) / (self.peak - self.start)
            }
        } else if self.end == self.peak {
            1.0
        } else {
            (self.end - x) / (self.end - self.peak)
        }
    }

    /// Area under the membership function.
    pub fn area(&self) -> f64 {
        (self.end - self.start) / 2.0
    }

    /// Area under the rising side.
    pub fn left_area(&self) -> f64 {
        (self.peak - self.start) / 2.0
    }

    /// First moments `(left, right)` of the two sides, `integral x * mu(x) dx`.
    pub fn moments(&self) -> (f64, f64) {
        let (s, p, e) = (self.start, self.peak, self.end);
        let left = (2.0 * p * p - p * s - s * s) / 6.0;
        let right = (e * e + e * p - 2.0 * p * p) / 6.0;
        (left, right)
    }

    /// Area under the membership function up to `x`.
    pub fn cumulative_area(&self, x: f64) -> f64 {
        let (s, p, e) = (self.start, self.peak, self.end);
        if x <= s {
            0.0
        } else if x <= p {
            (x - s).powi(2) / (2.0 * (p - s))
        } else if x < e {
            self.left_area() + ((e - p).powi(2) - (e - x).powi(2)) / (2.0 * (e - p))
        } else {
            self.area()
        }
    }
}

impl Add for TriangularFuzzyNumber {
    type Output = TriangularFuzzyNumber;

    fn add(self, other: Self) -> Self::Output {
        Self {
            start: self.start + other.start,
            peak: self.peak + other.peak,
            end: self.end + other.end,
        }
    }
}
