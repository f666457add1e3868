//! Deviation table - tolerated difference between every pair of criteria
//! for the quasi-equality principle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::numeric::is_close;
use crate::domain::foundation::{DecisionMatrix, ValidationError};

/// Square, symmetric table of non-negative tolerances indexed by criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDeviationTable")]
pub struct DeviationTable {
    criteria: Vec<String>,
    values: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawDeviationTable {
    criteria: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl TryFrom<RawDeviationTable> for DeviationTable {
    type Error = ValidationError;

    fn try_from(raw: RawDeviationTable) -> Result<Self, Self::Error> {
        DeviationTable::new(raw.criteria, raw.values)
    }
}

impl DeviationTable {
    /// Creates a validated table.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the table is not square over `criteria`
    /// - `NonFinite` / `OutOfRange` for NaN or negative tolerances
    /// - `AsymmetricDeviationTable` if `values[i][j] != values[j][i]`
    pub fn new(criteria: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let n = criteria.len();
        if values.len() != n {
            return Err(ValidationError::dimension_mismatch("deviation rows", n, values.len()));
        }
        for (i, row) in values.iter().enumerate() {
            if row.len() != n {
                return Err(ValidationError::dimension_mismatch(
                    format!("deviation row '{}'", criteria[i]),
                    n,
                    row.len(),
                ));
            }
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() {
                    return Err(ValidationError::non_finite("deviation table", i, j));
                }
                if v < 0.0 {
                    return Err(ValidationError::out_of_range(
                        format!("deviation ('{}', '{}')", criteria[i], criteria[j]),
                        0.0,
                        f64::INFINITY,
                        v,
                    ));
                }
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if !is_close(values[i][j], values[j][i]) {
                    return Err(ValidationError::AsymmetricDeviationTable {
                        row: criteria[i].clone(),
                        column: criteria[j].clone(),
                    });
                }
            }
        }

        Ok(Self { criteria, values })
    }

    /// Table of zero tolerances.
    pub fn zeros(criteria: &[String]) -> Self {
        let n = criteria.len();
        Self {
            criteria: criteria.to_vec(),
            values: vec![vec![0.0; n]; n],
        }
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Tolerances re-indexed to the matrix criteria order.
    ///
    /// # Errors
    /// - `UnknownName` if a matrix criterion is missing from the table
    pub fn aligned(&self, matrix: &DecisionMatrix) -> Result<Vec<Vec<f64>>, ValidationError> {
        let indices = matrix
            .criteria()
            .iter()
            .map(|name| {
                self.criteria
                    .iter()
                    .position(|c| c == name)
                    .ok_or_else(|| ValidationError::unknown_name("deviation criterion", name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(indices
            .iter()
            .map(|&i| indices.iter().map(|&j| self.values[i][j]).collect())
            .collect())
    }
}
