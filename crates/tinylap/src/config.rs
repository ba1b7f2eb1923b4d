use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LinalgError;

/// Tuning knobs for the whole crate. Missing sections fall back to their
/// defaults when deserialized.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LinalgConfig {
    pub jacobi: JacobiConfig,
    pub inverse: InverseConfig,
}

/// Parameters of the one-sided Jacobi singular value solver.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct JacobiConfig {
    /// Relative threshold below which a column pair counts as orthogonal.
    pub tolerance: f64,
    /// A sweep past this count is a convergence failure.
    pub max_sweeps: usize,
}

impl Default for JacobiConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-14,
            max_sweeps: 100,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct InverseConfig {
    /// Pivots with a smaller magnitude make the matrix singular.
    pub singular_threshold: f64,
}

impl Default for InverseConfig {
    fn default() -> Self {
        Self {
            singular_threshold: 1e-16,
        }
    }
}

impl LinalgConfig {
    pub fn new(jacobi: JacobiConfig, inverse: InverseConfig) -> Self {
        Self { jacobi, inverse }
    }
}

/// Matrix norm selector for [`crate::ops::norm`].
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NormKind {
    /// Maximum absolute column sum.
    One,
    /// Frobenius norm, selected by order 2.
    #[default]
    Frobenius,
    /// Maximum absolute row sum.
    Inf,
}

impl NormKind {
    /// Select by numeric order: 1, 2 or +inf.
    pub fn from_order(order: f64) -> Result<Self, LinalgError> {
        if order == 1.0 {
            Ok(NormKind::One)
        } else if order == 2.0 {
            Ok(NormKind::Frobenius)
        } else if order == f64::INFINITY {
            Ok(NormKind::Inf)
        } else {
            Err(LinalgError::Unsupported("norm order must be 1, 2 or inf"))
        }
    }
}

impl FromStr for NormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "one" | "l1" => Ok(NormKind::One),
            "2" | "two" | "fro" | "frobenius" => Ok(NormKind::Frobenius),
            "inf" | "infinity" | "max" => Ok(NormKind::Inf),
            _ => Err(format!(
                "Unknown norm kind: {}. Expected one of 1, 2 (frobenius) or inf",
                s
            )),
        }
    }
}
