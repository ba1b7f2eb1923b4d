//! One-sided Jacobi singular value decomposition.
//!
//! Columns of the input are rotated pairwise until they are mutually
//! orthogonal; the singular values are then the column norms. Optionally the
//! rotations are accumulated into a square matrix of right singular vectors.
use log::{debug, trace};

use crate::alias;
use crate::config::{JacobiConfig, NormKind};
use crate::error::{LinalgError, Result};
use crate::math::{Dense, Matrix, MatrixMut, Vector};
use crate::ops;

/// Outcome of a Jacobi run.
#[derive(Debug, Clone)]
pub struct JacobiReport {
    /// Singular values in ascending order.
    pub values: Vector,
    /// `columns[k]` is the column of the rotated matrix (and of the
    /// accumulator) that `values[k]` was taken from.
    pub columns: Vec<usize>,
    pub sweeps: usize,
    pub rotations: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JacobiSolver {
    config: JacobiConfig,
}

impl JacobiSolver {
    pub fn new(config: JacobiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JacobiConfig {
        &self.config
    }

    /// Rotate the columns of `a` in place until orthogonal and report the
    /// singular values.
    ///
    /// When `accum` is given it is reset to the identity of size `a.ncols()`
    /// (allocating it if uninitialized) and receives the same rotations, so
    /// that on return it holds the right singular vectors column-wise.
    pub fn solve(&self, a: &mut Dense, mut accum: Option<&mut Dense>) -> Result<JacobiReport> {
        let (n, m) = a.dims();

        if let Some(v) = accum.as_deref_mut() {
            if v.is_initialized() && alias::aliased(&v.to_matrix(), &a.to_matrix()) {
                debug!("jacobi accumulator shares storage with the input");
                return Err(LinalgError::Aliased);
            }
            ops::ensure_shape(v, (m, m))?;
            ops::copy_into(v, crate::math::identity(m))?;
        }

        let mut sigma: Vec<f64> = (0..m)
            .map(|j| (0..n).map(|i| a.load(i, j).powi(2)).sum())
            .collect();
        let tolerance = self.config.tolerance;
        let tol = tolerance * ops::norm(Matrix::from(&*a), NormKind::Frobenius);

        let mut sweeps = 0;
        let mut rotations = 0;
        loop {
            if sweeps >= self.config.max_sweeps {
                debug!(
                    "jacobi gave up after {} sweeps ({} rotations)",
                    sweeps, rotations
                );
                return Err(LinalgError::NoConvergence { sweeps });
            }
            sweeps += 1;

            let mut count = 0;
            for p in 0..m {
                for q in (p + 1)..m {
                    let beta: f64 = (0..n).map(|i| a.load(i, p) * a.load(i, q)).sum();
                    let prod = sigma[p] * sigma[q];
                    if prod <= tol || beta == 0.0 || beta.abs() < tolerance * prod.sqrt() {
                        continue;
                    }

                    let tau = (sigma[q] - sigma[p]) / (2.0 * beta);
                    let sign = if tau >= 0.0 { 1.0 } else { -1.0 };
                    let t = sign / (tau.abs() + (1.0 + tau * tau).sqrt());
                    let c = 1.0 / (1.0 + t * t).sqrt();
                    let s = t * c;

                    rotate(a, p, q, c, s);
                    if let Some(v) = accum.as_deref() {
                        rotate(v, p, q, c, s);
                    }
                    sigma[p] -= beta * t;
                    sigma[q] += beta * t;
                    count += 1;
                }
            }
            rotations += count;
            trace!("jacobi sweep {}: {} rotations", sweeps, count);
            if count == 0 {
                break;
            }
        }
        debug!(
            "jacobi converged on ({}, {}) after {} sweeps, {} rotations",
            n, m, sweeps, rotations
        );

        let mut columns: Vec<usize> = (0..m).collect();
        columns.sort_by(|&x, &y| sigma[x].total_cmp(&sigma[y]));
        let values = columns
            .iter()
            .map(|&j| if sigma[j] <= 0.0 { 0.0 } else { sigma[j].sqrt() })
            .collect();

        Ok(JacobiReport {
            values,
            columns,
            sweeps,
            rotations,
        })
    }
}

/// Plane rotation of columns `p` and `q` using their values before the call.
fn rotate(m: &Dense, p: usize, q: usize, c: f64, s: f64) {
    for i in 0..m.nrows() {
        let xp = m.load(i, p);
        let xq = m.load(i, q);
        m.store(i, p, c * xp - s * xq);
        m.store(i, q, s * xp + c * xq);
    }
}

/// Singular values of `a` in ascending order, computed with default
/// settings on a private copy. `a` is left untouched.
pub fn jacobi_singular_values(a: impl Into<Matrix>) -> Result<Vector> {
    let mut work = ops::copy(a)?;
    JacobiSolver::default()
        .solve(&mut work, None)
        .map(|report| report.values)
}
