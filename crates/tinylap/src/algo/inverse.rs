use log::{debug, trace};

use crate::alias;
use crate::config::InverseConfig;
use crate::error::{LinalgError, Result};
use crate::math::{Dense, Matrix, MatrixMut};

/// Gauss-Jordan inversion of square matrices on an augmented `[A | I]`
/// working buffer.
///
/// Pivoting is limited to one bottom-up pass of adjacent row swaps on the
/// first column, so some invertible matrices with small leading entries are
/// reported singular.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussJordan {
    config: InverseConfig,
}

impl GaussJordan {
    pub fn new(config: InverseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InverseConfig {
        &self.config
    }

    pub fn invert(&self, a: impl Into<Matrix>) -> Result<Dense> {
        let mut out = Dense::default();
        self.invert_into(&mut out, a, None)?;
        Ok(out)
    }

    /// Invert `a` into `out`.
    ///
    /// `scratch` is reused as the `n x 2n` working buffer when it has at least
    /// `n` rows and `2n` columns; only its top-left `n x 2n` block is written
    /// and its shape is left alone. A smaller or uninitialized scratch is
    /// replaced with a fresh allocation the caller can keep for the next call.
    /// `out` is only written once the inversion succeeded.
    pub fn invert_into(
        &self,
        out: &mut Dense,
        a: impl Into<Matrix>,
        scratch: Option<&mut Dense>,
    ) -> Result<()> {
        let a = a.into();
        let (n, cols) = a.dims();
        if n != cols {
            return Err(LinalgError::Dimension(format!(
                "cannot invert non-square ({}, {}) matrix",
                n, cols
            )));
        }

        let out_m = out.is_initialized().then(|| out.to_matrix());
        if let Some(o) = &out_m {
            if alias::aliased(o, &a) {
                debug!("inverse output shares storage with the input");
                return Err(LinalgError::Aliased);
            }
        }
        if let Some(s) = scratch.as_deref() {
            if s.is_initialized() {
                let s_m = s.to_matrix();
                let hits_out = out_m.as_ref().map_or(false, |o| alias::aliased(o, &s_m));
                if alias::aliased(&s_m, &a) || hits_out {
                    debug!("inverse scratch shares storage with the input or output");
                    return Err(LinalgError::Aliased);
                }
            }
        }
        if out.is_initialized() && out.dims() != (n, n) {
            return Err(LinalgError::shape_mismatch((n, n), out.dims()));
        }

        let mut work = match scratch {
            Some(s) if s.is_initialized() && s.dims() == (n, 2 * n) => s.clone(),
            // top-left n x 2n block of a larger scratch
            Some(s) if n > 0 && s.is_initialized() && s.nrows() >= n && s.ncols() >= 2 * n => {
                s.sub_block(0, n, 0, 2 * n)?
            }
            Some(s) => {
                *s = Dense::zeros(n, 2 * n);
                s.clone()
            }
            None => Dense::zeros(n, 2 * n),
        };

        for i in 0..n {
            for j in 0..n {
                work.store(i, j, a.load(i, j));
                work.store(i, n + j, if i == j { 1.0 } else { 0.0 });
            }
        }

        for i in (1..n).rev() {
            if work.load(i - 1, 0).abs() < work.load(i, 0).abs() {
                trace!("gauss-jordan swapping rows {} and {}", i - 1, i);
                work.swap_rows(i - 1, i)?;
            }
        }

        let threshold = self.config.singular_threshold;
        for i in 0..n {
            let pivot = work.load(i, i);
            if pivot.abs() < threshold {
                debug!("gauss-jordan pivot {} at row {} below {}", pivot, i, threshold);
                return Err(LinalgError::Singular { row: i, pivot });
            }
            for j in (0..n).filter(|&j| j != i) {
                let factor = work.load(j, i) / pivot;
                for k in 0..2 * n {
                    work.store(j, k, work.load(j, k) - factor * work.load(i, k));
                }
            }
        }

        for i in 0..n {
            let d = work.load(i, i);
            if d.abs() < threshold {
                debug!("gauss-jordan diagonal {} at row {} below {}", d, i, threshold);
                return Err(LinalgError::Singular { row: i, pivot: d });
            }
            for k in 0..2 * n {
                work.store(i, k, work.load(i, k) / d);
            }
        }

        if !out.is_initialized() {
            *out = Dense::zeros(n, n);
        }
        for i in 0..n {
            for j in 0..n {
                out.store(i, j, work.load(i, n + j));
            }
        }
        Ok(())
    }
}

/// Inverse of a square matrix with the default singular threshold.
pub fn invert_square(a: impl Into<Matrix>) -> Result<Dense> {
    GaussJordan::default().invert(a)
}

pub fn invert_square_into(
    out: &mut Dense,
    a: impl Into<Matrix>,
    scratch: Option<&mut Dense>,
) -> Result<()> {
    GaussJordan::default().invert_into(out, a, scratch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn two_by_two() {
        let a = Dense::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let inv = invert_square(&a).unwrap();
        assert!(close(&inv.to_vec(), &[-2.0, 1.0, 1.5, -0.5]));
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn singular_is_reported() {
        let a = Dense::new(2, 2, vec![1.0, 2.0, 2.0, 4.0]).unwrap();
        let err = invert_square(&a).unwrap_err();
        assert!(matches!(err, LinalgError::Singular { row: 1, .. }));
    }

    #[test]
    fn non_square_is_dimension_error() {
        let err = invert_square(Dense::zeros(2, 3)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Dimension);
    }

    #[test]
    fn scratch_is_replaced_when_shape_is_wrong() {
        let a = Dense::new(2, 2, vec![4.0, 7.0, 2.0, 6.0]).unwrap();
        let mut out = Dense::default();
        let mut scratch = Dense::zeros(1, 1);
        invert_square_into(&mut out, &a, Some(&mut scratch)).unwrap();
        assert_eq!(scratch.dims(), (2, 4));
        assert!(close(&out.to_vec(), &[0.6, -0.7, -0.2, 0.4]));
    }

    #[test]
    fn output_untouched_on_failure() {
        let a = Dense::new(2, 2, vec![1.0, 2.0, 2.0, 4.0]).unwrap();
        let mut out = Dense::new(2, 2, vec![9.0; 4]).unwrap();
        assert!(invert_square_into(&mut out, &a, None).is_err());
        assert_eq!(out.to_vec(), vec![9.0; 4]);
    }

    #[test]
    fn scratch_aliasing_input_is_rejected() {
        let a = Dense::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut out = Dense::default();
        let mut scratch = a.clone();
        let err = invert_square_into(&mut out, &a, Some(&mut scratch)).unwrap_err();
        assert_eq!(err, LinalgError::Aliased);
    }
}
