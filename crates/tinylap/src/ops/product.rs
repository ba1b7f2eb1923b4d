use crate::error::{LinalgError, Result};
use crate::math::{Dense, Matrix, MatrixMut, Vector};
use crate::ops::{ensure_shape, reject_aliasing};

/// Matrix product `c = a b` for `a` of shape `(n, m)` and `b` of shape
/// `(m, p)`.
///
/// Partial sums read cells of `a` and `b` while `c` is being written, so any
/// storage shared between `c` and an input is rejected, even `c == a`.
pub fn mul_into<O: MatrixMut>(c: &mut O, a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<()> {
    let a = a.into();
    let b = b.into();
    reject_aliasing(c, &[&a, &b], false)?;

    let (n, m) = a.dims();
    let (mb, p) = b.dims();
    if m != mb {
        return Err(LinalgError::Dimension(format!(
            "cannot multiply ({}, {}) by ({}, {})",
            n, m, mb, p
        )));
    }
    ensure_shape(c, (n, p))?;

    for i in 0..n {
        for j in 0..p {
            let mut acc = 0.0;
            for k in 0..m {
                acc += a.load(i, k) * b.load(k, j);
            }
            c.store(i, j, acc);
        }
    }
    Ok(())
}

pub fn mul(a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<Dense> {
    let mut c = Dense::default();
    mul_into(&mut c, a, b)?;
    Ok(c)
}

/// Matrix-vector product `a b`.
pub fn mul_vec(a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<Vector> {
    let mut v = Vector::default();
    mul_into(&mut v, a, b)?;
    Ok(v)
}
