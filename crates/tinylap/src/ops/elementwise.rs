use crate::error::{LinalgError, Result};
use crate::math::{Dense, Matrix, MatrixMut};
use crate::ops::{ensure_shape, reject_aliasing};

fn zip_into<O, F>(out: &mut O, a: Matrix, b: Matrix, f: F) -> Result<()>
where
    O: MatrixMut,
    F: Fn(f64, f64) -> f64,
{
    reject_aliasing(out, &[&a, &b], true)?;
    if a.dims() != b.dims() {
        return Err(LinalgError::shape_mismatch(a.dims(), b.dims()));
    }
    ensure_shape(out, a.dims())?;
    let (rows, cols) = a.dims();
    for i in 0..rows {
        for j in 0..cols {
            out.store(i, j, f(a.load(i, j), b.load(i, j)));
        }
    }
    Ok(())
}

fn map_into<O, F>(out: &mut O, a: Matrix, f: F) -> Result<()>
where
    O: MatrixMut,
    F: Fn(f64) -> f64,
{
    reject_aliasing(out, &[&a], true)?;
    ensure_shape(out, a.dims())?;
    let (rows, cols) = a.dims();
    for i in 0..rows {
        for j in 0..cols {
            out.store(i, j, f(a.load(i, j)));
        }
    }
    Ok(())
}

/// `c = a + b`.
pub fn add_into<O: MatrixMut>(c: &mut O, a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<()> {
    zip_into(c, a.into(), b.into(), |x, y| x + y)
}

pub fn add(a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<Dense> {
    let mut c = Dense::default();
    add_into(&mut c, a, b)?;
    Ok(c)
}

/// `c = a - b`.
pub fn sub_into<O: MatrixMut>(c: &mut O, a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<()> {
    zip_into(c, a.into(), b.into(), |x, y| x - y)
}

pub fn sub(a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<Dense> {
    let mut c = Dense::default();
    sub_into(&mut c, a, b)?;
    Ok(c)
}

/// Element-wise (Hadamard) product.
pub fn mul_elem_into<O: MatrixMut>(
    c: &mut O,
    a: impl Into<Matrix>,
    b: impl Into<Matrix>,
) -> Result<()> {
    zip_into(c, a.into(), b.into(), |x, y| x * y)
}

pub fn mul_elem(a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<Dense> {
    let mut c = Dense::default();
    mul_elem_into(&mut c, a, b)?;
    Ok(c)
}

/// `c = f * a`.
pub fn scale_into<O: MatrixMut>(c: &mut O, f: f64, a: impl Into<Matrix>) -> Result<()> {
    map_into(c, a.into(), |x| f * x)
}

pub fn scale(f: f64, a: impl Into<Matrix>) -> Result<Dense> {
    let mut c = Dense::default();
    scale_into(&mut c, f, a)?;
    Ok(c)
}

/// Deep copy of `src` into `dst`, which ends up with no storage in common
/// with `src` unless they were already the same object.
pub fn copy_into<O: MatrixMut>(dst: &mut O, src: impl Into<Matrix>) -> Result<()> {
    map_into(dst, src.into(), |x| x)
}

pub fn copy(src: impl Into<Matrix>) -> Result<Dense> {
    let mut dst = Dense::default();
    copy_into(&mut dst, src)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::math::{transpose, Vector};

    fn lhs() -> Dense {
        Dense::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    fn rhs() -> Dense {
        Dense::new(2, 3, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap()
    }

    #[test]
    fn add_and_sub() {
        assert_eq!(add(&lhs(), &rhs()).unwrap().to_vec(), vec![3.0, 5.0, 7.0, 9.0, 11.0, 13.0]);
        assert_eq!(sub(&lhs(), &rhs()).unwrap().to_vec(), vec![-1.0; 6]);
    }

    #[test]
    fn shape_mismatch_is_dimension_error() {
        let err = add(&lhs(), &Dense::zeros(3, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);

        let mut out = Dense::zeros(3, 3);
        let err = add_into(&mut out, &lhs(), &rhs()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn accumulates_into_same_object() {
        let mut a = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = Vector::from_vec(vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        let view = a.clone();
        add_into(&mut a, &view, &b).unwrap();
        assert_eq!(a.to_vec(), vec![6.0; 5]);

        let view = a.clone();
        scale_into(&mut a, 0.5, &view).unwrap();
        assert_eq!(a.to_vec(), vec![3.0; 5]);
    }

    #[test]
    fn rejects_overlapping_view_of_output() {
        let mut a = Dense::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let t = transpose(&a);
        let before = a.to_vec();
        let err = add_into(&mut a, t, &Dense::zeros(2, 2)).unwrap_err();
        assert_eq!(err, LinalgError::Aliased);
        assert_eq!(a.to_vec(), before);
    }

    #[test]
    fn copy_detaches_storage() {
        let a = lhs();
        let b = copy(&a).unwrap();
        assert!(!a.buffer().shares(b.buffer()));
        assert_eq!(a.to_vec(), b.to_vec());
    }

    #[test]
    fn hadamard_product() {
        let c = mul_elem(&lhs(), &rhs()).unwrap();
        assert_eq!(c.to_vec(), vec![2.0, 6.0, 12.0, 20.0, 30.0, 42.0]);
    }
}
