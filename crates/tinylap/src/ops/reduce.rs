use crate::config::NormKind;
use crate::error::{LinalgError, Result};
use crate::math::Matrix;

fn elements(m: &Matrix) -> impl Iterator<Item = f64> + '_ {
    let (rows, cols) = m.dims();
    (0..rows).flat_map(move |i| (0..cols).map(move |j| m.load(i, j)))
}

fn indexed(m: &Matrix) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
    let (rows, cols) = m.dims();
    (0..rows).flat_map(move |i| (0..cols).map(move |j| ((i, j), m.load(i, j))))
}

/// Inner product of two column vectors of equal length. Empty vectors give
/// zero.
pub fn dot(a: impl Into<Matrix>, b: impl Into<Matrix>) -> Result<f64> {
    let a = a.into();
    let b = b.into();
    if a.ncols() > 1 || b.ncols() > 1 {
        return Err(LinalgError::Dimension(format!(
            "dot needs column vectors, got {:?} and {:?}",
            a.dims(),
            b.dims()
        )));
    }
    if a.nrows() != b.nrows() {
        return Err(LinalgError::Dimension(format!(
            "dot of vectors with lengths {} and {}",
            a.nrows(),
            b.nrows()
        )));
    }
    Ok(elements(&a).zip(elements(&b)).map(|(x, y)| x * y).sum())
}

/// Matrix norm.
///
/// * [`NormKind::One`]: maximum absolute column sum.
/// * [`NormKind::Frobenius`]: square root of the sum of squares.
/// * [`NormKind::Inf`]: maximum absolute row sum.
///
/// The empty matrix has norm zero under every kind.
pub fn norm(a: impl Into<Matrix>, kind: NormKind) -> f64 {
    let a = a.into();
    let (rows, cols) = a.dims();
    match kind {
        NormKind::One => (0..cols)
            .map(|j| (0..rows).map(|i| a.load(i, j).abs()).sum::<f64>())
            .fold(0.0, f64::max),
        NormKind::Frobenius => elements(&a).map(|x| x * x).sum::<f64>().sqrt(),
        NormKind::Inf => (0..rows)
            .map(|i| (0..cols).map(|j| a.load(i, j).abs()).sum::<f64>())
            .fold(0.0, f64::max),
    }
}

pub fn sum(a: impl Into<Matrix>) -> f64 {
    let a = a.into();
    elements(&a).sum()
}

/// Largest element; `-inf` for an empty matrix.
pub fn max(a: impl Into<Matrix>) -> f64 {
    let a = a.into();
    elements(&a).fold(f64::NEG_INFINITY, f64::max)
}

/// Smallest element; `+inf` for an empty matrix.
pub fn min(a: impl Into<Matrix>) -> f64 {
    let a = a.into();
    elements(&a).fold(f64::INFINITY, f64::min)
}

/// Position and value of the largest element. Ties resolve to the first
/// occurrence in row-major order.
pub fn argmax(a: impl Into<Matrix>) -> Option<((usize, usize), f64)> {
    let a = a.into();
    indexed(&a).fold(None, |best, (pos, x)| match best {
        Some((_, v)) if v >= x => best,
        _ => Some((pos, x)),
    })
}

/// Position and value of the smallest element, first occurrence wins.
pub fn argmin(a: impl Into<Matrix>) -> Option<((usize, usize), f64)> {
    let a = a.into();
    indexed(&a).fold(None, |best, (pos, x)| match best {
        Some((_, v)) if v <= x => best,
        _ => Some((pos, x)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::math::{Dense, Vector};

    fn sample() -> Dense {
        Dense::new(3, 3, vec![1.0, -2.0, 3.0, -4.0, 5.0, -6.0, 7.0, 9.0, 8.0]).unwrap()
    }

    #[test]
    fn dot_of_column_vectors() {
        let a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let b = Vector::from_vec(vec![4.0, 5.0, 6.0]);
        assert_eq!(dot(&a, &b).unwrap(), 32.0);
        assert_eq!(dot(&Vector::zeros(0), &Vector::zeros(0)).unwrap(), 0.0);
    }

    #[test]
    fn dot_rejects_mismatch() {
        let a = Vector::zeros(3);
        let err = dot(&a, &Vector::zeros(4)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
        let err = dot(&sample(), &sample()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn norms() {
        let m = sample();
        assert_eq!(norm(&m, NormKind::One), 17.0);
        assert_eq!(norm(&m, NormKind::Inf), 24.0);
        let fro: f64 = m.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert_eq!(norm(&m, NormKind::Frobenius), fro);
    }

    #[test]
    fn extremes_and_positions() {
        let m = sample();
        assert_eq!(max(&m), 9.0);
        assert_eq!(min(&m), -6.0);
        assert_eq!(argmax(&m), Some(((2, 1), 9.0)));
        assert_eq!(argmin(&m), Some(((1, 2), -6.0)));
        assert_eq!(sum(&m), 21.0);
    }

    #[test]
    fn ties_resolve_to_first() {
        let m = Dense::new(2, 2, vec![1.0, 3.0, 3.0, 1.0]).unwrap();
        assert_eq!(argmax(&m), Some(((0, 1), 3.0)));
        assert_eq!(argmin(&m), Some(((0, 0), 1.0)));
    }

    #[test]
    fn empty_reductions() {
        let e = Dense::zeros(0, 0);
        assert_eq!(max(&e), f64::NEG_INFINITY);
        assert_eq!(min(&e), f64::INFINITY);
        assert_eq!(argmax(&e), None);
        assert_eq!(sum(&e), 0.0);
    }
}
