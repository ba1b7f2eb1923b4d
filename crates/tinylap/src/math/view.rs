//! Zero-copy views: transpose, index slices, exclusion slices and the
//! identity matrix.
//!
//! Views wrap another [`Matrix`] (sharing its buffer) plus index metadata.
//! Index lists are validated when the view is built, so element access
//! through a view only has to check the view's own shape.

use crate::error::{LinalgError, Result};
use crate::math::matrix::Matrix;

#[derive(Clone, Debug)]
pub struct Transpose {
    inner: Box<Matrix>,
}

impl Transpose {
    pub fn inner(&self) -> &Matrix {
        &self.inner
    }

    pub fn into_inner(self) -> Matrix {
        *self.inner
    }

    pub fn dims(&self) -> (usize, usize) {
        let (r, c) = self.inner.dims();
        (c, r)
    }
}

/// Implicit transpose of `m`. Transposing a [`Transpose`] hands back the
/// wrapped value instead of nesting.
pub fn transpose(m: impl Into<Matrix>) -> Matrix {
    match m.into() {
        Matrix::Transpose(t) => t.into_inner(),
        other => Matrix::Transpose(Transpose {
            inner: Box::new(other),
        }),
    }
}

/// Rows and columns picked out of another matrix. An empty index list keeps
/// that axis unchanged.
#[derive(Clone, Debug)]
pub struct Slice {
    inner: Box<Matrix>,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl Slice {
    pub fn inner(&self) -> &Matrix {
        &self.inner
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn col_indices(&self) -> &[usize] {
        &self.cols
    }

    pub fn dims(&self) -> (usize, usize) {
        let (r, c) = self.inner.dims();
        let r = if self.rows.is_empty() { r } else { self.rows.len() };
        let c = if self.cols.is_empty() { c } else { self.cols.len() };
        (r, c)
    }

    #[inline]
    pub(crate) fn map_row(&self, i: usize) -> usize {
        if self.rows.is_empty() {
            i
        } else {
            self.rows[i]
        }
    }

    #[inline]
    pub(crate) fn map_col(&self, j: usize) -> usize {
        if self.cols.is_empty() {
            j
        } else {
            self.cols[j]
        }
    }
}

fn check_indices(rows: &[usize], cols: &[usize], dims: (usize, usize)) -> Result<()> {
    if let Some(&row) = rows.iter().find(|&&r| r >= dims.0) {
        return Err(LinalgError::RowAccess { row, rows: dims.0 });
    }
    if let Some(&col) = cols.iter().find(|&&c| c >= dims.1) {
        return Err(LinalgError::ColAccess { col, cols: dims.1 });
    }
    Ok(())
}

/// View of `m` restricted to `rows` x `cols`. Indices may repeat and come in
/// any order; an empty list selects the whole axis.
pub fn slice(m: impl Into<Matrix>, rows: &[usize], cols: &[usize]) -> Result<Matrix> {
    let m = m.into();
    check_indices(rows, cols, m.dims())?;
    Ok(Matrix::Slice(Slice {
        inner: Box::new(m),
        rows: rows.to_vec(),
        cols: cols.to_vec(),
    }))
}

/// Slice a column vector by row indices.
pub fn slice_vec(v: impl Into<Matrix>, idx: &[usize]) -> Result<Matrix> {
    let v = v.into();
    if v.ncols() != 1 {
        return Err(LinalgError::Dimension(format!(
            "cannot slice a {}-column matrix as a vector",
            v.ncols()
        )));
    }
    slice(v, idx, &[])
}

/// Everything in another matrix except the listed rows and columns.
#[derive(Clone, Debug)]
pub struct Exclude {
    inner: Box<Matrix>,
    excluded_rows: Vec<usize>,
    excluded_cols: Vec<usize>,
    kept_rows: Vec<usize>,
    kept_cols: Vec<usize>,
}

impl Exclude {
    pub fn inner(&self) -> &Matrix {
        &self.inner
    }

    pub fn excluded_rows(&self) -> &[usize] {
        &self.excluded_rows
    }

    pub fn excluded_cols(&self) -> &[usize] {
        &self.excluded_cols
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.kept_rows.len(), self.kept_cols.len())
    }

    #[inline]
    pub(crate) fn map_row(&self, i: usize) -> usize {
        self.kept_rows[i]
    }

    #[inline]
    pub(crate) fn map_col(&self, j: usize) -> usize {
        self.kept_cols[j]
    }
}

// Indices in `excluded` must be strictly increasing and below `n`.
fn complement(
    excluded: &[usize],
    n: usize,
    axis_err: impl Fn(usize) -> LinalgError,
) -> Result<Vec<usize>> {
    let mut last = None;
    for &idx in excluded {
        if idx >= n || last.map_or(false, |prev| idx <= prev) {
            return Err(axis_err(idx));
        }
        last = Some(idx);
    }
    let mut skip = excluded.iter().peekable();
    let mut kept = Vec::with_capacity(n - excluded.len());
    for i in 0..n {
        if skip.peek() == Some(&&i) {
            skip.next();
            continue;
        }
        kept.push(i);
    }
    Ok(kept)
}

/// Counterpart of [`slice`]: view of `m` without the listed rows and
/// columns. Both lists must be strictly increasing.
pub fn slice_exclude(
    m: impl Into<Matrix>,
    exclude_rows: &[usize],
    exclude_cols: &[usize],
) -> Result<Matrix> {
    let m = m.into();
    let (r, c) = m.dims();
    let kept_rows = complement(exclude_rows, r, |row| LinalgError::RowAccess { row, rows: r })?;
    let kept_cols = complement(exclude_cols, c, |col| LinalgError::ColAccess { col, cols: c })?;
    Ok(Matrix::Exclude(Exclude {
        inner: Box::new(m),
        excluded_rows: exclude_rows.to_vec(),
        excluded_cols: exclude_cols.to_vec(),
        kept_rows,
        kept_cols,
    }))
}

/// Drop the listed entries from a column vector.
pub fn slice_exclude_vec(v: impl Into<Matrix>, exclude: &[usize]) -> Result<Matrix> {
    slice_exclude(v, exclude, &[])
}

/// Square identity matrix of size `n`. Holds no storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identity {
    n: usize,
}

impl Identity {
    pub fn new(n: usize) -> Self {
        Identity { n }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.n, self.n)
    }
}

pub fn identity(n: usize) -> Matrix {
    Matrix::Identity(Identity::new(n))
}
