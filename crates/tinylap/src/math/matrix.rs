use crate::error::{LinalgError, Result};
use crate::math::dense::Dense;
use crate::math::vector::Vector;
use crate::math::view::{Exclude, Identity, Slice, Transpose};

/// Any value that can be read as a matrix.
///
/// The set of variants is closed: the aliasing detector must be able to
/// resolve every value down to its backing buffer, which rules out foreign
/// implementations. Cloning a `Matrix` clones buffer handles, never data.
#[derive(Clone, Debug)]
pub enum Matrix {
    Dense(Dense),
    Vector(Vector),
    Transpose(Transpose),
    Slice(Slice),
    Exclude(Exclude),
    Identity(Identity),
}

impl Matrix {
    pub fn dims(&self) -> (usize, usize) {
        match self {
            Matrix::Dense(d) => d.dims(),
            Matrix::Vector(v) => v.dims(),
            Matrix::Transpose(t) => t.dims(),
            Matrix::Slice(s) => s.dims(),
            Matrix::Exclude(e) => e.dims(),
            Matrix::Identity(id) => id.dims(),
        }
    }

    pub fn nrows(&self) -> usize {
        self.dims().0
    }

    pub fn ncols(&self) -> usize {
        self.dims().1
    }

    pub(crate) fn check(&self, row: usize, col: usize) -> Result<()> {
        let (rows, cols) = self.dims();
        if row >= rows {
            return Err(LinalgError::RowAccess { row, rows });
        }
        if col >= cols {
            return Err(LinalgError::ColAccess { col, cols });
        }
        Ok(())
    }

    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        self.check(row, col)?;
        Ok(self.load(row, col))
    }

    /// Unchecked against the logical shape; callers validate indices first.
    pub(crate) fn load(&self, row: usize, col: usize) -> f64 {
        match self {
            Matrix::Dense(d) => d.load(row, col),
            Matrix::Vector(v) => v.load(row),
            Matrix::Transpose(t) => t.inner().load(col, row),
            Matrix::Slice(s) => s.inner().load(s.map_row(row), s.map_col(col)),
            Matrix::Exclude(e) => e.inner().load(e.map_row(row), e.map_col(col)),
            Matrix::Identity(_) => {
                if row == col {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// True when [`Matrix::set`] can write through this value.
    pub fn is_mutable(&self) -> bool {
        match self {
            Matrix::Dense(_) | Matrix::Vector(_) => true,
            Matrix::Transpose(t) => t.inner().is_mutable(),
            Matrix::Slice(s) => s.inner().is_mutable(),
            Matrix::Exclude(e) => e.inner().is_mutable(),
            Matrix::Identity(_) => false,
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if !self.is_mutable() {
            return Err(LinalgError::Unsupported(
                "set through a view of a read-only matrix",
            ));
        }
        self.check(row, col)?;
        self.store(row, col, value);
        Ok(())
    }

    fn store(&self, row: usize, col: usize, value: f64) {
        match self {
            Matrix::Dense(d) => d.store(row, col, value),
            Matrix::Vector(v) => v.store(row, value),
            Matrix::Transpose(t) => t.inner().store(col, row, value),
            Matrix::Slice(s) => s.inner().store(s.map_row(row), s.map_col(col), value),
            Matrix::Exclude(e) => e.inner().store(e.map_row(row), e.map_col(col), value),
            Matrix::Identity(_) => unreachable!("identity is never mutable"),
        }
    }

    /// Write `src` element-wise into the positions this view addresses.
    /// Returns the copied shape.
    pub fn copy_from(&mut self, src: impl Into<Matrix>) -> Result<(usize, usize)> {
        let src = src.into();
        if !self.is_mutable() {
            return Err(LinalgError::Unsupported(
                "copy into a view of a read-only matrix",
            ));
        }
        if crate::alias::aliased(self, &src) && !crate::alias::same_object(self, &src) {
            return Err(LinalgError::Aliased);
        }
        let (rows, cols) = self.dims();
        if src.dims() != (rows, cols) {
            return Err(LinalgError::shape_mismatch((rows, cols), src.dims()));
        }
        for i in 0..rows {
            for j in 0..cols {
                self.store(i, j, src.load(i, j));
            }
        }
        Ok((rows, cols))
    }

    /// Transposed view; a transpose of a transpose unwraps.
    pub fn t(self) -> Matrix {
        crate::math::view::transpose(self)
    }

    /// Materialize into a freshly allocated dense matrix.
    pub fn to_dense(&self) -> Dense {
        let (rows, cols) = self.dims();
        let out = Dense::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                out.store(i, j, self.load(i, j));
            }
        }
        out
    }

    pub fn as_dense(&self) -> Option<&Dense> {
        match self {
            Matrix::Dense(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Matrix::Vector(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Dense> for Matrix {
    fn from(value: Dense) -> Self {
        Matrix::Dense(value)
    }
}

impl From<&Dense> for Matrix {
    fn from(value: &Dense) -> Self {
        Matrix::Dense(value.clone())
    }
}

impl From<Vector> for Matrix {
    fn from(value: Vector) -> Self {
        Matrix::Vector(value)
    }
}

impl From<&Vector> for Matrix {
    fn from(value: &Vector) -> Self {
        Matrix::Vector(value.clone())
    }
}

impl From<Identity> for Matrix {
    fn from(value: Identity) -> Self {
        Matrix::Identity(value)
    }
}

impl From<&Matrix> for Matrix {
    fn from(value: &Matrix) -> Self {
        value.clone()
    }
}

pub(crate) mod sealed {
    /// Write access used by the arithmetic kernels. Not nameable outside the
    /// crate, so outputs cannot be implemented elsewhere.
    pub trait Sealed {
        fn store(&self, row: usize, col: usize, value: f64);
    }
}

/// Storage that arithmetic can write its result into: [`Dense`] or
/// [`Vector`].
pub trait MatrixMut: sealed::Sealed {
    fn dims(&self) -> (usize, usize);

    /// False for the default value, which gets allocated on first write.
    fn is_initialized(&self) -> bool;

    /// Replace `self` with fresh zeroed storage of the given shape.
    fn allocate(&mut self, rows: usize, cols: usize) -> Result<()>;

    /// Read-only handle over the same storage.
    fn to_matrix(&self) -> Matrix;
}
