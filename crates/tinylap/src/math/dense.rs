use log::debug;

use crate::alias;
use crate::error::{LinalgError, Result};
use crate::math::buffer::Buffer;
use crate::math::matrix::{sealed, Matrix, MatrixMut};
use crate::math::vector::Vector;

/// Row-major matrix over a shared [`Buffer`].
///
/// Element `(i, j)` lives at `offset + i * stride + j` of the buffer. The
/// stride is at least `cols`; it is larger for blocks cut out of a wider
/// matrix with [`Dense::sub_block`].
///
/// `Dense::default()` is the uninitialized matrix. Operations writing into
/// an uninitialized output allocate it to the shape they produce.
#[derive(Clone, Debug, Default)]
pub struct Dense {
    buf: Buffer,
    offset: usize,
    rows: usize,
    cols: usize,
    stride: usize,
}

impl Dense {
    /// Allocate a zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Dense {
            buf: Buffer::zeros(rows * cols),
            offset: 0,
            rows,
            cols,
            stride: cols,
        }
    }

    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        Self::from_shape_vec((rows, cols), data)
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(LinalgError::buffer_len(rows, cols, data.len()));
        }
        Ok(Dense {
            buf: Buffer::from_vec(data),
            offset: 0,
            rows,
            cols,
            stride: cols,
        })
    }

    /// Build a matrix over caller-owned storage. The matrix shares the cells
    /// with every other handle to `buffer`; nothing is copied.
    pub fn from_buffer(rows: usize, cols: usize, buffer: Buffer) -> Result<Self> {
        if buffer.len() != rows * cols {
            return Err(LinalgError::buffer_len(rows, cols, buffer.len()));
        }
        Ok(Dense {
            buf: buffer,
            offset: 0,
            rows,
            cols,
            stride: cols,
        })
    }

    /// Like [`Dense::from_buffer`] but with an explicit row stride.
    pub fn from_buffer_strided(
        rows: usize,
        cols: usize,
        stride: usize,
        buffer: Buffer,
    ) -> Result<Self> {
        if stride < cols {
            return Err(LinalgError::Dimension(format!(
                "stride {} smaller than column count {}",
                stride, cols
            )));
        }
        let needed = if rows == 0 || cols == 0 {
            0
        } else {
            (rows - 1) * stride + cols
        };
        if buffer.len() < needed {
            return Err(LinalgError::Dimension(format!(
                "buffer of length {} too short for ({}, {}) with stride {}",
                buffer.len(),
                rows,
                cols,
                stride
            )));
        }
        Ok(Dense {
            buf: buffer,
            offset: 0,
            rows,
            cols,
            stride,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn dims(&self) -> (usize, usize) {
        self.shape()
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buf
    }

    pub(crate) fn offset_in_buffer(&self) -> usize {
        self.offset
    }

    /// False only for the default (never allocated) matrix.
    pub fn is_initialized(&self) -> bool {
        !(self.rows == 0 && self.cols == 0 && self.buf.is_empty())
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        self.offset + row * self.stride + col
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows {
            return Err(LinalgError::RowAccess {
                row,
                rows: self.rows,
            });
        }
        if col >= self.cols {
            return Err(LinalgError::ColAccess {
                col,
                cols: self.cols,
            });
        }
        Ok(())
    }

    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        self.check(row, col)?;
        Ok(self.load(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check(row, col)?;
        self.store(row, col, value);
        Ok(())
    }

    #[inline]
    pub(crate) fn load(&self, row: usize, col: usize) -> f64 {
        self.buf.get(self.offset(row, col))
    }

    #[inline]
    pub(crate) fn store(&self, row: usize, col: usize, value: f64) {
        self.buf.set(self.offset(row, col), value)
    }

    /// Contiguous view of row `row`. Shares the buffer.
    pub fn row_view(&self, row: usize) -> Result<Vector> {
        if row >= self.rows {
            return Err(LinalgError::RowAccess {
                row,
                rows: self.rows,
            });
        }
        Ok(Vector::strided(
            self.buf.clone(),
            self.offset(row, 0),
            self.cols,
            1,
        ))
    }

    /// Strided view of column `col`, stepping by the row stride.
    pub fn col_view(&self, col: usize) -> Result<Vector> {
        if col >= self.cols {
            return Err(LinalgError::ColAccess {
                col,
                cols: self.cols,
            });
        }
        Ok(Vector::strided(
            self.buf.clone(),
            self.offset(0, col),
            self.rows,
            self.stride,
        ))
    }

    /// Zero-copy block covering rows `i..k` and columns `j..l`.
    pub fn sub_block(&self, i: usize, k: usize, j: usize, l: usize) -> Result<Dense> {
        if k <= i || l <= j {
            return Err(LinalgError::Dimension(format!(
                "empty block rows {}..{}, columns {}..{}",
                i, k, j, l
            )));
        }
        if k > self.rows || l > self.cols {
            return Err(LinalgError::Dimension(format!(
                "block rows {}..{}, columns {}..{} outside ({}, {})",
                i, k, j, l, self.rows, self.cols
            )));
        }
        Ok(Dense {
            buf: self.buf.clone(),
            offset: self.offset(i, j),
            rows: k - i,
            cols: l - j,
            stride: self.stride,
        })
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        for row in [a, b] {
            if row >= self.rows {
                return Err(LinalgError::RowAccess {
                    row,
                    rows: self.rows,
                });
            }
        }
        for col in 0..self.cols {
            self.buf.swap(self.offset(a, col), self.offset(b, col));
        }
        Ok(())
    }

    pub fn swap_cols(&mut self, a: usize, b: usize) -> Result<()> {
        for col in [a, b] {
            if col >= self.cols {
                return Err(LinalgError::ColAccess {
                    col,
                    cols: self.cols,
                });
            }
        }
        for row in 0..self.rows {
            self.buf.swap(self.offset(row, a), self.offset(row, b));
        }
        Ok(())
    }

    /// Replace every element with `f(element)`, row 0 left to right, then
    /// row 1, and so on.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        self.for_each_indexed(|_, _, v| f(v))
    }

    pub fn for_each_indexed<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, usize, f64) -> f64,
    {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let v = self.load(row, col);
                self.store(row, col, f(row, col, v));
            }
        }
    }

    /// New matrix holding `f` applied to every element.
    pub fn map<F>(&self, mut f: F) -> Dense
    where
        F: FnMut(f64) -> f64,
    {
        let data = self.iter().map(|v| f(v)).collect();
        Dense {
            buf: Buffer::from_vec(data),
            offset: 0,
            rows: self.rows,
            cols: self.cols,
            stride: self.cols,
        }
    }

    /// Row-major iterator over the elements.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.load(row, col)))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Deep copy of `src` into `self`, see [`crate::ops::copy_into`].
    pub fn copy_from(&mut self, src: impl Into<Matrix>) -> Result<()> {
        crate::ops::copy_into(self, src)
    }

    /// Assemble `self` from a row-major grid of `mrows x mcols` blocks.
    ///
    /// Every block in a block-row must share the height of that row's first
    /// block, and every block in a block-column the width of the first row's
    /// block. A grid with no block rows or no block columns is a dimension
    /// error. The receiver is allocated when uninitialized. All shapes are
    /// checked before anything is written.
    pub fn copy_blocks(&mut self, mrows: usize, mcols: usize, blocks: &[Matrix]) -> Result<()> {
        if blocks.len() != mrows * mcols {
            return Err(LinalgError::Dimension(format!(
                "expected {} blocks for a {}x{} grid, got {}",
                mrows * mcols,
                mrows,
                mcols,
                blocks.len()
            )));
        }
        if mrows == 0 || mcols == 0 {
            return Err(LinalgError::Dimension(format!(
                "empty {}x{} block grid",
                mrows, mcols
            )));
        }
        let heights: Vec<usize> = (0..mrows).map(|i| blocks[i * mcols].nrows()).collect();
        let widths: Vec<usize> = (0..mcols).map(|j| blocks[j].ncols()).collect();
        for i in 0..mrows {
            for j in 0..mcols {
                let (r, c) = blocks[i * mcols + j].dims();
                if r != heights[i] {
                    return Err(LinalgError::Dimension(format!(
                        "block at {},{} is wrong height: {} != {}",
                        i, j, r, heights[i]
                    )));
                }
                if c != widths[j] {
                    return Err(LinalgError::Dimension(format!(
                        "block at {},{} is wrong width: {} != {}",
                        i, j, c, widths[j]
                    )));
                }
            }
        }
        let total = (heights.iter().sum(), widths.iter().sum());

        if self.is_initialized() {
            let me = Matrix::Dense(self.clone());
            if blocks.iter().any(|b| alias::aliased(&me, b)) {
                debug!("copy_blocks: destination shares storage with a source block");
                return Err(LinalgError::Aliased);
            }
            if self.shape() != total {
                return Err(LinalgError::shape_mismatch(total, self.shape()));
            }
        } else {
            *self = Dense::zeros(total.0, total.1);
        }

        let mut row0 = 0;
        for i in 0..mrows {
            let mut col0 = 0;
            for j in 0..mcols {
                let block = &blocks[i * mcols + j];
                for r in 0..heights[i] {
                    for c in 0..widths[j] {
                        self.store(row0 + r, col0 + c, block.load(r, c));
                    }
                }
                col0 += widths[j];
            }
            row0 += heights[i];
        }
        Ok(())
    }

    /// `self += b`, reading and writing each cell once.
    pub fn add_in_place(&mut self, b: impl Into<Matrix>) -> Result<()> {
        let me = Matrix::Dense(self.clone());
        crate::ops::add_into(self, me, b)
    }

    /// `self -= b`.
    pub fn sub_in_place(&mut self, b: impl Into<Matrix>) -> Result<()> {
        let me = Matrix::Dense(self.clone());
        crate::ops::sub_into(self, me, b)
    }

    /// `self *= f`.
    pub fn scale_in_place(&mut self, f: f64) {
        self.for_each(|v| f * v)
    }
}

impl MatrixMut for Dense {
    fn dims(&self) -> (usize, usize) {
        self.shape()
    }

    fn is_initialized(&self) -> bool {
        Dense::is_initialized(self)
    }

    fn allocate(&mut self, rows: usize, cols: usize) -> Result<()> {
        *self = Dense::zeros(rows, cols);
        Ok(())
    }

    fn to_matrix(&self) -> Matrix {
        Matrix::Dense(self.clone())
    }
}

impl sealed::Sealed for Dense {
    fn store(&self, row: usize, col: usize, value: f64) {
        Dense::store(self, row, col, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dense {
        Dense::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    #[test]
    fn zeros_are_zero() {
        let m = Dense::zeros(4, 6);
        assert!(m.iter().all(|v| v == 0.0));
        assert_eq!(m.dims(), (4, 6));
    }

    #[test]
    fn rejects_wrong_buffer_length() {
        let err = Dense::new(2, 2, vec![1.0; 3]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Dimension);
    }

    #[test]
    fn at_reports_which_axis_is_out_of_range() {
        let m = sample();
        assert!(matches!(m.at(2, 0), Err(LinalgError::RowAccess { row: 2, rows: 2 })));
        assert!(matches!(m.at(0, 3), Err(LinalgError::ColAccess { col: 3, cols: 3 })));
    }

    #[test]
    fn sub_block_shares_storage() {
        let m = sample();
        let mut block = m.sub_block(0, 2, 1, 3).unwrap();
        assert_eq!(block.to_vec(), vec![2.0, 3.0, 5.0, 6.0]);
        assert_eq!(block.stride(), 3);
        block.set(1, 1, 60.0).unwrap();
        assert_eq!(m.at(1, 2).unwrap(), 60.0);
    }

    #[test]
    fn column_view_of_block_steps_by_parent_stride() {
        let m = Dense::new(3, 3, (1..=9).map(f64::from).collect()).unwrap();
        let block = m.sub_block(1, 3, 1, 3).unwrap();
        let col = block.col_view(1).unwrap();
        assert_eq!(col.to_vec(), vec![6.0, 9.0]);
    }

    #[test]
    fn swap_rows_and_cols() {
        let mut m = sample();
        m.swap_rows(0, 1).unwrap();
        assert_eq!(m.to_vec(), vec![4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
        m.swap_cols(0, 1).unwrap();
        assert_eq!(m.to_vec(), vec![5.0, 4.0, 6.0, 2.0, 1.0, 3.0]);
        assert!(m.swap_rows(0, 2).is_err());
    }

    #[test]
    fn for_each_visits_row_major() {
        let mut m = sample();
        let mut seen = Vec::new();
        m.for_each(|v| {
            seen.push(v);
            v * 10.0
        });
        assert_eq!(seen, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.at(1, 2).unwrap(), 60.0);
    }

    #[test]
    fn default_is_uninitialized() {
        assert!(!Dense::default().is_initialized());
        assert!(Dense::zeros(1, 1).is_initialized());
    }
}
