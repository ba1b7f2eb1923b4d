use std::iter::FromIterator;

use crate::error::{LinalgError, Result};
use crate::math::buffer::Buffer;
use crate::math::matrix::{sealed, Matrix, MatrixMut};

/// Column vector over a shared [`Buffer`], possibly strided.
///
/// Element `i` lives at `offset + i * inc`. Row views of a [`crate::Dense`]
/// are contiguous (`inc == 1`), column views step by the row stride.
#[derive(Clone, Debug)]
pub struct Vector {
    buf: Buffer,
    offset: usize,
    len: usize,
    inc: usize,
}

impl Default for Vector {
    fn default() -> Self {
        Vector::strided(Buffer::default(), 0, 0, 1)
    }
}

impl Vector {
    /// Vector of length `n`, zero-filled when `data` is `None`.
    pub fn new(n: usize, data: Option<Vec<f64>>) -> Result<Self> {
        match data {
            None => Ok(Self::zeros(n)),
            Some(data) if data.len() == n => Ok(Self::from_vec(data)),
            Some(data) => Err(LinalgError::Dimension(format!(
                "vector of length {} given {} elements",
                n,
                data.len()
            ))),
        }
    }

    pub fn zeros(n: usize) -> Self {
        Self::from_buffer(Buffer::zeros(n))
    }

    pub fn from_elem(n: usize, value: f64) -> Self {
        Self::from_vec(vec![value; n])
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self::from_buffer(Buffer::from_vec(data))
    }

    /// Contiguous vector over the whole of `buffer`, sharing it.
    pub fn from_buffer(buffer: Buffer) -> Self {
        let len = buffer.len();
        Self::strided(buffer, 0, len, 1)
    }

    /// Vector starting at `offset` and stepping by `inc`. The length is the
    /// number of steps that land inside the buffer, rounded up.
    pub fn with_increment(buffer: Buffer, offset: usize, inc: usize) -> Result<Self> {
        if inc == 0 {
            return Err(LinalgError::Dimension("vector increment must be positive".into()));
        }
        if offset > buffer.len() {
            return Err(LinalgError::Dimension(format!(
                "offset {} past buffer of length {}",
                offset,
                buffer.len()
            )));
        }
        let len = (buffer.len() - offset).div_ceil(inc);
        Ok(Self::strided(buffer, offset, len, inc))
    }

    pub(crate) fn strided(buf: Buffer, offset: usize, len: usize, inc: usize) -> Self {
        Vector {
            buf,
            offset,
            len,
            inc,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.len, 1)
    }

    pub fn increment(&self) -> usize {
        self.inc
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buf
    }

    pub(crate) fn offset_in_buffer(&self) -> usize {
        self.offset
    }

    pub fn is_initialized(&self) -> bool {
        !(self.len == 0 && self.buf.is_empty())
    }

    fn check(&self, i: usize) -> Result<()> {
        if i >= self.len {
            return Err(LinalgError::RowAccess {
                row: i,
                rows: self.len,
            });
        }
        Ok(())
    }

    pub fn at_vec(&self, i: usize) -> Result<f64> {
        self.check(i)?;
        Ok(self.load(i))
    }

    pub fn set_vec(&mut self, i: usize, value: f64) -> Result<()> {
        self.check(i)?;
        self.store(i, value);
        Ok(())
    }

    /// Matrix-style access; `col` must be 0.
    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        if col != 0 {
            return Err(LinalgError::ColAccess { col, cols: 1 });
        }
        self.at_vec(row)
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if col != 0 {
            return Err(LinalgError::ColAccess { col, cols: 1 });
        }
        self.set_vec(row, value)
    }

    #[inline]
    pub(crate) fn load(&self, i: usize) -> f64 {
        self.buf.get(self.offset + i * self.inc)
    }

    #[inline]
    pub(crate) fn store(&self, i: usize, value: f64) {
        self.buf.set(self.offset + i * self.inc, value)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.load(i))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        self.for_each_indexed(|_, v| f(v))
    }

    pub fn for_each_indexed<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, f64) -> f64,
    {
        for i in 0..self.len {
            let v = self.load(i);
            self.store(i, f(i, v));
        }
    }

    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.iter().sum::<f64>() / self.len as f64)
        }
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        crate::ops::dot(self, other)
    }

    /// Copy the elements of `src` into `self`, returning how many were copied.
    pub fn copy_vec(&mut self, src: impl Into<Matrix>) -> Result<usize> {
        crate::ops::copy_into(self, src)?;
        Ok(self.len)
    }
}

impl MatrixMut for Vector {
    fn dims(&self) -> (usize, usize) {
        Vector::dims(self)
    }

    fn is_initialized(&self) -> bool {
        Vector::is_initialized(self)
    }

    fn allocate(&mut self, rows: usize, cols: usize) -> Result<()> {
        if cols != 1 {
            return Err(LinalgError::Dimension(format!(
                "vector output cannot hold shape ({}, {})",
                rows, cols
            )));
        }
        *self = Vector::zeros(rows);
        Ok(())
    }

    fn to_matrix(&self) -> Matrix {
        Matrix::Vector(self.clone())
    }
}

impl sealed::Sealed for Vector {
    fn store(&self, row: usize, _col: usize, value: f64) {
        Vector::store(self, row, value)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.to_vec()
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}
