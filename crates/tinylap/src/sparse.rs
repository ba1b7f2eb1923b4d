//! Coordinate-list ingestion into a map-backed sparse matrix.
//!
//! [`SparseAccum`] collects `(row, col, value)` triplets; [`Sparse`] sums them
//! into a keyed map and can materialize the result as a [`Dense`]. The map is
//! ordered, so iteration runs in row-major order.
use std::collections::BTreeMap;

use log::trace;

use crate::error::{LinalgError, Result};
use crate::math::Dense;

/// Parallel lists of row indices, column indices and values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseAccum {
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl SparseAccum {
    /// Accumulator with `n` zeroed entries, filled in with [`SparseAccum::set`].
    pub fn with_len(n: usize) -> Self {
        Self {
            rows: vec![0; n],
            cols: vec![0; n],
            values: vec![0.0; n],
        }
    }

    pub fn from_triplets(rows: Vec<usize>, cols: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        if rows.len() != cols.len() || rows.len() != values.len() {
            return Err(LinalgError::Dimension(format!(
                "triplet lists differ in length: {} rows, {} cols, {} values",
                rows.len(),
                cols.len(),
                values.len()
            )));
        }
        Ok(Self { rows, cols, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overwrite slot `offset` with the entry `(i, j) = v`.
    pub fn set(&mut self, offset: usize, i: usize, j: usize, v: f64) -> Result<()> {
        if offset >= self.len() {
            return Err(LinalgError::RowAccess {
                row: offset,
                rows: self.len(),
            });
        }
        self.rows[offset] = i;
        self.cols[offset] = j;
        self.values[offset] = v;
        Ok(())
    }

    pub fn push(&mut self, i: usize, j: usize, v: f64) {
        self.rows.push(i);
        self.cols.push(j);
        self.values.push(v);
    }

    /// Reset every slot to `(0, 0) = 0` keeping the length.
    pub fn zero(&mut self) {
        self.rows.iter_mut().for_each(|x| *x = 0);
        self.cols.iter_mut().for_each(|x| *x = 0);
        self.values.iter_mut().for_each(|x| *x = 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&i, &j), &v)| (i, j, v))
    }
}

/// Sparse `rows x cols` matrix storing only non-zero entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sparse {
    rows: usize,
    cols: usize,
    entries: BTreeMap<(usize, usize), f64>,
}

impl Sparse {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        }
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn check(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows {
            return Err(LinalgError::RowAccess {
                row: i,
                rows: self.rows,
            });
        }
        if j >= self.cols {
            return Err(LinalgError::ColAccess {
                col: j,
                cols: self.cols,
            });
        }
        Ok(())
    }

    pub fn at(&self, i: usize, j: usize) -> Result<f64> {
        self.check(i, j)?;
        Ok(self.entries.get(&(i, j)).copied().unwrap_or(0.0))
    }

    /// Store `v` at `(i, j)`; zero removes the entry.
    pub fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()> {
        self.check(i, j)?;
        if v == 0.0 {
            self.entries.remove(&(i, j));
        } else {
            self.entries.insert((i, j), v);
        }
        Ok(())
    }

    /// Add every triplet of `data`, summing duplicates.
    pub fn accumulate(&mut self, data: &SparseAccum) -> Result<()> {
        self.accumulate_general(false, 0, 0, data)
    }

    /// Add every triplet of `data`, swapping its coordinates when `transpose`
    /// is set and shifting them by `(i_off, j_off)`.
    ///
    /// Coordinates are validated after shifting, all of them before the first
    /// write, so a failed call leaves `self` unchanged. Zero values are
    /// skipped.
    pub fn accumulate_general(
        &mut self,
        transpose: bool,
        i_off: usize,
        j_off: usize,
        data: &SparseAccum,
    ) -> Result<()> {
        let place = |i: usize, j: usize| {
            let (i, j) = if transpose { (j, i) } else { (i, j) };
            (i + i_off, j + j_off)
        };
        for (i, j, _) in data.iter() {
            let (i, j) = place(i, j);
            self.check(i, j)?;
        }
        let mut added = 0;
        for (i, j, v) in data.iter().filter(|&(_, _, v)| v != 0.0) {
            *self.entries.entry(place(i, j)).or_insert(0.0) += v;
            added += 1;
        }
        trace!(
            "accumulated {} of {} triplets into ({}, {}) sparse matrix",
            added,
            data.len(),
            self.rows,
            self.cols
        );
        Ok(())
    }

    /// Change the shape, dropping entries that fall outside it.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.entries.retain(|&(i, j), _| i < rows && j < cols);
        self.rows = rows;
        self.cols = cols;
    }

    /// Stored entries in row-major order.
    pub fn nonzeros(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries.iter().map(|(&(i, j), &v)| (i, j, v))
    }

    pub fn count_nonzero(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_dense(&self) -> Dense {
        let out = Dense::zeros(self.rows, self.cols);
        for (i, j, v) in self.nonzeros() {
            out.store(i, j, v);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triplet_lengths_must_match() {
        let err = SparseAccum::from_triplets(vec![0, 1], vec![0], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Dimension);
    }

    #[test]
    fn duplicates_are_summed() {
        let data =
            SparseAccum::from_triplets(vec![0, 0, 1], vec![1, 1, 0], vec![1.5, 2.5, 3.0]).unwrap();
        let mut s = Sparse::new(2, 2);
        s.accumulate(&data).unwrap();
        assert_eq!(s.at(0, 1).unwrap(), 4.0);
        assert_eq!(s.count_nonzero(), 2);
        assert_eq!(s.to_dense().to_vec(), vec![0.0, 4.0, 3.0, 0.0]);
    }

    #[test]
    fn general_accumulate_transposes_then_shifts() {
        let mut data = SparseAccum::with_len(1);
        data.set(0, 0, 1, 7.0).unwrap();
        let mut s = Sparse::new(3, 3);
        s.accumulate_general(true, 1, 1, &data).unwrap();
        assert_eq!(s.nonzeros().collect::<Vec<_>>(), vec![(2, 1, 7.0)]);
    }

    #[test]
    fn shifted_out_of_range_writes_nothing() {
        let data = SparseAccum::from_triplets(vec![0, 1], vec![0, 1], vec![1.0, 1.0]).unwrap();
        let mut s = Sparse::new(2, 2);
        let err = s.accumulate_general(false, 1, 0, &data).unwrap_err();
        assert_eq!(err, LinalgError::RowAccess { row: 2, rows: 2 });
        assert_eq!(s.count_nonzero(), 0);
    }

    #[test]
    fn set_zero_removes_and_resize_drops() {
        let mut s = Sparse::new(3, 3);
        s.set(2, 2, 1.0).unwrap();
        s.set(0, 0, 1.0).unwrap();
        s.set(0, 0, 0.0).unwrap();
        assert_eq!(s.count_nonzero(), 1);
        s.resize(2, 2);
        assert_eq!(s.count_nonzero(), 0);
        assert_eq!(s.dims(), (2, 2));
    }
}
