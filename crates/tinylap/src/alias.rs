//! Buffer aliasing detection.
//!
//! Every [`Matrix`] resolves, through its chain of views, to at most one
//! backing [`Buffer`](crate::math::Buffer). Two values alias when they
//! address at least one element each of the same buffer. The check is
//! coarse: disjoint rows of one buffer still count as aliased.

use crate::math::{BufferId, Matrix};

/// The backing storage a value resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    pub buffer: BufferId,
    /// Number of buffer elements the resolved storage addresses.
    pub len: usize,
}

/// Resolve `m` down to its backing buffer. `None` for values without
/// storage (the identity matrix).
pub fn footprint(m: &Matrix) -> Option<Footprint> {
    match m {
        Matrix::Dense(d) => Some(Footprint {
            buffer: d.buffer().id(),
            len: d.nrows() * d.ncols(),
        }),
        Matrix::Vector(v) => Some(Footprint {
            buffer: v.buffer().id(),
            len: v.len(),
        }),
        Matrix::Transpose(t) => footprint(t.inner()),
        Matrix::Slice(s) => footprint(s.inner()),
        Matrix::Exclude(e) => footprint(e.inner()),
        Matrix::Identity(_) => None,
    }
}

/// Whether `a` and `b` share backing storage.
pub fn aliased(a: &Matrix, b: &Matrix) -> bool {
    match (footprint(a), footprint(b)) {
        (Some(fa), Some(fb)) => fa.buffer == fb.buffer && fa.len > 0 && fb.len > 0,
        _ => false,
    }
}

/// Whether `a` and `b` are the same storage object: the same buffer read
/// with identical geometry and no view in between. Element-wise kernels may
/// write into an operand that is the same object as their output.
pub fn same_object(a: &Matrix, b: &Matrix) -> bool {
    match (a, b) {
        (Matrix::Dense(x), Matrix::Dense(y)) => {
            x.buffer().shares(y.buffer())
                && x.offset_in_buffer() == y.offset_in_buffer()
                && x.shape() == y.shape()
                && x.stride() == y.stride()
        }
        (Matrix::Vector(x), Matrix::Vector(y)) => {
            x.buffer().shares(y.buffer())
                && x.offset_in_buffer() == y.offset_in_buffer()
                && x.len() == y.len()
                && x.increment() == y.increment()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{identity, slice, transpose, Buffer, Dense, Vector};

    #[test]
    fn independent_vectors_do_not_alias() {
        let a = Vector::zeros(10);
        let b = Vector::zeros(20);
        assert!(!aliased(&a.into(), &b.into()));
    }

    #[test]
    fn vectors_over_one_buffer_alias() {
        let buf = Buffer::zeros(10);
        let a = Vector::from_buffer(buf.clone());
        let b = Vector::from_buffer(buf);
        assert!(aliased(&a.into(), &b.into()));
    }

    #[test]
    fn views_resolve_to_their_buffer() {
        let m = Dense::zeros(3, 3);
        let t = transpose(&m);
        let s = slice(t.clone(), &[0], &[]).unwrap();
        assert!(aliased(&m.clone().into(), &t));
        assert!(aliased(&s, &m.into()));
    }

    #[test]
    fn disjoint_rows_still_alias() {
        let m = Dense::zeros(2, 2);
        let r0 = m.row_view(0).unwrap();
        let r1 = m.row_view(1).unwrap();
        assert!(aliased(&r0.into(), &r1.into()));
    }

    #[test]
    fn empty_values_and_identity_never_alias() {
        let buf = Buffer::zeros(0);
        let a = Vector::from_buffer(buf.clone());
        let b = Vector::from_buffer(buf);
        assert!(!aliased(&a.into(), &b.into()));
        let m = Dense::zeros(2, 2);
        assert!(!aliased(&identity(2), &m.into()));
    }

    #[test]
    fn same_object_needs_matching_geometry() {
        let m = Dense::zeros(3, 3);
        let block = m.sub_block(0, 2, 0, 2).unwrap();
        assert!(same_object(&m.clone().into(), &m.clone().into()));
        assert!(!same_object(&m.clone().into(), &block.into()));
        assert!(!same_object(&m.clone().into(), &transpose(&m)));
    }
}
