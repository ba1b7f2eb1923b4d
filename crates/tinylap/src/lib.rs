//! tinylap: a small dense linear algebra toolkit over `f64`.
//!
//! Matrices and vectors share reference-counted buffers, and views
//! (transpose, index slices, exclusion slices) re-index them without copying.
//! Arithmetic writes either into a freshly allocated result or into a
//! caller-provided output, and refuses outputs that share storage with an
//! input in a way the kernel cannot tolerate. On top of that sit a one-sided
//! Jacobi singular value solver, a Gauss-Jordan inverter and a map-backed
//! sparse ingestion helper.
//!
//! Values are `!Send`: the crate is single-threaded by construction.
pub mod algo;
pub mod alias;
pub mod config;
pub mod error;
pub mod math;
pub mod ops;
pub mod sparse;

pub use algo::{
    invert_square, invert_square_into, jacobi_singular_values, GaussJordan, JacobiReport,
    JacobiSolver,
};
pub use config::{InverseConfig, JacobiConfig, LinalgConfig, NormKind};
pub use error::{ErrorKind, LinalgError, Result};
pub use math::{
    identity, slice, slice_exclude, slice_exclude_vec, slice_vec, transpose, Buffer, BufferId,
    Dense, Matrix, MatrixMut, Vector,
};
pub use ops::{
    add, add_into, argmax, argmin, copy, copy_into, dot, max, min, mul, mul_elem, mul_elem_into,
    mul_into, mul_vec, norm, scale, scale_into, sub, sub_into, sum,
};
pub use sparse::{Sparse, SparseAccum};
