//! Matrix and vector data model.
//!
//! Storage lives in reference-counted [`Buffer`]s of `f64` cells. [`Dense`]
//! and [`Vector`] address a buffer with an offset and stride; views
//! ([`Transpose`], [`Slice`], [`Exclude`]) re-index another [`Matrix`]
//! without copying, and [`Identity`] holds no storage at all.
pub mod buffer;
pub mod dense;
pub mod matrix;
pub mod vector;
pub mod view;

pub use buffer::{Buffer, BufferId};
pub use dense::Dense;
pub use matrix::{Matrix, MatrixMut};
pub use vector::Vector;
pub use view::{
    identity, slice, slice_exclude, slice_exclude_vec, slice_vec, transpose, Exclude, Identity,
    Slice, Transpose,
};
