//! Arithmetic over [`Matrix`] values.
//!
//! Every operation comes in two call shapes: a value-returning form (`add`)
//! that allocates its result, and an in-place form (`add_into`) writing into
//! an existing [`Dense`](crate::Dense) or [`Vector`](crate::Vector). Reusing an
//! output across iterations avoids reallocating it. An uninitialized output
//! (`Dense::default()`) is allocated to the inferred shape.
//!
//! When the output is initialized, the aliasing check runs before anything
//! else and the whole call is rejected if the output shares storage with an
//! input. Element-wise kernels accept an output that is the same object as
//! an operand; the matrix product never does.
use log::debug;

use crate::alias;
use crate::error::{LinalgError, Result};
use crate::math::{Matrix, MatrixMut};

pub mod elementwise;
pub mod product;
pub mod reduce;

pub use elementwise::{
    add, add_into, copy, copy_into, mul_elem, mul_elem_into, scale, scale_into, sub, sub_into,
};
pub use product::{mul, mul_into, mul_vec};
pub use reduce::{argmax, argmin, dot, max, min, norm, sum};

pub(crate) fn reject_aliasing<O: MatrixMut>(
    out: &O,
    inputs: &[&Matrix],
    allow_same_object: bool,
) -> Result<()> {
    if !out.is_initialized() {
        return Ok(());
    }
    let me = out.to_matrix();
    for input in inputs {
        if alias::aliased(&me, input) && !(allow_same_object && alias::same_object(&me, input)) {
            debug!(
                "rejecting write into {:?} output: shares storage with a {:?} input",
                me.dims(),
                input.dims()
            );
            return Err(LinalgError::Aliased);
        }
    }
    Ok(())
}

pub(crate) fn ensure_shape<O: MatrixMut>(out: &mut O, shape: (usize, usize)) -> Result<()> {
    if out.is_initialized() {
        if out.dims() != shape {
            return Err(LinalgError::shape_mismatch(shape, out.dims()));
        }
        Ok(())
    } else {
        out.allocate(shape.0, shape.1)
    }
}
