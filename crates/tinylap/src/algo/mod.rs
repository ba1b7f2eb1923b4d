//! Dense solvers built on the arithmetic kernels.
pub mod inverse;
pub mod jacobi;

pub use inverse::{invert_square, invert_square_into, GaussJordan};
pub use jacobi::{jacobi_singular_values, JacobiReport, JacobiSolver};
