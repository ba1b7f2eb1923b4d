use thiserror::Error;

/// Errors raised by matrix construction, views, arithmetic and the solvers.
///
/// Every failure is reported at the offending call; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("bad dimension: {0}")]
    Dimension(String),

    #[error("bad row access: row {row} out of range for {rows} rows")]
    RowAccess { row: usize, rows: usize },

    #[error("bad column access: column {col} out of range for {cols} columns")]
    ColAccess { col: usize, cols: usize },

    #[error("aliased data: output shares a backing buffer with an input")]
    Aliased,

    #[error("matrix is singular to working precision (pivot {pivot} at row {row})")]
    Singular { row: usize, pivot: f64 },

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("jacobi sweeps did not converge after {sweeps} sweeps")]
    NoConvergence { sweeps: usize },
}

/// Plain discriminant of a [`LinalgError`], handy for matching in callers
/// that do not care about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Dimension,
    RowAccess,
    ColAccess,
    Aliased,
    Singular,
    Unsupported,
    NoConvergence,
}

impl LinalgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinalgError::Dimension(_) => ErrorKind::Dimension,
            LinalgError::RowAccess { .. } => ErrorKind::RowAccess,
            LinalgError::ColAccess { .. } => ErrorKind::ColAccess,
            LinalgError::Aliased => ErrorKind::Aliased,
            LinalgError::Singular { .. } => ErrorKind::Singular,
            LinalgError::Unsupported(_) => ErrorKind::Unsupported,
            LinalgError::NoConvergence { .. } => ErrorKind::NoConvergence,
        }
    }

    pub(crate) fn shape_mismatch(expected: (usize, usize), got: (usize, usize)) -> Self {
        LinalgError::Dimension(format!(
            "expected shape ({}, {}), got ({}, {})",
            expected.0, expected.1, got.0, got.1
        ))
    }

    pub(crate) fn buffer_len(rows: usize, cols: usize, len: usize) -> Self {
        LinalgError::Dimension(format!(
            "invalid shape ({}, {}) for buffer of length {}",
            rows, cols, len
        ))
    }
}

pub type Result<T> = std::result::Result<T, LinalgError>;
