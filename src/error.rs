//! Error type for the fallible matrix operations.

use crate::CpxMat;

/// Errors returned by [`CpxMat`] operations.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum M2cError {
    /// The matrix has a determinant equal to exactly zero and has no inverse.
    #[error("cannot invert a matrix with determinant 0:\n{matrix}")]
    SingularMatrix {
        /// The matrix that was passed to [`CpxMat::inv`].
        matrix: CpxMat,
    },
}

/// Shorthand for results carrying an [`M2cError`].
pub type Result<T> = core::result::Result<T, M2cError>;
