//! Failure modes of the crate.
//!
//! None of them are retried internally: a failing operation aborts the session that requested it,
//! and it is up to the caller to try again with corrected input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Attempted inversion of a 2×2 matrix with `|det| < 1e-10`.
  #[error("matrix is singular (det = {det:e})")]
  SingularMatrix { det: f64 },
  /// An IFS needs at least two maps.
  #[error("invalid number of transformations: {0}, at least 2 are required")]
  InvalidTransformCount(usize),
  /// The arena holding every generation level does not fit into `usize`.
  #[error("point budget overflow: m = {m} maps over {levels} levels")]
  PointBudgetOverflow { m: usize, levels: u32 },
  /// Operand shapes disagree, as `(rows, cols)`.
  #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
  DimensionMismatch { expected: (usize, usize), found: (usize, usize) },
  #[error("invalid parameter: {0}")]
  InvalidParameter(String),
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[cfg(feature = "drawing")]
  #[error(transparent)]
  Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
