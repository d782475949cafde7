//! Submission error taxonomy
//!
//! Input validation failures are returned to the caller with the book
//! untouched. Anything worse than bad input is an invariant violation and
//! aborts the worker instead of surfacing here.

use thiserror::Error;

/// Errors returned from order submission
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    /// Price is zero or negative
    #[error("bad price value")]
    BadPrice,

    /// Amount is zero or negative
    #[error("bad amount value")]
    BadAmount,
}
