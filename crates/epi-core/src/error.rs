//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    /// A time unit label that does not name any [`TimeUnit`](crate::TimeUnit).
    #[error("unit mismatch: cannot reconcile time unit {0:?}")]
    UnitMismatch(String),

    #[error("division by a zero-length time ({0})")]
    DivideByZero(String),

    #[error("rate {0} is outside [0, 1]")]
    RateOutOfRange(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `epi-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
