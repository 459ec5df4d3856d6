//! Error taxonomy shared across the library
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use thiserror::Error;

/// Library-level errors.
///
/// An empty query result is `Option::None` at the call site, never an error;
/// scheduling exhaustion is logged by the scheduler and never surfaces here.
#[derive(Debug, Error)]
pub enum CoachError {
    /// Bad user input: empty text, non-numeric settings, out-of-range hours,
    /// unknown timezone. Recovered locally as a usage message; no state is
    /// mutated.
    #[error("{0}")]
    Validation(String),

    /// Backend connectivity or statement failure. Not retried here.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    /// A result column the gateway cannot represent.
    #[error("unsupported column in result row: {0}")]
    Decode(String),
}

impl CoachError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CoachError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;
