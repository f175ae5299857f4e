//! Errors surfaced by the calculator engine.

use thiserror::Error;

/// An arithmetic input with no valid real-valued result.
///
/// Operations that fail with a `CalcError` leave the calculator state exactly
/// as it was before the input. The `Display` text is what the caller shows.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("Cannot divide by zero")]
    DivisionByZero,

    #[error("Cannot take the square root of a negative number")]
    NegativeSqrt,

    #[error("Invalid input for {function}")]
    Domain { function: &'static str },
}

impl CalcError {
    pub fn domain(function: &'static str) -> Self {
        Self::Domain { function }
    }
}
