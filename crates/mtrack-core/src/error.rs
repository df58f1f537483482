//! # Validation Errors
//!
//! Client-side form checks fail with a [`ValidationError`]. Its `Display`
//! text is shown to the user as-is.

use thiserror::Error;

use crate::amount::Amount;

/// A draft failed a client-side check before being sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Milestone percentages add up to more than 100.
    #[error("Total payment percentage cannot exceed 100%. Current total: {0}%")]
    PercentageOverflow(Amount),

    /// Milestone percentages add up to less than zero.
    #[error("Total payment percentage cannot be negative. Current total: {0}%")]
    NegativePercentage(Amount),

    /// A milestone lands more than ten years after project start.
    #[error("Milestone {index}: Date is more than 10 years from project start")]
    MilestoneTooFar {
        /// 1-based position of the offending milestone.
        index: usize,
    },

    /// A required text field is blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// A text field is longer than the backend column allows.
    #[error("{field} cannot exceed {max} characters")]
    TooLong {
        /// Human-readable field name.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// A quantity or amount is zero or negative.
    #[error("{0} must be greater than 0")]
    NotPositive(&'static str),
}
