//! Error types for pension calculations

use thiserror::Error;

/// Result type for pension calculations
pub type PensionResult<T> = Result<T, PensionError>;

/// Reasons a pension request cannot be priced
///
/// Every variant except `InvalidRequestShape` is raised by the rate calculator.
/// Shape errors come from the input layers (console, CLI, CSV loader) before a
/// request ever reaches the calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PensionError {
    /// Base liquidation income is zero, negative or not a number
    #[error("base income must be greater than 0 (got {base_income})")]
    InvalidIncome { base_income: f64 },

    /// Old-age request below the minimum contributed weeks
    #[error("{weeks} weeks contributed, at least {required} are required")]
    InsufficientWeeks { weeks: u32, required: u32 },

    /// Old-age request from a man below the minimum age
    #[error("men must be at least {required} years old (got {age})")]
    BelowMinimumAgeMale { age: u32, required: u32 },

    /// Old-age request from a woman below the minimum age
    #[error("women must be at least {required} years old (got {age})")]
    BelowMinimumAgeFemale { age: u32, required: u32 },

    /// Disability request with a loss percentage at or below the threshold
    #[error("disability loss must be greater than {threshold}% (got {loss_percent}%)")]
    InvalidDisabilityLoss { loss_percent: f64, threshold: f64 },

    /// Missing or malformed field for the requested pension type
    #[error("invalid input: {0}")]
    InvalidRequestShape(String),
}

impl PensionError {
    /// Shorthand for building a shape error
    pub fn shape(message: impl Into<String>) -> Self {
        PensionError::InvalidRequestShape(message.into())
    }

    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            PensionError::InvalidIncome { .. } => "invalid_income",
            PensionError::InsufficientWeeks { .. } => "insufficient_weeks",
            PensionError::BelowMinimumAgeMale { .. } => "below_minimum_age_male",
            PensionError::BelowMinimumAgeFemale { .. } => "below_minimum_age_female",
            PensionError::InvalidDisabilityLoss { .. } => "invalid_disability_loss",
            PensionError::InvalidRequestShape(_) => "invalid_request_shape",
        }
    }
}
