// Error types for the carbon calculator library

use thiserror::Error;

/// Errors raised by the factor table and the calculation path.
///
/// Only `UnknownCountry` can come out of a calculation. The remaining
/// variants are produced while loading a factor table at startup.
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// Selected country has no row in the factor table.
    #[error("Unknown country: {country}")]
    UnknownCountry {
        /// The country that was requested
        country: String,
    },

    /// A coefficient in a loaded table is negative or not a finite number.
    #[error("Invalid {field} factor for {country}: {value}")]
    InvalidFactor {
        country: String,
        field: &'static str,
        value: f64,
    },

    /// The same country appears twice in a loaded table.
    #[error("Duplicate country in factor table: {0}")]
    DuplicateCountry(String),

    /// A loaded table contains no countries.
    #[error("Factor table is empty")]
    EmptyTable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalculatorError {
    /// Shorthand used by lookups.
    pub fn unknown_country(country: impl Into<String>) -> Self {
        CalculatorError::UnknownCountry {
            country: country.into(),
        }
    }

    /// True for the invariant violation a guarded selection UI should never hit.
    pub fn is_unknown_country(&self) -> bool {
        matches!(self, CalculatorError::UnknownCountry { .. })
    }
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
