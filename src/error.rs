//! Error types for the Fare and Earnings Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Malformed record data never surfaces here; it is reported through
//! warnings on the calculation results instead.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Fare and Earnings Engine.
///
/// # Example
///
/// ```
/// use taxi_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tiers.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tiers.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A commission rate fell outside the accepted [-1, 1] range.
    #[error("Invalid commission rate {rate} for payment method '{payment_method}': must be between -1 and 1")]
    InvalidCommissionRate {
        /// The payment method the rate was configured for.
        payment_method: String,
        /// The offending rate.
        rate: Decimal,
    },

    /// A reporting period whose end precedes its start, or that was never resolved.
    #[error("Invalid reporting period: {start} to {end}")]
    InvalidPeriod {
        /// The start of the rejected period.
        start: NaiveDateTime,
        /// The end of the rejected period.
        end: NaiveDateTime,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/tiers.yaml".to_string(),
            message: "missing field `night`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/tiers.yaml': missing field `night`"
        );
    }

    #[test]
    fn test_invalid_commission_rate_displays_method_and_rate() {
        let error = EngineError::InvalidCommissionRate {
            payment_method: "gett".to_string(),
            rate: Decimal::from_str("1.5").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid commission rate 1.5 for payment method 'gett': must be between -1 and 1"
        );
    }

    #[test]
    fn test_invalid_period_displays_bounds() {
        let start = NaiveDateTime::parse_from_str("2026-03-10 00:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let end = NaiveDateTime::parse_from_str("2026-03-01 23:59:59", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let error = EngineError::InvalidPeriod { start, end };
        assert_eq!(
            error.to_string(),
            "Invalid reporting period: 2026-03-10 00:00:00 to 2026-03-01 23:59:59"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "decimal overflow".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: decimal overflow");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
