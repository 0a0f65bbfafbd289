//! Error types for Parkwise
//!
//! Provides a unified error type and the quote-boundary error variants

use thiserror::Error;

/// Result type alias using ParkwiseError
pub type Result<T> = std::result::Result<T, ParkwiseError>;

/// Unified error type for Parkwise operations
#[derive(Debug, Error)]
pub enum ParkwiseError {
    // Boundary validation errors
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    // Roster and file errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while turning raw booking input into a pricing request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("Duration {unit} must be >= 0, got {value}")]
    NegativeDuration { unit: &'static str, value: i64 },

    #[error("Duration {unit} out of range: {value}")]
    DurationOutOfRange { unit: &'static str, value: i64 },

    #[error("Duration cannot be zero")]
    ZeroDuration,

    #[error("Booking duration exceeds the {max_days}-day maximum")]
    DurationExceedsMaximum { max_days: i64 },

    #[error("Start must be in the future")]
    StartNotInFuture,

    #[error("Occupancy {field} must be >= 0, got {value}")]
    NegativeOccupancy { field: &'static str, value: i64 },

    #[error("Invalid occupancy: {occupied} occupied of {total} total")]
    InvalidOccupancy { occupied: u64, total: u64 },

    #[error("Loyalty points must be a finite non-negative number")]
    InvalidLoyaltyPoints,

    #[error("Plate cannot be empty")]
    EmptyPlate,

    #[error("Plate is required for a booking quote")]
    MissingPlate,

    #[error("Nothing to charge: booking costs 0")]
    NothingToCharge,
}

impl From<serde_json::Error> for ParkwiseError {
    fn from(err: serde_json::Error) -> Self {
        ParkwiseError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ParkwiseError {
    fn from(err: std::io::Error) -> Self {
        ParkwiseError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for ParkwiseError {
    fn from(err: anyhow::Error) -> Self {
        ParkwiseError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParkwiseError::Quote(QuoteError::NegativeDuration {
            unit: "hours",
            value: -3,
        });
        assert_eq!(err.to_string(), "Quote error: Duration hours must be >= 0, got -3");
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "subscribers.txt");
        let err: ParkwiseError = io.into();
        assert!(matches!(err, ParkwiseError::Storage(ref msg) if msg.contains("subscribers.txt")));
    }
}
