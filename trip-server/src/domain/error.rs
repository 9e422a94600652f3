//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from routing/IO errors.

use rust_decimal::Decimal;

/// Domain-level errors for input validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Planned distance is zero or negative
    #[error("trip distance must be positive (got {0} miles)")]
    NonPositiveDistance(Decimal),

    /// Cycle hours outside the 0..=70 window
    #[error("current cycle hours must be between 0 and {max} (got {value})")]
    CycleHoursOutOfRange { value: Decimal, max: Decimal },

    /// A required label or name is empty
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn error_display() {
        let err = DomainError::NonPositiveDistance(dec!(0));
        assert_eq!(err.to_string(), "trip distance must be positive (got 0 miles)");

        let err = DomainError::CycleHoursOutOfRange {
            value: dec!(71.5),
            max: dec!(70),
        };
        assert_eq!(
            err.to_string(),
            "current cycle hours must be between 0 and 70 (got 71.5)"
        );

        let err = DomainError::EmptyField("pickup location");
        assert_eq!(err.to_string(), "pickup location must not be empty");
    }
}
