//! Boundary field validation
//!
//! The transfer engine assumes its inputs are already well-formed. These checks
//! run wherever a request enters the system (HTTP handler, CLI, tests).

use rust_decimal::Decimal;

/// Field-level validation errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must not be negative: got {value}")]
    Negative { field: &'static str, value: Decimal },
}

/// Account ids are opaque and case-sensitive; the only rule is non-empty.
pub fn validate_account_id(field: &'static str, id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Balances and transfer amounts arrive as `>= 0`. Zero is allowed here;
/// the engine decides whether a zero transfer is acceptable.
pub fn validate_non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id() {
        assert!(validate_account_id("accountId", "Id-123").is_ok());
        assert_eq!(
            validate_account_id("accountId", ""),
            Err(ValidationError::Empty { field: "accountId" })
        );
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative("amount", Decimal::ZERO).is_ok());
        assert!(validate_non_negative("amount", Decimal::new(1, 2)).is_ok());

        let err = validate_non_negative("amount", Decimal::new(-5, 1)).unwrap_err();
        assert_eq!(err.to_string(), "amount must not be negative: got -0.5");
    }
}
