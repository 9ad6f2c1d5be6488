//! Custom rules for `#[validate(custom(function = ...))]`
//!
//! Each rule returns a `validator::ValidationError` carrying a short code and a
//! Portuguese message suitable for the form alert.

use crate::core::field::{is_valid_email, is_valid_phone};
use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::ValidationError;

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Rule: text must contain something other than whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(rule_error("required", "campo obrigatório"))
    } else {
        Ok(())
    }
}

/// Rule: stricter email check than the built-in one (requires a dotted domain)
pub fn email_address(value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value.trim()) {
        Ok(())
    } else {
        Err(rule_error("email", "e-mail inválido"))
    }
}

/// Rule: phone number with 8 to 15 digits
pub fn phone(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(rule_error("phone", "telefone inválido"))
    }
}

/// Rule: price must be strictly positive
pub fn positive_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(rule_error("positive", "o preço deve ser positivo"))
    }
}

/// Rule: percentage within 0..=100
pub fn percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO && *value <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        Err(rule_error("percentage", "percentual deve estar entre 0 e 100"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === not_blank() ===

    #[test]
    fn test_not_blank_rejects_whitespace() {
        let err = not_blank("   ").unwrap_err();
        assert_eq!(err.code, "required");
        assert!(not_blank("Ana").is_ok());
    }

    // === email_address() ===

    #[test]
    fn test_email_address() {
        assert!(email_address("ana@email.com").is_ok());
        assert!(email_address("ana@localhost").is_err());
    }

    // === phone() ===

    #[test]
    fn test_phone_formats() {
        assert!(phone("(11) 9001-0000").is_ok());
        assert!(phone("11988887777").is_ok());
        assert!(phone("123").is_err());
        assert!(phone("abc-defg-hij").is_err());
    }

    // === positive_price() ===

    #[test]
    fn test_positive_price() {
        assert!(positive_price(&Decimal::new(1, 2)).is_ok());
        assert!(positive_price(&Decimal::ZERO).is_err());
        assert!(positive_price(&Decimal::from(-5)).is_err());
    }

    // === percentage() ===

    #[test]
    fn test_percentage_bounds() {
        assert!(percentage(&Decimal::ZERO).is_ok());
        assert!(percentage(&Decimal::ONE_HUNDRED).is_ok());
        assert!(percentage(&Decimal::from(101)).is_err());
    }
}
