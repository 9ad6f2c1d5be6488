//! Field value types and coercion helpers

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use std::sync::OnceLock;

/// A polymorphic field value read from a record by name
///
/// The filter evaluator only ever sees records through these values, so every
/// entity kind can be filtered by the same code.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    /// Get the value as a string if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a decimal number
    ///
    /// Integers widen, decimals pass through, and strings are coerced with
    /// [`coerce_number`]. Anything else yields `None`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Integer(i) => Some(Decimal::from(*i)),
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::String(s) => coerce_number(s),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Coerce user or wire text into a decimal number
///
/// Accepts surrounding whitespace and a comma as decimal separator
/// (`"49,90"`). Returns `None` for blank or non-numeric input.
pub fn coerce_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains(',') && !trimmed.contains('.') {
        Decimal::from_str(&trimmed.replace(',', ".")).ok()
    } else {
        Decimal::from_str(trimmed).ok()
    }
}

/// Check an email address
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    });
    regex.is_match(email)
}

/// Check a Brazilian-style phone number such as `(11) 98888-7777` or `11988887777`
pub fn is_valid_phone(phone: &str) -> bool {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| {
        // 8 to 15 digits once punctuation is stripped (E.164 upper bound)
        Regex::new(r"^\+?[0-9(][0-9()\s-]{7,19}$").unwrap()
    });
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    regex.is_match(phone.trim()) && (8..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::from("Produto 1");
        assert_eq!(value.as_str(), Some("Produto 1"));
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_integer_widens_to_decimal() {
        let value = FieldValue::from(42_i64);
        assert_eq!(value.as_decimal(), Some(Decimal::from(42)));
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_field_value_numeric_string_coerces() {
        let value = FieldValue::from("49.90");
        assert_eq!(value.as_decimal(), Some(Decimal::new(4990, 2)));
    }

    #[test]
    fn test_field_value_option_none_is_null() {
        let value = FieldValue::from(None::<String>);
        assert!(value.is_null());
        assert_eq!(value.as_decimal(), None);
    }

    #[test]
    fn test_coerce_number_variants() {
        assert_eq!(coerce_number(" 30 "), Some(Decimal::from(30)));
        assert_eq!(coerce_number("49,90"), Some(Decimal::new(4990, 2)));
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("   "), None);
        assert_eq!(coerce_number("abc"), None);
        assert_eq!(coerce_number("1.000,50"), None);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ana.souza@email.com"));
        assert!(!is_valid_email("ana.souza"));
        assert!(!is_valid_email("@email.com"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("11988887777"));
        assert!(is_valid_phone("(11) 9001-0000"));
        assert!(is_valid_phone("+55 11 98888-7777"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("phone"));
    }
}
