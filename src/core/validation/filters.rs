//! Field normalizers applied before validation
//!
//! Form input arrives as typed by the user; these helpers clean it up so the
//! rules see canonical values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Trim surrounding whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Trim and collapse inner runs of whitespace to one space
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim and lowercase
pub fn lowercase(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trim an optional value, mapping blanks to `None`
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Round a money amount to cents
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        assert_eq!(trim("  hello  "), "hello");
        assert_eq!(trim("   "), "");
    }

    // === collapse_whitespace() ===

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Ana   Souza "), "Ana Souza");
    }

    // === lowercase() ===

    #[test]
    fn test_lowercase_trims() {
        assert_eq!(lowercase(" Ana@Email.COM "), "ana@email.com");
    }

    // === blank_to_none() ===

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(Some("  ")), None);
        assert_eq!(blank_to_none(Some(" 1199 ")), Some("1199".to_string()));
        assert_eq!(blank_to_none(None), None);
    }

    // === round_cents() ===

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_cents(Decimal::from(10)), Decimal::from(10));
    }
}
