//! Domain entities: products, customers, discounts and store metrics
//!
//! Wire names follow the catalog API (Portuguese keys such as `nome`,
//! `preco`); older payload spellings are accepted through serde aliases.

pub mod customer;
pub mod discount;
pub mod product;
pub mod stat;

pub use customer::Customer;
pub use discount::Discount;
pub use product::{Product, ProductKind};
pub use stat::StatMetric;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

/// Deserialize a decimal that may arrive as a JSON number or a JSON string
///
/// The API serializes `NUMERIC` columns as strings (`"249.90"`); the seeded
/// data uses plain numbers. `null` becomes zero, and so does anything that
/// does not coerce, so one bad cell never costs the whole record.
pub(crate) fn de_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => Some(Decimal::ZERO),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => crate::core::field::coerce_number(s),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        warn!(value = %value, "not a number, using 0");
        Decimal::ZERO
    }))
}

/// Deserialize a non-negative count, tolerating strings and `null`
///
/// Negative or non-numeric counts become 0.
pub(crate) fn de_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => Some(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        warn!(value = %value, "not a count, using 0");
        0
    }))
}

/// Deserialize an optional string, mapping `null` and blanks to `None`
pub(crate) fn de_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "de_decimal")]
        price: Decimal,
        #[serde(default, deserialize_with = "de_count")]
        stock: u32,
    }

    #[test]
    fn test_decimal_from_string_and_number() {
        let from_str: Row = serde_json::from_value(json!({"price": "249.90"})).unwrap();
        assert_eq!(from_str.price, Decimal::new(24990, 2));

        let from_num: Row = serde_json::from_value(json!({"price": 59.9})).unwrap();
        assert_eq!(from_num.price, Decimal::new(599, 1));
    }

    #[test]
    fn test_garbage_falls_back_to_zero() {
        let row: Row =
            serde_json::from_value(json!({"price": "R$ 149,50", "stock": -1})).unwrap();
        assert_eq!(row.price, Decimal::ZERO);
        assert_eq!(row.stock, 0);

        let row: Row = serde_json::from_value(json!({"price": true, "stock": "muitos"})).unwrap();
        assert_eq!(row.price, Decimal::ZERO);
        assert_eq!(row.stock, 0);
    }

    #[test]
    fn test_count_defaults_and_strings() {
        let row: Row = serde_json::from_value(json!({"price": 1})).unwrap();
        assert_eq!(row.stock, 0);

        let row: Row = serde_json::from_value(json!({"price": 1, "stock": "15"})).unwrap();
        assert_eq!(row.stock, 15);

        let row: Row = serde_json::from_value(json!({"price": 1, "stock": null})).unwrap();
        assert_eq!(row.stock, 0);
    }
}
