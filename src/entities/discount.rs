//! Discount catalog entry (store-managed coupons)

use super::de_decimal;
use crate::core::entity::Record;
use crate::core::field::FieldValue;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// A discount campaign listed on the discounts screens
///
/// The only in-session mutation is toggling `active`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    pub id: i64,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "descricao", default)]
    pub description: String,

    #[serde(
        rename = "percentual",
        alias = "porcentagem",
        default,
        deserialize_with = "de_decimal"
    )]
    pub percent: Decimal,

    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
}

impl Discount {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        percent: Decimal,
        active: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            percent,
            active,
        }
    }

    /// Flip the active flag and return the new value
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }
}

impl Record for Discount {
    fn kind() -> &'static str {
        "discount"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "name" => self.name.as_str().into(),
            "description" => self.description.as_str().into(),
            "percent" => self.percent.into(),
            "active" => self.active.into(),
            _ => return None,
        };
        Some(value)
    }

    fn field_names() -> &'static [&'static str] {
        &["name", "description", "percent", "active"]
    }
}
