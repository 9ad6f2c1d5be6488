//! Customer entity

use super::{de_count, de_decimal, de_opt_text};
use crate::core::entity::Record;
use crate::core::field::FieldValue;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    // Accept full timestamps by keeping the date prefix
    Ok(raw.and_then(|s| {
        let date = s.get(..10).unwrap_or(&s);
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }))
}

/// A registered customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    #[serde(alias = "id_cliente")]
    pub id: i64,

    #[serde(rename = "nome", alias = "nome_cliente")]
    pub name: String,

    #[serde(rename = "local", alias = "cidade", default)]
    pub location: String,

    #[serde(
        rename = "total_gasto",
        alias = "totalGasto",
        default,
        deserialize_with = "de_decimal"
    )]
    pub total_spent: Decimal,

    #[serde(
        rename = "data_cadastro",
        alias = "dataCadastro",
        default,
        deserialize_with = "de_opt_date"
    )]
    pub registered_at: Option<NaiveDate>,

    #[serde(default, deserialize_with = "de_opt_text")]
    pub email: Option<String>,

    #[serde(rename = "telefone", default, deserialize_with = "de_opt_text")]
    pub phone: Option<String>,

    #[serde(
        rename = "pontos",
        alias = "pontosFidelidade",
        alias = "pontos_acumulados",
        default,
        deserialize_with = "de_count"
    )]
    pub loyalty_points: u32,
}

impl Customer {
    pub fn new(id: i64, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            total_spent: Decimal::ZERO,
            registered_at: None,
            email: None,
            phone: None,
            loyalty_points: 0,
        }
    }
}

impl Record for Customer {
    fn kind() -> &'static str {
        "customer"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "name" => self.name.as_str().into(),
            "location" => self.location.as_str().into(),
            "total_spent" => self.total_spent.into(),
            "loyalty_points" => self.loyalty_points.into(),
            "email" => self.email.clone().into(),
            "phone" => self.phone.clone().into(),
            "registered_at" => self
                .registered_at
                .map(FieldValue::Date)
                .unwrap_or(FieldValue::Null),
            _ => return None,
        };
        Some(value)
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "name",
            "location",
            "total_spent",
            "loyalty_points",
            "email",
            "phone",
            "registered_at",
        ]
    }
}
