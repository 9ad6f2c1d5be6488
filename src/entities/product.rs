//! Product entity

use super::{de_count, de_decimal, de_opt_text};
use crate::core::entity::Record;
use crate::core::field::FieldValue;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Product line, as exposed by the `tipo` column of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    Hardware,
    Dispositivo,
    #[serde(rename = "Periférico", alias = "Periferico")]
    Periferico,
    Outro,
}

impl ProductKind {
    /// Kinds offered in the filter form, in display order
    pub const ALL: [ProductKind; 3] = [
        ProductKind::Dispositivo,
        ProductKind::Hardware,
        ProductKind::Periferico,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Hardware => "Hardware",
            ProductKind::Dispositivo => "Dispositivo",
            ProductKind::Periferico => "Periférico",
            ProductKind::Outro => "Outro",
        }
    }

    /// Parse a label; unknown or blank kinds fall back to `Outro`
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Hardware" => ProductKind::Hardware,
            "Dispositivo" => ProductKind::Dispositivo,
            "Periférico" | "Periferico" => ProductKind::Periferico,
            _ => ProductKind::Outro,
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn de_kind<'de, D>(deserializer: D) -> Result<ProductKind, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label
        .as_deref()
        .map(ProductKind::from_label)
        .unwrap_or(ProductKind::Outro))
}

fn default_kind() -> ProductKind {
    ProductKind::Outro
}

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(alias = "id_produto")]
    pub id: i64,

    #[serde(rename = "nome", alias = "nome_produto")]
    pub name: String,

    #[serde(
        rename = "tipo",
        alias = "tipo_produto",
        default = "default_kind",
        deserialize_with = "de_kind"
    )]
    pub kind: ProductKind,

    #[serde(
        rename = "preco",
        alias = "preco_atual",
        alias = "preco_unitario",
        deserialize_with = "de_decimal"
    )]
    pub price: Decimal,

    #[serde(
        rename = "desconto_percent",
        alias = "descontoPercent",
        default,
        deserialize_with = "de_count"
    )]
    pub discount_percent: u32,

    #[serde(
        rename = "pontos_fidelidade",
        alias = "pontosFidelidade",
        default,
        deserialize_with = "de_count"
    )]
    pub loyalty_points: u32,

    #[serde(
        rename = "estoque",
        alias = "estoqueAtual",
        alias = "estoque_atual",
        default,
        deserialize_with = "de_count"
    )]
    pub stock: u32,

    #[serde(
        rename = "estoque_minimo",
        alias = "estoqueMinimo",
        default,
        deserialize_with = "de_count"
    )]
    pub min_stock: u32,

    #[serde(rename = "descricao", default)]
    pub description: String,

    #[serde(
        rename = "specs_hardware",
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub hardware_specs: Option<String>,

    #[serde(
        rename = "cor_dispositivo",
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_color: Option<String>,

    #[serde(
        rename = "conexao_periferico",
        default,
        deserialize_with = "de_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub peripheral_connection: Option<String>,
}

impl Product {
    /// Create a product with no stock and no technical details
    pub fn new(id: i64, name: impl Into<String>, kind: ProductKind, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            price,
            discount_percent: 0,
            loyalty_points: 0,
            stock: 0,
            min_stock: 0,
            description: String::new(),
            hardware_specs: None,
            device_color: None,
            peripheral_connection: None,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Stock is below the configured minimum
    pub fn low_stock(&self) -> bool {
        self.stock < self.min_stock
    }

    /// Price times units in stock
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.stock)
    }
}

impl Record for Product {
    fn kind() -> &'static str {
        "product"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "name" => self.name.as_str().into(),
            "kind" => self.kind.label().into(),
            "price" => self.price.into(),
            "discount_percent" => self.discount_percent.into(),
            "loyalty_points" => self.loyalty_points.into(),
            "stock" => self.stock.into(),
            "min_stock" => self.min_stock.into(),
            "description" => self.description.as_str().into(),
            _ => return None,
        };
        Some(value)
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "name",
            "kind",
            "price",
            "discount_percent",
            "loyalty_points",
            "stock",
            "min_stock",
            "description",
        ]
    }
}
