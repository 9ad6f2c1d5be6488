//! Request and response bodies of the catalog API

use crate::core::discount::{ActiveDiscount, DiscountKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One member of a customer segment list (`GET /clientes/fidelidade`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEntry {
    #[serde(rename = "id_cliente", alias = "id")]
    pub customer_id: i64,
}

/// How the order is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Pix,
    CartaoCredito,
    CartaoDebito,
    Boleto,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Pix,
        PaymentMethod::CartaoCredito,
        PaymentMethod::CartaoDebito,
        PaymentMethod::Boleto,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::CartaoCredito => "Cartão de Crédito",
            PaymentMethod::CartaoDebito => "Cartão de Débito",
            PaymentMethod::Boleto => "Boleto",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::CartaoCredito => "cartao_credito",
            PaymentMethod::CartaoDebito => "cartao_debito",
            PaymentMethod::Boleto => "boleto",
        }
    }

    /// Highest number of installments accepted (credit card only)
    pub fn max_installments(&self) -> u8 {
        match self {
            PaymentMethod::CartaoCredito => 6,
            _ => 1,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "cartao_credito" | "credito" | "credit" => Ok(PaymentMethod::CartaoCredito),
            "cartao_debito" | "debito" | "debit" => Ok(PaymentMethod::CartaoDebito),
            "boleto" => Ok(PaymentMethod::Boleto),
            other => Err(format!("unknown payment method '{}'", other)),
        }
    }
}

/// A purchased product and the price it was sold at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "id_produto")]
    pub product_id: i64,
    #[serde(rename = "preco", with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Discount descriptor sent with the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDiscount {
    #[serde(rename = "tipo")]
    pub kind: DiscountKind,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub percent: Decimal,
    #[serde(rename = "descricao")]
    pub description: String,
}

impl From<&ActiveDiscount> for OrderDiscount {
    fn from(discount: &ActiveDiscount) -> Self {
        Self {
            kind: discount.kind,
            percent: discount.percent,
            description: discount.description.clone(),
        }
    }
}

/// Body of `POST /checkout`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "cliente_id")]
    pub customer_id: i64,
    pub items: Vec<OrderItem>,
    /// Amount due after the discount
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "metodo_pagamento")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "parcelas")]
    pub installments: u8,
    #[serde(rename = "desconto")]
    pub discount: Option<OrderDiscount>,
}

/// Response of `POST /checkout`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(default, alias = "mensagem")]
    pub message: String,
    #[serde(
        default,
        rename = "id_pedido",
        alias = "pedido_id",
        alias = "order_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_id: Option<i64>,
}

/// Error body returned by the API (`{"erro": "..."}`)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(alias = "error", alias = "message")]
    pub erro: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_request_wire_format() {
        let order = OrderRequest {
            customer_id: 1,
            items: vec![OrderItem {
                product_id: 3,
                price: Decimal::new(4990, 2),
            }],
            total: Decimal::new(4491, 2),
            payment_method: PaymentMethod::CartaoCredito,
            installments: 3,
            discount: Some(OrderDiscount {
                kind: DiscountKind::Promocional,
                percent: Decimal::from(10),
                description: "Boas-vindas!".to_string(),
            }),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["cliente_id"], 1);
        assert_eq!(json["items"][0]["id_produto"], 3);
        assert_eq!(json["items"][0]["preco"], 49.9);
        assert_eq!(json["total"], 44.91);
        assert_eq!(json["metodo_pagamento"], "cartao_credito");
        assert_eq!(json["desconto"]["tipo"], "promocional");
        assert_eq!(json["desconto"]["valor"], 10.0);
    }

    #[test]
    fn test_segment_entry_aliases() {
        let entries: Vec<SegmentEntry> =
            serde_json::from_value(json!([{"id_cliente": 4}, {"id": 9}])).unwrap();
        assert_eq!(entries[0].customer_id, 4);
        assert_eq!(entries[1].customer_id, 9);
    }

    #[test]
    fn test_receipt_tolerates_missing_fields() {
        let receipt: OrderReceipt =
            serde_json::from_value(json!({"message": "Pedido registrado"})).unwrap();
        assert_eq!(receipt.message, "Pedido registrado");
        assert_eq!(receipt.order_id, None);
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("credito".parse::<PaymentMethod>(), Ok(PaymentMethod::CartaoCredito));
        assert_eq!(PaymentMethod::Pix.max_installments(), 1);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
