//! Form validation for the create-customer and create-product flows
//!
//! A form is first normalized with [`filters`], then checked with
//! `validator` derive rules (plus the custom rules in [`validators`]).
//! Failures come back as a single [`ValidationError::Fields`] listing every
//! offending field in form order.

pub mod filters;
pub mod validators;

use super::error::{FieldIssue, ValidationError};
use crate::entities::ProductKind;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;

/// A user-filled form that can be normalized and validated
pub trait Form: Validate + Serialize {
    /// `(field, label)` pairs in display order
    const FIELDS: &'static [(&'static str, &'static str)];

    /// Clean up user input in place
    fn normalize(&mut self);
}

/// Normalize and validate a form, returning the cleaned form
pub fn validate_form<F: Form>(mut form: F) -> Result<F, ValidationError> {
    form.normalize();

    let Err(errors) = form.validate() else {
        return Ok(form);
    };

    let field_errors = errors.field_errors();
    let mut issues: Vec<FieldIssue> = F::FIELDS
        .iter()
        .filter_map(|(field, label)| {
            let errs = field_errors.get(*field)?;
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(ToString::to_string))
                .or_else(|| errs.first().map(|e| e.code.to_string()))
                .unwrap_or_default();
            Some(FieldIssue {
                field: (*label).to_string(),
                message,
            })
        })
        .collect();

    // Anything not listed in FIELDS goes last, by name
    let mut extra: Vec<FieldIssue> = field_errors
        .keys()
        .map(|k| k.to_string())
        .filter(|name| !F::FIELDS.iter().any(|(f, _)| *f == name.as_str()))
        .map(|field| FieldIssue {
            field,
            message: "inválido".to_string(),
        })
        .collect();
    extra.sort_by(|a, b| a.field.cmp(&b.field));
    issues.extend(extra);

    Err(ValidationError::Fields(issues))
}

/// Body of `POST /clientes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct NewCustomer {
    #[serde(rename = "nome")]
    #[validate(custom(function = "validators::not_blank"), length(max = 120))]
    pub name: String,

    #[validate(custom(function = "validators::email_address"))]
    pub email: String,

    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validators::phone"))]
    pub phone: Option<String>,
}

impl Form for NewCustomer {
    const FIELDS: &'static [(&'static str, &'static str)] =
        &[("name", "nome"), ("email", "email"), ("phone", "telefone")];

    fn normalize(&mut self) {
        self.name = filters::collapse_whitespace(&self.name);
        self.email = filters::lowercase(&self.email);
        self.phone = filters::blank_to_none(self.phone.as_deref());
    }
}

/// Body of `POST /produtos`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    #[validate(custom(function = "validators::not_blank"), length(max = 120))]
    pub name: String,

    #[serde(rename = "preco_atual")]
    #[validate(custom(function = "validators::positive_price"))]
    pub price: Decimal,

    #[serde(rename = "descricao")]
    pub description: String,

    #[serde(rename = "tipo_produto", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProductKind>,

    #[serde(rename = "desconto_percent")]
    #[validate(custom(function = "validators::percentage"))]
    pub discount_percent: Decimal,
}

impl Form for NewProduct {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "nome"),
        ("price", "preço"),
        ("description", "descrição"),
        ("discount_percent", "desconto"),
    ];

    fn normalize(&mut self) {
        self.name = filters::collapse_whitespace(&self.name);
        self.description = filters::trim(&self.description);
        self.price = filters::round_cents(self.price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_customer_is_normalized() {
        let form = NewCustomer {
            name: "  Ana   Souza ".to_string(),
            email: " ANA@Email.com".to_string(),
            phone: Some("   ".to_string()),
        };
        let form = validate_form(form).unwrap();
        assert_eq!(form.name, "Ana Souza");
        assert_eq!(form.email, "ana@email.com");
        assert_eq!(form.phone, None);
    }

    #[test]
    fn test_invalid_customer_lists_fields_in_order() {
        let form = NewCustomer {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            phone: Some("12".to_string()),
        };
        let err = validate_form(form).unwrap_err();
        assert_eq!(
            err.user_message(),
            "Preencha corretamente: nome, email, telefone"
        );
        assert_eq!(err.issues()[0].message, "campo obrigatório");
    }

    #[test]
    fn test_product_price_must_be_positive() {
        let form = NewProduct {
            name: "Webcam".to_string(),
            price: Decimal::ZERO,
            ..Default::default()
        };
        let err = validate_form(form).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].field, "preço");
    }

    #[test]
    fn test_new_product_wire_format() {
        let form = validate_form(NewProduct {
            name: "Webcam".to_string(),
            price: Decimal::new(199999, 3),
            kind: Some(ProductKind::Periferico),
            ..Default::default()
        })
        .unwrap();

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["nome"], "Webcam");
        assert_eq!(json["preco_atual"], "200.00");
        assert_eq!(json["tipo_produto"], "Periférico");
    }
}
