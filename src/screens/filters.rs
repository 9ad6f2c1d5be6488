//! Filter modals and the active-filter summary shown above a list

use crate::core::filter::{CustomerFilters, ProductFilters};
use crate::entities::ProductKind;
use crate::render::view::{FilterField, FilterFormView};

pub fn product_form(filters: &ProductFilters, kinds: &[ProductKind]) -> FilterFormView {
    let kind = filters.kind.map(|k| k.label()).unwrap_or_default();
    FilterFormView {
        title: "Filtros de Produtos".to_string(),
        target: "products".to_string(),
        fields: vec![
            FilterField::text("nome", "Nome", &filters.name),
            FilterField::select(
                "tipo",
                "Tipo",
                kind,
                kinds.iter().map(|k| k.label().to_string()).collect(),
            ),
            FilterField::number("preco_min", "Preço mínimo", &filters.price_min),
            FilterField::number("preco_max", "Preço máximo", &filters.price_max),
            FilterField::number("desconto", "Desconto mínimo (%)", &filters.min_discount),
        ],
    }
}

pub fn customer_form(filters: &CustomerFilters) -> FilterFormView {
    FilterFormView {
        title: "Filtros de Clientes".to_string(),
        target: "customers".to_string(),
        fields: vec![
            FilterField::text("nome", "Nome", &filters.name),
            FilterField::text("local", "Local (cidade, estado ou país)", &filters.location),
            FilterField::number("gasto_min", "Total gasto mínimo", &filters.spent_min),
            FilterField::number("gasto_max", "Total gasto máximo", &filters.spent_max),
            FilterField::number(
                "fidelidade_min",
                "Pontuação fidelidade mínima",
                &filters.min_points,
            ),
        ],
    }
}

fn push_if_set(out: &mut Vec<String>, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        out.push(format!("{}: {}", label, value));
    }
}

/// `["Tipo: Hardware", "Preço mínimo: 30"]`
pub fn product_summary(filters: &ProductFilters) -> Vec<String> {
    let mut out = Vec::new();
    push_if_set(&mut out, "Nome", &filters.name);
    if let Some(kind) = filters.kind {
        out.push(format!("Tipo: {}", kind));
    }
    push_if_set(&mut out, "Preço mínimo", &filters.price_min);
    push_if_set(&mut out, "Preço máximo", &filters.price_max);
    push_if_set(&mut out, "Desconto mínimo (%)", &filters.min_discount);
    out
}

pub fn customer_summary(filters: &CustomerFilters) -> Vec<String> {
    let mut out = Vec::new();
    push_if_set(&mut out, "Nome", &filters.name);
    push_if_set(&mut out, "Local", &filters.location);
    push_if_set(&mut out, "Total gasto mínimo", &filters.spent_min);
    push_if_set(&mut out, "Total gasto máximo", &filters.spent_max);
    push_if_set(&mut out, "Pontuação fidelidade mínima", &filters.min_points);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_form_keeps_values() {
        let filters = ProductFilters {
            kind: Some(ProductKind::Hardware),
            price_min: "30".to_string(),
            ..Default::default()
        };
        let form = product_form(&filters, &ProductKind::ALL);
        assert_eq!(form.title, "Filtros de Produtos");
        assert_eq!(form.fields[1].value, "Hardware");
        assert_eq!(form.fields[1].options.len(), 3);
        assert_eq!(form.fields[2].value, "30");
        assert_eq!(form.fields[2].input, "number");
    }

    #[test]
    fn test_summaries_skip_blank_fields() {
        let filters = ProductFilters {
            name: "  ".to_string(),
            kind: Some(ProductKind::Periferico),
            price_min: "30".to_string(),
            ..Default::default()
        };
        assert_eq!(
            product_summary(&filters),
            vec!["Tipo: Periférico", "Preço mínimo: 30"]
        );
        assert!(customer_summary(&CustomerFilters::default()).is_empty());
    }

    #[test]
    fn test_customer_form_title() {
        let form = customer_form(&CustomerFilters::default());
        assert_eq!(form.title, "Filtros de Clientes");
        assert_eq!(form.fields.len(), 5);
    }
}
