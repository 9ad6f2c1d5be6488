//! Detail presenters opened by a row click

use crate::core::money::{format_brl, format_date, format_percent};
use crate::entities::{Customer, Discount, Product, StatMetric};
use crate::render::view::DetailView;

pub fn product(product: &Product) -> DetailView {
    let discount = if product.discount_percent > 0 {
        format!("{}%", product.discount_percent)
    } else {
        "Nenhum".to_string()
    };

    let mut view = DetailView::new("Detalhes do produto")
        .row("Nome", product.name.as_str())
        .row("Tipo", product.kind.label())
        .row("Preço", format_brl(product.price))
        .row("Desconto", discount)
        .row("Pontos de fidelidade", product.loyalty_points.to_string())
        .row(
            "Estoque",
            format!("{} (mínimo: {})", product.stock, product.min_stock),
        )
        .row("Descrição", product.description.as_str());

    // Technical details only exist for some product lines
    if let Some(specs) = &product.hardware_specs {
        view = view.row("Especificações", specs.as_str());
    }
    if let Some(color) = &product.device_color {
        view = view.row("Cor", color.as_str());
    }
    if let Some(connection) = &product.peripheral_connection {
        view = view.row("Conexão", connection.as_str());
    }
    view
}

pub fn discount(discount: &Discount) -> DetailView {
    DetailView::new("Detalhes do desconto")
        .row("Nome", discount.name.as_str())
        .row("Descrição", discount.description.as_str())
        .row("Percentual", format_percent(discount.percent))
        .row("Status", if discount.active { "Ativo" } else { "Inativo" })
}

pub fn customer(customer: &Customer) -> DetailView {
    DetailView::new("Detalhes do cliente")
        .row("Nome", customer.name.as_str())
        .row("Local", customer.location.as_str())
        .row("Total gasto", format_brl(customer.total_spent))
        .row("Data de cadastro", format_date(customer.registered_at))
        .row("E-mail", customer.email.as_deref().unwrap_or("-"))
        .row("Telefone", customer.phone.as_deref().unwrap_or("-"))
}

pub fn metric(metric: &StatMetric) -> DetailView {
    DetailView::new("Detalhes da métrica")
        .row("Métrica", metric.label.as_str())
        .row("Valor", metric.value.as_str())
}
