//! Admin dashboard: summary cards over the customer base

use super::{ScreenContext, Screen, ScreenList, detail};
use crate::core::money::format_brl;
use crate::entities::Customer;
use crate::render::column::Column;
use crate::render::list::PaginatedList;
use crate::render::view::{ScreenView, StatCard};
use crate::shell::loader::Section;

fn card(label: &str, value: String) -> StatCard {
    StatCard {
        label: label.to_string(),
        value,
    }
}

pub fn build(ctx: &ScreenContext<'_>) -> Screen {
    let catalog = &ctx.state.catalog;
    let mut view = ScreenView::new("admin", "Painel Administrativo", "Base de Clientes");
    view.cards = vec![
        card("Clientes Ativos", catalog.customers.len().to_string()),
        card("Produtos Cadastrados", catalog.products.len().to_string()),
        card("Valor em Estoque", format_brl(catalog.stock_value())),
    ];
    ctx.push_failures(&mut view, &[Section::Customers, Section::Products]);

    let columns = vec![
        Column::text("ID", |c: &Customer| format!("#{}", c.id)),
        Column::text("Nome", |c: &Customer| c.name.clone()),
        Column::text("Local", |c: &Customer| c.location.clone()),
        Column::text("Pontos Fidelidade", |c: &Customer| c.loyalty_points.to_string()),
    ];
    let modal = ctx.modal.clone();
    let list = PaginatedList::new(catalog.customers.clone(), columns, ctx.page_size())
        .on_row_click(move |c: &Customer| modal.open(detail::customer(c)));

    Screen::new(view, ScreenList::Customers(list))
}
