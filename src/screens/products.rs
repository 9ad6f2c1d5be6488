//! Product screens: customer catalog, store product list and stock
//!
//! One controller covers all three. What it shows is decided by the role's
//! capabilities and the page: shoppers get an add-to-cart column, the stock
//! page swaps loyalty points for a current/minimum stock column.

use super::filters::product_summary;
use super::{ScreenAction, ScreenContext, Screen, ScreenList, detail};
use crate::core::money::format_brl;
use crate::core::navigation::SubPage;
use crate::entities::Product;
use crate::render::column::{Cell, Column, Tone};
use crate::render::list::PaginatedList;
use crate::render::view::{ButtonView, ScreenView};
use crate::shell::loader::Section;
use std::collections::HashSet;

fn discount_text(product: &Product) -> String {
    if product.discount_percent > 0 {
        format!("{}%", product.discount_percent)
    } else {
        "-".to_string()
    }
}

/// Columns shared by every product table
fn base_columns() -> Vec<Column<Product>> {
    vec![
        Column::text("Nome", |p: &Product| p.name.clone()),
        Column::text("Tipo", |p: &Product| p.kind.label()),
        Column::text("Preço", |p: &Product| format_brl(p.price)),
        Column::text("Desconto", discount_text),
    ]
}

fn loyalty_column() -> Column<Product> {
    Column::text("Pontos fidelidade", |p: &Product| p.loyalty_points.to_string())
}

fn stock_column() -> Column<Product> {
    Column::new("Estoque", |p: &Product| {
        let text = format!("{} / {}", p.stock, p.min_stock);
        if p.low_stock() {
            Cell::text_with_badge(text, "Baixo", Tone::Warning)
        } else {
            Cell::text_with_badge(text, "OK", Tone::Success)
        }
    })
}

/// Add-to-cart button; shows "Adicionado!" once the product is in the cart
fn add_to_cart_column(ctx: &ScreenContext<'_>) -> Column<Product> {
    let in_cart: HashSet<i64> = ctx.state.cart.ids().iter().copied().collect();
    let store = ctx.store.clone();
    Column::action(
        "",
        move |p: &Product| {
            if in_cart.contains(&p.id) {
                Cell::disabled_action("Adicionado!", Tone::Success)
            } else if !p.in_stock() {
                Cell::disabled_action("Sem estoque", Tone::Muted)
            } else {
                Cell::action("Adicionar ao carrinho", Tone::Primary)
            }
        },
        move |p: &Product| {
            store.add_to_cart(p.id)?;
            Ok(())
        },
    )
}

fn header(page: SubPage) -> (&'static str, &'static str) {
    match page {
        SubPage::Catalog => (
            "Catálogo de produtos",
            "Produtos disponíveis para compra. Clique para mais detalhes e adicione ao carrinho!",
        ),
        SubPage::Stock => ("Estoque", "Quantidade atual e mínima de estoque por produto."),
        _ => (
            "Produtos (Visão da Loja)",
            "Lista de produtos cadastrados. Clique em um produto para ver mais detalhes.",
        ),
    }
}

pub fn build(ctx: &ScreenContext<'_>, page: SubPage) -> Screen {
    let caps = ctx.state.capabilities();
    let filters = &ctx.state.product_filters;

    let (title, description) = header(page);
    let mut view = ScreenView::new(page.slug(), title, description);
    view.toolbar
        .push(ButtonView::new(ScreenAction::OpenFilters.as_str(), "Filtros", Tone::Muted));
    if !filters.is_default() {
        view.toolbar.push(ButtonView::new(
            ScreenAction::ClearFilters.as_str(),
            "Limpar filtros",
            Tone::Danger,
        ));
    }
    view.active_filters = product_summary(filters);
    ctx.push_failures(&mut view, &[Section::Products]);

    let mut columns = base_columns();
    if page == SubPage::Stock {
        columns.push(stock_column());
    } else {
        columns.push(loyalty_column());
    }
    if caps.can_shop && page == SubPage::Catalog {
        columns.push(add_to_cart_column(ctx));
    }

    let data = filters.to_criteria().apply(&ctx.state.catalog.products);
    let modal = ctx.modal.clone();
    let list = PaginatedList::new(data, columns, ctx.page_size())
        .on_row_click(move |p: &Product| modal.open(detail::product(p)));

    Screen::new(view, ScreenList::Products(list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::ProductFilters;
    use crate::core::navigation::Role;
    use crate::entities::ProductKind;
    use crate::screens::testing::{build_page, store};

    #[test]
    fn test_catalog_columns_and_paging() {
        let store = store(Role::Customer);
        let (screen, _) = build_page(&store, SubPage::Catalog);
        assert_eq!(screen.view.title, "Catálogo de produtos");

        let list = screen.list.unwrap();
        assert_eq!(list.len(), 12);
        assert_eq!(list.total_pages(), 2);

        let view = list.view();
        assert_eq!(
            view.headers,
            vec!["Nome", "Tipo", "Preço", "Desconto", "Pontos fidelidade", ""]
        );
        assert_eq!(
            view.texts()[2],
            vec!["Produto 3", "Periférico", "R$ 30,00", "10%", "0", "Sem estoque"]
        );
        assert_eq!(view.texts()[0][5], "Adicionar ao carrinho");
    }

    #[test]
    fn test_add_to_cart_action_and_cue() {
        let store = store(Role::Customer);
        let (screen, _) = build_page(&store, SubPage::Catalog);
        assert!(screen.list.as_ref().unwrap().click_action(0).unwrap());
        assert!(store.read(|s| s.cart.contains(1)));

        let (screen, _) = build_page(&store, SubPage::Catalog);
        let list = screen.list.unwrap();
        assert_eq!(list.view().texts()[0][5], "Adicionado!");
        // disabled buttons do nothing
        assert!(!list.click_action(0).unwrap());
    }

    #[test]
    fn test_out_of_stock_button_is_disabled() {
        let store = store(Role::Customer);
        let (screen, _) = build_page(&store, SubPage::Catalog);
        assert!(!screen.list.unwrap().click_action(2).unwrap());
        assert!(store.read(|s| s.cart.is_empty()));
    }

    #[test]
    fn test_store_products_have_no_cart_column() {
        let store = store(Role::StoreAdmin);
        let (screen, _) = build_page(&store, SubPage::Products);
        let view = screen.list.unwrap().view();
        assert_eq!(view.headers.len(), 5);
        assert_eq!(screen.view.title, "Produtos (Visão da Loja)");
    }

    #[test]
    fn test_stock_badges() {
        let store = store(Role::StoreAdmin);
        let (screen, _) = build_page(&store, SubPage::Stock);
        let texts = screen.list.unwrap().view().texts();
        assert_eq!(texts[0][4], "1 / 5 Baixo");
        assert_eq!(texts[5][4], "6 / 5 OK");
    }

    #[test]
    fn test_filters_apply_and_show_summary() {
        let store = store(Role::Customer);
        store.apply_product_filters(ProductFilters {
            kind: Some(ProductKind::Hardware),
            price_min: "50".to_string(),
            ..Default::default()
        });
        let (screen, _) = build_page(&store, SubPage::Catalog);
        assert_eq!(screen.view.active_filters, vec!["Tipo: Hardware", "Preço mínimo: 50"]);
        assert!(screen.view.button("clear-filters").is_some());
        assert_eq!(screen.list.unwrap().page_ids(), vec![6, 8, 10, 12]);
    }

    #[test]
    fn test_row_click_opens_product_detail() {
        let store = store(Role::Customer);
        let (screen, modal) = build_page(&store, SubPage::Catalog);
        assert!(screen.list.unwrap().click_row(1));
        let detail = modal.current().unwrap();
        assert_eq!(detail.title, "Detalhes do produto");
        assert_eq!(detail.value("Nome"), Some("Produto 2"));
    }
}
