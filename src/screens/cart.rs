//! Shopping cart screen

use super::discounts::coupon_button;
use super::{ScreenAction, ScreenContext, Screen, ScreenList, detail};
use crate::core::money::format_brl;
use crate::entities::Product;
use crate::render::column::{Cell, Column, Tone};
use crate::render::list::PaginatedList;
use crate::render::view::{ButtonView, Notice, ScreenView, TotalsView};
use crate::shell::loader::Section;

pub const EMPTY_CART: &str = "Seu carrinho está vazio.";

fn totals(ctx: &ScreenContext<'_>) -> TotalsView {
    let totals = ctx.state.cart_totals();
    let discount = ctx.state.active_discount.as_ref();
    TotalsView {
        item_count: totals.item_count,
        subtotal: format_brl(totals.subtotal),
        discount_label: discount.map(|d| format!("Desconto ({})", d.kind)),
        discount: discount.map(|_| format_brl(totals.discount)),
        total: format_brl(totals.total),
    }
}

pub fn build(ctx: &ScreenContext<'_>) -> Screen {
    let mut view = ScreenView::new(
        "carrinho",
        "Carrinho",
        "Produtos adicionados ao carrinho. Clique para mais detalhes e siga para compra!",
    );
    ctx.push_failures(&mut view, &[Section::Products]);

    let items = ctx.state.cart_items();
    let empty = items.is_empty();
    if empty {
        view.notices.push(Notice::new(Tone::Muted, EMPTY_CART));
        view.footer.push(ButtonView::new(
            ScreenAction::BackToShop.as_str(),
            "Voltar às compras",
            Tone::Primary,
        ));
    } else {
        view.totals = Some(totals(ctx));
        view.footer.push(coupon_button(ctx));
    }
    view.footer.push(
        ButtonView::new(ScreenAction::Checkout.as_str(), "Seguir para a compra", Tone::Success)
            .disabled(empty),
    );

    let store = ctx.store.clone();
    let columns = vec![
        Column::text("Nome", |p: &Product| p.name.clone()),
        Column::text("Tipo", |p: &Product| p.kind.label()),
        Column::text("Preço", |p: &Product| format_brl(p.price)),
        Column::action(
            "",
            |_: &Product| Cell::action("Remover do carrinho", Tone::Danger),
            move |p: &Product| Ok(store.remove_from_cart(p.id)?),
        ),
    ];

    let modal = ctx.modal.clone();
    let list = PaginatedList::new(items, columns, ctx.page_size())
        .on_row_click(move |p: &Product| modal.open(detail::product(p)));

    Screen::new(view, ScreenList::Products(list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::core::navigation::{Role, SubPage};
    use crate::screens::testing::{build_page, store};

    #[test]
    fn test_empty_cart_disables_checkout() {
        let store = store(Role::Customer);
        let (screen, _) = build_page(&store, SubPage::Cart);
        assert_eq!(screen.view.notices[0].text, EMPTY_CART);
        assert!(screen.view.button("checkout").unwrap().disabled);
        assert!(screen.view.button("back-to-shop").is_some());
        assert!(screen.view.totals.is_none());
        assert!(screen.list.unwrap().is_empty());
    }

    #[test]
    fn test_totals_with_discount() {
        let store = store(Role::Customer);
        // Produto 4 (R$ 40) + Produto 6 (R$ 60)
        store.add_to_cart(4).unwrap();
        store.add_to_cart(6).unwrap();
        store.select_discount(&StorefrontConfig::default().discount_rules.rules()[0]);

        let (screen, _) = build_page(&store, SubPage::Cart);
        let totals = screen.view.totals.clone().unwrap();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.subtotal, "R$ 100,00");
        assert_eq!(totals.discount_label.as_deref(), Some("Desconto (promocional)"));
        assert_eq!(totals.discount.as_deref(), Some("R$ 10,00"));
        assert_eq!(totals.total, "R$ 90,00");
        assert!(!screen.view.button("checkout").unwrap().disabled);
        assert!(screen.view.button("remove-coupon").is_some());
    }

    #[test]
    fn test_remove_action() {
        let store = store(Role::Customer);
        store.add_to_cart(1).unwrap();
        store.add_to_cart(2).unwrap();

        let (screen, modal) = build_page(&store, SubPage::Cart);
        let list = screen.list.unwrap();
        assert_eq!(list.page_ids(), vec![1, 2]);
        assert!(list.click_action(0).unwrap());
        assert!(modal.current().is_none());
        assert_eq!(store.read(|s| s.cart.ids().to_vec()), vec![2]);
    }
}
