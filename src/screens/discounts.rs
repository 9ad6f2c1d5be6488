//! Discount screens and the offer picker

use super::{ScreenAction, ScreenContext, Screen, ScreenList, detail};
use crate::core::discount::DiscountRule;
use crate::core::money::format_percent;
use crate::entities::Discount;
use crate::render::column::{Cell, Column, Tone};
use crate::render::list::PaginatedList;
use crate::render::view::{ButtonView, Notice, OfferView, ScreenView};
use crate::shell::loader::Section;

/// Cards for the offers a user may pick, in rule-table order
pub fn offer_views(rules: &[&DiscountRule]) -> Vec<OfferView> {
    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            let theme = rule.style.theme();
            OfferView {
                index,
                title: rule.title.clone(),
                description: rule.description.clone(),
                badge: format!("{} OFF", format_percent(rule.percent)),
                color: theme.color.to_string(),
                background: theme.background.to_string(),
                icon: theme.icon.to_string(),
            }
        })
        .collect()
}

/// Offers the logged-in user is eligible for; none without a user
pub fn eligible_offers<'a>(ctx: &ScreenContext<'a>) -> Vec<&'a DiscountRule> {
    let user_id = ctx.state.user.as_ref().map(|u| u.id);
    ctx.config
        .discount_rules
        .eligible(user_id, &ctx.state.catalog.segments)
}

/// "Adicionar Cupom" or "Remover Cupom", depending on the active discount
pub(crate) fn coupon_button(ctx: &ScreenContext<'_>) -> ButtonView {
    if ctx.state.active_discount.is_some() {
        ButtonView::new(ScreenAction::RemoveCoupon.as_str(), "Remover Cupom", Tone::Danger)
    } else {
        ButtonView::new(ScreenAction::OpenOffers.as_str(), "Adicionar Cupom", Tone::Success)
    }
}

fn name_columns() -> Vec<Column<Discount>> {
    vec![
        Column::text("Nome", |d: &Discount| d.name.clone()),
        Column::text("Descrição", |d: &Discount| d.description.clone()),
    ]
}

pub fn build_customer(ctx: &ScreenContext<'_>) -> Screen {
    let mut view = ScreenView::new(
        "descontos",
        "Descontos disponíveis",
        "Lista de descontos aplicáveis aos produtos da loja.",
    );
    view.toolbar.push(coupon_button(ctx));
    if let Some(active) = &ctx.state.active_discount {
        view.notices.push(Notice::new(
            Tone::Success,
            format!(
                "Cupom aplicado: {} ({})",
                active.title,
                format_percent(active.percent)
            ),
        ));
    }
    ctx.push_failures(&mut view, &[Section::Discounts, Section::Segments]);

    let modal = ctx.modal.clone();
    let list = PaginatedList::new(
        ctx.state.catalog.active_discounts(),
        name_columns(),
        ctx.page_size(),
    )
    .on_row_click(move |d: &Discount| modal.open(detail::discount(d)));

    Screen::new(view, ScreenList::Discounts(list))
}

pub fn build_store(ctx: &ScreenContext<'_>) -> Screen {
    let mut view = ScreenView::new(
        "descontos",
        "Descontos (Administração)",
        "Gerenciamento de descontos ativos e inativos. Clique em uma linha para ver detalhes ou desative.",
    );
    ctx.push_failures(&mut view, &[Section::Discounts]);

    let mut columns = name_columns();
    columns.push(Column::new("Status", |d: &Discount| {
        if d.active {
            Cell::badge("Ativo", Tone::Success)
        } else {
            Cell::badge("Inativo", Tone::Muted)
        }
    }));
    let store = ctx.store.clone();
    columns.push(Column::action(
        "",
        |d: &Discount| {
            if d.active {
                Cell::action("Desativar", Tone::Danger)
            } else {
                Cell::action("Ativar", Tone::Primary)
            }
        },
        move |d: &Discount| store.toggle_discount(d.id).map(|_| ()),
    ));

    let modal = ctx.modal.clone();
    let list = PaginatedList::new(
        ctx.state.catalog.discounts.clone(),
        columns,
        ctx.page_size(),
    )
    .row_classifier(|d: &Discount| (!d.active).then(|| "row-inactive".to_string()))
    .on_row_click(move |d: &Discount| modal.open(detail::discount(d)));

    Screen::new(view, ScreenList::Discounts(list))
}
