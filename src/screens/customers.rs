//! Customer administration screen

use super::filters::customer_summary;
use super::{ScreenAction, ScreenContext, Screen, ScreenList, detail};
use crate::core::money::{format_brl, format_date};
use crate::entities::Customer;
use crate::render::column::{Column, Tone};
use crate::render::list::PaginatedList;
use crate::render::view::{ButtonView, ScreenView};
use crate::shell::loader::Section;

pub fn build(ctx: &ScreenContext<'_>) -> Screen {
    let filters = &ctx.state.customer_filters;
    let mut view = ScreenView::new(
        "clientes",
        "Clientes",
        "Lista de clientes cadastrados. Clique em um cliente para ver detalhes.",
    );
    view.toolbar
        .push(ButtonView::new(ScreenAction::OpenFilters.as_str(), "Filtros", Tone::Muted));
    if !filters.is_default() {
        view.toolbar.push(ButtonView::new(
            ScreenAction::ClearFilters.as_str(),
            "Limpar filtros",
            Tone::Danger,
        ));
    }
    view.active_filters = customer_summary(filters);
    ctx.push_failures(&mut view, &[Section::Customers]);

    let columns = vec![
        Column::text("Nome", |c: &Customer| c.name.clone()),
        Column::text("Local", |c: &Customer| c.location.clone()),
        Column::text("Total gasto", |c: &Customer| format_brl(c.total_spent)),
        Column::text("Data de cadastro", |c: &Customer| format_date(c.registered_at)),
    ];

    let data = filters.to_criteria().apply(&ctx.state.catalog.customers);
    let modal = ctx.modal.clone();
    let list = PaginatedList::new(data, columns, ctx.page_size())
        .on_row_click(move |c: &Customer| modal.open(detail::customer(c)));

    Screen::new(view, ScreenList::Customers(list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::CustomerFilters;
    use crate::core::navigation::{Role, SubPage};
    use crate::screens::testing::{build_page, store};

    #[test]
    fn test_customer_columns() {
        let store = store(Role::StoreAdmin);
        let (screen, _) = build_page(&store, SubPage::Customers);
        let texts = screen.list.unwrap().view().texts();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[1], vec!["Cliente 2", "Curitiba", "R$ 200,00", "-"]);
    }

    #[test]
    fn test_spent_range_filter() {
        let store = store(Role::StoreAdmin);
        store.apply_customer_filters(CustomerFilters {
            spent_min: "200".to_string(),
            spent_max: "300".to_string(),
            ..Default::default()
        });
        let (screen, _) = build_page(&store, SubPage::Customers);
        assert_eq!(screen.list.unwrap().page_ids(), vec![2, 3]);
        assert_eq!(
            screen.view.active_filters,
            vec!["Total gasto mínimo: 200", "Total gasto máximo: 300"]
        );
    }

    #[test]
    fn test_no_match_renders_placeholder() {
        let store = store(Role::StoreAdmin);
        store.apply_customer_filters(CustomerFilters {
            location: "Manaus".to_string(),
            ..Default::default()
        });
        let (screen, _) = build_page(&store, SubPage::Customers);
        let view = screen.list.unwrap().view();
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message, Some(crate::render::EMPTY_MESSAGE));
    }

    #[test]
    fn test_row_click_opens_customer() {
        let store = store(Role::StoreAdmin);
        let (screen, modal) = build_page(&store, SubPage::Customers);
        assert!(screen.list.unwrap().click_row(3));
        assert_eq!(modal.current().unwrap().value("Nome"), Some("Cliente 4"));
    }
}
