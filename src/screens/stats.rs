//! Store statistics screen

use super::{ScreenContext, Screen, ScreenList, detail};
use crate::entities::StatMetric;
use crate::render::column::Column;
use crate::render::list::PaginatedList;
use crate::render::view::ScreenView;
use crate::shell::loader::Section;

pub fn build(ctx: &ScreenContext<'_>) -> Screen {
    let mut view = ScreenView::new(
        "estatisticas",
        "Estatísticas",
        "Resumo de métricas da loja. Essa tela também usa uma lista paginada.",
    );
    ctx.push_failures(&mut view, &[Section::Stats]);

    let columns = vec![
        Column::text("Métrica", |m: &StatMetric| m.label.clone()),
        Column::text("Valor", |m: &StatMetric| m.value.clone()),
    ];
    let modal = ctx.modal.clone();
    let list = PaginatedList::new(ctx.state.catalog.stats.clone(), columns, ctx.page_size())
        .on_row_click(move |m: &StatMetric| modal.open(detail::metric(m)));

    Screen::new(view, ScreenList::Stats(list))
}
