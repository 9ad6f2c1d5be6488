//! Generic paginated list
//!
//! The list owns its data, its columns and its current page. Paging is
//! local: `prev`/`next`/`go_to` change only this component and the caller
//! re-renders only the list region. A screen rebuild (new filters, new
//! data) creates a new list, which starts again on page 1.

use super::column::{Cell, Column};
use super::templates::Templates;
use crate::core::entity::Record;
use crate::core::error::{RenderError, StoreError};
use crate::core::query::{PageState, PaginationMeta};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Placeholder row shown when the list has no data
pub const EMPTY_MESSAGE: &str = "Nenhum registro encontrado.";

pub type RowHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;
pub type RowClassifier<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// A paginated, clickable table of records
pub struct PaginatedList<T> {
    data: Vec<T>,
    columns: Vec<Column<T>>,
    state: PageState,
    on_row_click: Option<RowHandler<T>>,
    row_classifier: Option<RowClassifier<T>>,
}

impl<T> fmt::Debug for PaginatedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedList")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("state", &self.state)
            .finish()
    }
}

impl<T: Record> PaginatedList<T> {
    pub fn new(data: Vec<T>, columns: Vec<Column<T>>, page_size: usize) -> Self {
        let state = PageState::new(data.len(), page_size);
        Self {
            data,
            columns,
            state,
            on_row_click: None,
            row_classifier: None,
        }
    }

    /// Called with the full record when a row (outside action buttons) is clicked
    pub fn on_row_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.on_row_click = Some(Arc::new(handler));
        self
    }

    /// Extra CSS class for a row, e.g. `row-inactive`
    pub fn row_classifier<F>(mut self, classifier: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.row_classifier = Some(Arc::new(classifier));
        self
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn page(&self) -> usize {
        self.state.page()
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    pub fn meta(&self) -> PaginationMeta {
        self.state.meta()
    }

    /// Records on the current page
    pub fn page_rows(&self) -> &[T] {
        &self.data[self.state.range()]
    }

    // === Paging ===

    pub fn prev(&mut self) -> bool {
        self.state.prev()
    }

    pub fn next(&mut self) -> bool {
        self.state.next()
    }

    /// Jump to a page; out-of-range requests clamp
    pub fn go_to(&mut self, page: usize) -> bool {
        let changed = self.state.go_to(page);
        if changed {
            debug!(page = self.state.page(), kind = T::kind(), "list paged");
        }
        changed
    }

    // === Clicks ===

    /// Click the `index`-th row of the current page
    ///
    /// Runs the row handler and returns the clicked record.
    pub fn click_row(&self, index: usize) -> Option<&T> {
        let record = self.page_rows().get(index)?;
        if let Some(handler) = &self.on_row_click {
            handler(record);
        }
        Some(record)
    }

    /// Click the button in `column` of the `index`-th row of the current page
    ///
    /// Runs only the column's action; the row handler does not fire.
    /// Returns `Ok(false)` when there is no enabled button at that position.
    pub fn click_action(&self, index: usize, column: usize) -> Result<bool, StoreError> {
        let (Some(record), Some(column)) = (self.page_rows().get(index), self.columns.get(column))
        else {
            return Ok(false);
        };
        column.trigger(record)
    }

    /// Index of the first action column, if any
    pub fn action_column(&self) -> Option<usize> {
        self.columns.iter().position(Column::is_action)
    }

    // === View ===

    pub fn view(&self) -> ListView {
        let offset = self.state.range().start;
        let rows = self
            .page_rows()
            .iter()
            .enumerate()
            .map(|(index, record)| RowView {
                index,
                position: offset + index,
                id: record.id(),
                class: self
                    .row_classifier
                    .as_ref()
                    .and_then(|classify| classify(record))
                    .filter(|class| !class.is_empty()),
                cells: self
                    .columns
                    .iter()
                    .map(|column| CellView {
                        class: column.class().map(str::to_string),
                        content: column.cell(record),
                    })
                    .collect(),
            })
            .collect();

        ListView {
            headers: self.columns.iter().map(|c| c.header().to_string()).collect(),
            column_count: self.columns.len().max(1),
            rows,
            empty_message: self.data.is_empty().then_some(EMPTY_MESSAGE),
            pagination: PaginationView::from(self.meta()),
        }
    }

    pub fn render(&self, templates: &Templates) -> Result<String, RenderError> {
        templates.render(Templates::LIST, &self.view())
    }
}

/// Render-ready snapshot of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub headers: Vec<String>,
    pub column_count: usize,
    pub rows: Vec<RowView>,
    pub empty_message: Option<&'static str>,
    pub pagination: PaginationView,
}

impl ListView {
    /// Plain text of every cell on the page, row by row
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.content.plain()).collect())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    /// Index within the page
    pub index: usize,
    /// Index within the whole data
    pub position: usize,
    pub id: i64,
    pub class: Option<String>,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub class: Option<String>,
    pub content: Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

/// The pagination bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationView {
    pub label: String,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub pages: Vec<PageButton>,
}

impl From<PaginationMeta> for PaginationView {
    fn from(meta: PaginationMeta) -> Self {
        Self {
            label: meta.label(),
            page: meta.page,
            total_pages: meta.total_pages,
            has_prev: meta.has_prev,
            has_next: meta.has_next,
            pages: (1..=meta.total_pages)
                .map(|number| PageButton {
                    number,
                    active: number == meta.page,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StatMetric;
    use crate::render::column::Tone;
    use std::sync::Mutex;

    fn metrics(n: i64) -> Vec<StatMetric> {
        (1..=n)
            .map(|i| StatMetric::new(i, format!("Métrica {}", i), i.to_string()))
            .collect()
    }

    fn columns() -> Vec<Column<StatMetric>> {
        vec![
            Column::text("Métrica", |m: &StatMetric| m.label.clone()),
            Column::text("Valor", |m: &StatMetric| m.value.clone()),
        ]
    }

    // === paging ===

    #[test]
    fn test_page_boundaries() {
        let mut list = PaginatedList::new(metrics(23), columns(), 10);
        assert_eq!(list.total_pages(), 3);
        assert_eq!(list.page_rows().len(), 10);

        assert!(list.go_to(3));
        assert_eq!(list.page_rows().len(), 3);
        assert_eq!(list.page_rows()[0].id, 21);

        assert!(!list.next());
        assert!(list.prev());
        assert_eq!(list.page(), 2);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut list = PaginatedList::new(metrics(5), columns(), 2);
        list.go_to(99);
        assert_eq!(list.page(), 3);
        list.go_to(0);
        assert_eq!(list.page(), 1);
    }

    // === view() ===

    #[test]
    fn test_empty_list_view() {
        let list = PaginatedList::new(Vec::new(), columns(), 10);
        let view = list.view();
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message, Some("Nenhum registro encontrado."));
        assert_eq!(view.column_count, 2);
        assert_eq!(view.pagination.label, "Página 1 de 1");
        assert!(!view.pagination.has_prev);
        assert!(!view.pagination.has_next);
    }

    #[test]
    fn test_view_rows_and_pagination_bar() {
        let mut list = PaginatedList::new(metrics(12), columns(), 5)
            .row_classifier(|m: &StatMetric| (m.id % 2 == 0).then(|| "row-even".to_string()));
        list.go_to(2);

        let view = list.view();
        assert_eq!(view.headers, vec!["Métrica", "Valor"]);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].id, 6);
        assert_eq!(view.rows[0].position, 5);
        assert_eq!(view.rows[0].class.as_deref(), Some("row-even"));
        assert_eq!(view.rows[1].class, None);
        assert_eq!(view.texts()[0], vec!["Métrica 6", "6"]);

        let buttons: Vec<bool> = view.pagination.pages.iter().map(|p| p.active).collect();
        assert_eq!(buttons, vec![false, true, false]);
        assert!(view.pagination.has_prev && view.pagination.has_next);
    }

    // === clicks ===

    #[test]
    fn test_click_row_invokes_handler_with_record() {
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicked);
        let mut list = PaginatedList::new(metrics(15), columns(), 10)
            .on_row_click(move |m: &StatMetric| sink.lock().unwrap().push(m.id));
        list.next();

        assert_eq!(list.click_row(2).map(|m| m.id), Some(13));
        assert!(list.click_row(9).is_none());
        assert_eq!(*clicked.lock().unwrap(), vec![13]);
    }

    #[test]
    fn test_action_click_does_not_fire_row_handler() {
        let rows = Arc::new(Mutex::new(0));
        let actions = Arc::new(Mutex::new(Vec::new()));
        let row_sink = Arc::clone(&rows);
        let action_sink = Arc::clone(&actions);

        let mut cols = columns();
        cols.push(Column::action(
            "",
            |_| Cell::action("Ver", Tone::Primary),
            move |m: &StatMetric| {
                action_sink.lock().unwrap().push(m.id);
                Ok(())
            },
        ));
        let list = PaginatedList::new(metrics(3), cols, 10).on_row_click(move |_| {
            *row_sink.lock().unwrap() += 1;
        });

        assert_eq!(list.action_column(), Some(2));
        assert!(list.click_action(1, 2).unwrap());
        assert!(!list.click_action(1, 0).unwrap());
        assert!(!list.click_action(7, 2).unwrap());

        assert_eq!(*actions.lock().unwrap(), vec![2]);
        assert_eq!(*rows.lock().unwrap(), 0);
    }
}
