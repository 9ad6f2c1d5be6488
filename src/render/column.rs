//! Column descriptors and cell values
//!
//! A column pairs a header with an accessor that turns a record into a
//! [`Cell`]. Accessors must not touch external state; only action columns
//! carry a side effect, and it runs on click, never while rendering.

use crate::core::error::StoreError;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Colour of a badge or button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Muted,
    Primary,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
            Tone::Muted => "muted",
            Tone::Primary => "primary",
        }
    }
}

/// Content of a single table cell
///
/// Every string is rendered escaped. `Text` is the default; the other
/// variants are the only way to get markup beyond plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Text {
        text: String,
    },
    /// Optional leading text followed by a coloured badge
    Badge {
        text: Option<String>,
        label: String,
        tone: Tone,
    },
    /// A button that triggers the column's action
    Action {
        label: String,
        tone: Tone,
        disabled: bool,
    },
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text { text: text.into() }
    }

    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            text: None,
            label: label.into(),
            tone,
        }
    }

    pub fn text_with_badge(text: impl Into<String>, label: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            text: Some(text.into()),
            label: label.into(),
            tone,
        }
    }

    pub fn action(label: impl Into<String>, tone: Tone) -> Self {
        Cell::Action {
            label: label.into(),
            tone,
            disabled: false,
        }
    }

    pub fn disabled_action(label: impl Into<String>, tone: Tone) -> Self {
        Cell::Action {
            label: label.into(),
            tone,
            disabled: true,
        }
    }

    /// Plain text of the cell, as a screen reader would read it
    pub fn plain(&self) -> String {
        match self {
            Cell::Text { text } => text.clone(),
            Cell::Badge {
                text: Some(text),
                label,
                ..
            } => format!("{} {}", text, label),
            Cell::Badge { label, .. } | Cell::Action { label, .. } => label.clone(),
        }
    }

    pub fn is_disabled_action(&self) -> bool {
        matches!(self, Cell::Action { disabled: true, .. })
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text { text }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::text(text)
    }
}

pub type Accessor<T> = Arc<dyn Fn(&T) -> Cell + Send + Sync>;
pub type Action<T> = Arc<dyn Fn(&T) -> Result<(), StoreError> + Send + Sync>;

/// A table column
pub struct Column<T> {
    header: String,
    class: Option<String>,
    accessor: Accessor<T>,
    action: Option<Action<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            class: self.class.clone(),
            accessor: Arc::clone(&self.accessor),
            action: self.action.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("action", &self.action.is_some())
            .finish()
    }
}

impl<T> Column<T> {
    /// A column whose cells come from `accessor`
    pub fn new<F>(header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Cell + Send + Sync + 'static,
    {
        Self {
            header: header.into(),
            class: None,
            accessor: Arc::new(accessor),
            action: None,
        }
    }

    /// A plain-text column
    pub fn text<F, S>(header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> S + Send + Sync + 'static,
        S: Into<String>,
    {
        Self::new(header, move |record| Cell::text(accessor(record)))
    }

    /// A column with a button; clicking it runs `action` on the row's record
    pub fn action<F, A>(header: impl Into<String>, accessor: F, action: A) -> Self
    where
        F: Fn(&T) -> Cell + Send + Sync + 'static,
        A: Fn(&T) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        Self {
            header: header.into(),
            class: Some("cell-actions".to_string()),
            accessor: Arc::new(accessor),
            action: Some(Arc::new(action)),
        }
    }

    /// CSS class put on every cell of the column
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn cell(&self, record: &T) -> Cell {
        (self.accessor)(record)
    }

    pub fn is_action(&self) -> bool {
        self.action.is_some()
    }

    /// Run the column's action
    ///
    /// Returns `Ok(false)` for columns without one, and for disabled buttons.
    pub fn trigger(&self, record: &T) -> Result<bool, StoreError> {
        let Some(action) = &self.action else {
            return Ok(false);
        };
        if self.cell(record).is_disabled_action() {
            return Ok(false);
        }
        action(record)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // === Cell ===

    #[test]
    fn test_cell_plain_text() {
        assert_eq!(Cell::text("Mouse").plain(), "Mouse");
        assert_eq!(
            Cell::text_with_badge("3 / 10", "Baixo", Tone::Warning).plain(),
            "3 / 10 Baixo"
        );
        assert_eq!(Cell::badge("Ativo", Tone::Success).plain(), "Ativo");
    }

    #[test]
    fn test_cell_serialization_is_tagged() {
        let json = serde_json::to_value(Cell::action("Remover", Tone::Danger)).unwrap();
        assert_eq!(json["type"], "action");
        assert_eq!(json["tone"], "danger");
        assert_eq!(json["disabled"], false);
    }

    // === Column ===

    #[test]
    fn test_text_column() {
        let column: Column<(i64, String)> = Column::text("Nome", |r: &(i64, String)| r.1.clone());
        let row = (1, "Teclado".to_string());
        assert_eq!(column.header(), "Nome");
        assert_eq!(column.cell(&row), Cell::text("Teclado"));
        assert!(!column.is_action());
        assert!(!column.trigger(&row).unwrap());
    }

    #[test]
    fn test_action_column_runs_and_skips_disabled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let column: Column<bool> = Column::action(
            "",
            |enabled| {
                if *enabled {
                    Cell::action("Adicionar", Tone::Primary)
                } else {
                    Cell::disabled_action("Adicionado!", Tone::Muted)
                }
            },
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        );

        assert!(column.trigger(&true).unwrap());
        assert!(!column.trigger(&false).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_action_error_propagates() {
        let column: Column<i64> = Column::action(
            "",
            |_| Cell::action("Ativar", Tone::Primary),
            |id| {
                Err(StoreError::NotFound {
                    kind: "discount",
                    id: *id,
                })
            },
        );
        let err = column.trigger(&9).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
