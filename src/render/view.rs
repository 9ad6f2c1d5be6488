//! View models for everything around the lists
//!
//! Screens build these; templates turn them into markup. All text is
//! rendered escaped.

use super::column::Tone;
use serde::Serialize;

/// A button outside the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    /// Action identifier (`open-filters`, `checkout`, ...)
    pub action: String,
    pub label: String,
    pub tone: Tone,
    pub disabled: bool,
}

impl ButtonView {
    pub fn new(action: impl Into<String>, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            action: action.into(),
            label: label.into(),
            tone,
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// An inline alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// A dashboard card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
}

/// Money summary shown under the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsView {
    pub item_count: usize,
    pub subtotal: String,
    pub discount_label: Option<String>,
    pub discount: Option<String>,
    pub total: String,
}

/// A discount offer card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferView {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub badge: String,
    pub color: String,
    pub background: String,
    pub icon: String,
}

/// Label/value pairs of a detail modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub rows: Vec<DetailRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl DetailView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(DetailRow {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Value shown for `label`
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

/// Everything in the content region except the list itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    /// Page slug
    pub page: String,
    pub title: String,
    pub description: String,
    pub toolbar: Vec<ButtonView>,
    /// Human-readable active filters ("Tipo: Hardware")
    pub active_filters: Vec<String>,
    pub notices: Vec<Notice>,
    pub cards: Vec<StatCard>,
    pub offers: Vec<OfferView>,
    pub totals: Option<TotalsView>,
    pub footer: Vec<ButtonView>,
    pub has_list: bool,
}

impl ScreenView {
    pub fn new(page: &str, title: &str, description: &str) -> Self {
        Self {
            page: page.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            has_list: true,
            ..Default::default()
        }
    }

    pub fn button(&self, action: &str) -> Option<&ButtonView> {
        self.toolbar
            .iter()
            .chain(self.footer.iter())
            .find(|b| b.action == action)
    }
}

/// Application top bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopBarView {
    pub title: String,
    pub pill: String,
    pub show_profile: bool,
    pub user_name: Option<String>,
    pub cart_count: Option<usize>,
    pub show_logout: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub slug: String,
    pub label: String,
    pub active: bool,
}

/// Sub-page navigation of the current role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    pub items: Vec<NavItem>,
}

/// One input of a filter form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterField {
    pub name: String,
    pub label: String,
    /// HTML input type (`text`, `number`)
    pub input: String,
    pub value: String,
    /// Choices for a select; empty for free input
    pub options: Vec<String>,
}

impl FilterField {
    pub fn text(name: &str, label: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            input: "text".to_string(),
            value: value.to_string(),
            options: Vec::new(),
        }
    }

    pub fn number(name: &str, label: &str, value: &str) -> Self {
        Self {
            input: "number".to_string(),
            ..Self::text(name, label, value)
        }
    }

    pub fn select(name: &str, label: &str, value: &str, options: Vec<String>) -> Self {
        Self {
            options,
            ..Self::text(name, label, value)
        }
    }
}

/// The filter modal of a screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterFormView {
    pub title: String,
    /// `products` or `customers`
    pub target: String,
    pub fields: Vec<FilterField>,
}
