//! Screen controllers
//!
//! Each controller reads the current [`AppState`], filters its records and
//! hands them to a [`PaginatedList`] together with its column set. Row
//! clicks open a detail modal; action columns call back into the [`Store`].
//! Controllers keep no state of their own: the shell rebuilds the screen
//! whenever the store says the content is dirty.

pub mod cart;
pub mod customers;
pub mod dashboard;
pub mod detail;
pub mod discounts;
pub mod filters;
pub mod products;
pub mod stats;

use crate::config::StorefrontConfig;
use crate::core::error::{RenderError, StoreError};
use crate::core::navigation::SubPage;
use crate::core::state::{AppState, Store};
use crate::entities::{Customer, Discount, Product, StatMetric};
use crate::render::column::Tone;
use crate::render::list::{ListView, PaginatedList};
use crate::render::templates::Templates;
use crate::render::view::{DetailView, Notice, ScreenView};
use crate::shell::loader::{LoadReport, Section};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

/// Buttons outside the table, by action id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    OpenFilters,
    ClearFilters,
    OpenOffers,
    RemoveCoupon,
    Checkout,
    BackToShop,
}

impl ScreenAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenAction::OpenFilters => "open-filters",
            ScreenAction::ClearFilters => "clear-filters",
            ScreenAction::OpenOffers => "open-offers",
            ScreenAction::RemoveCoupon => "remove-coupon",
            ScreenAction::Checkout => "checkout",
            ScreenAction::BackToShop => "back-to-shop",
        }
    }
}

impl fmt::Display for ScreenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open-filters" => Ok(ScreenAction::OpenFilters),
            "clear-filters" => Ok(ScreenAction::ClearFilters),
            "open-offers" => Ok(ScreenAction::OpenOffers),
            "remove-coupon" => Ok(ScreenAction::RemoveCoupon),
            "checkout" => Ok(ScreenAction::Checkout),
            "back-to-shop" => Ok(ScreenAction::BackToShop),
            other => Err(format!("unknown screen action '{}'", other)),
        }
    }
}

/// The detail modal currently open, shared with row-click handlers
#[derive(Debug, Clone, Default)]
pub struct ModalSlot(Arc<Mutex<Option<DetailView>>>);

impl ModalSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, view: DetailView) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(view);
    }

    pub fn current(&self) -> Option<DetailView> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn close(&self) -> Option<DetailView> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

/// What a controller needs to build a screen
pub struct ScreenContext<'a> {
    pub state: &'a AppState,
    pub store: &'a Store,
    pub config: &'a StorefrontConfig,
    pub modal: &'a ModalSlot,
    pub report: Option<&'a LoadReport>,
}

impl ScreenContext<'_> {
    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Error panel for a section that failed to load
    pub fn failure_notice(&self, section: Section) -> Option<Notice> {
        let message = self.report?.failure(section)?;
        Some(Notice::new(
            Tone::Danger,
            format!("Não foi possível carregar {}: {}", section.label(), message),
        ))
    }

    pub(crate) fn push_failures(&self, view: &mut ScreenView, sections: &[Section]) {
        view.notices
            .extend(sections.iter().filter_map(|s| self.failure_notice(*s)));
    }
}

/// The list of a screen, whatever its record type
#[derive(Debug)]
pub enum ScreenList {
    Products(PaginatedList<Product>),
    Discounts(PaginatedList<Discount>),
    Customers(PaginatedList<Customer>),
    Stats(PaginatedList<StatMetric>),
}

macro_rules! each_list {
    ($self:expr, $list:ident => $body:expr) => {
        match $self {
            ScreenList::Products($list) => $body,
            ScreenList::Discounts($list) => $body,
            ScreenList::Customers($list) => $body,
            ScreenList::Stats($list) => $body,
        }
    };
}

impl ScreenList {
    pub fn len(&self) -> usize {
        each_list!(self, list => list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn page(&self) -> usize {
        each_list!(self, list => list.page())
    }

    pub fn total_pages(&self) -> usize {
        each_list!(self, list => list.total_pages())
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        each_list!(self, list => list.go_to(page))
    }

    pub fn next(&mut self) -> bool {
        each_list!(self, list => list.next())
    }

    pub fn prev(&mut self) -> bool {
        each_list!(self, list => list.prev())
    }

    /// Click a row of the current page; returns whether a record was there
    pub fn click_row(&self, index: usize) -> bool {
        each_list!(self, list => list.click_row(index).is_some())
    }

    /// Click the first action button of a row
    pub fn click_action(&self, index: usize) -> Result<bool, StoreError> {
        each_list!(self, list => match list.action_column() {
            Some(column) => list.click_action(index, column),
            None => Ok(false),
        })
    }

    pub fn view(&self) -> ListView {
        each_list!(self, list => list.view())
    }

    pub fn render(&self, templates: &Templates) -> Result<String, RenderError> {
        each_list!(self, list => list.render(templates))
    }

    /// Ids of the records on the current page
    pub fn page_ids(&self) -> Vec<i64> {
        self.view().rows.iter().map(|r| r.id).collect()
    }
}

/// A built screen: surrounding view plus its list
#[derive(Debug)]
pub struct Screen {
    pub view: ScreenView,
    pub list: Option<ScreenList>,
}

impl Screen {
    pub fn new(view: ScreenView, list: ScreenList) -> Self {
        Self {
            view,
            list: Some(list),
        }
    }

    pub fn without_list(mut view: ScreenView) -> Self {
        view.has_list = false;
        Self { view, list: None }
    }
}

/// Build the screen for `page`
pub fn build(ctx: &ScreenContext<'_>, page: SubPage) -> Screen {
    match page {
        SubPage::Catalog | SubPage::Products | SubPage::Stock => products::build(ctx, page),
        SubPage::Discounts => discounts::build_customer(ctx),
        SubPage::StoreDiscounts => discounts::build_store(ctx),
        SubPage::Cart => cart::build(ctx),
        SubPage::Customers => customers::build(ctx),
        SubPage::Stats => stats::build(ctx),
        SubPage::Dashboard => dashboard::build(ctx),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_action_round_trip() {
        for action in [
            ScreenAction::OpenFilters,
            ScreenAction::ClearFilters,
            ScreenAction::OpenOffers,
            ScreenAction::RemoveCoupon,
            ScreenAction::Checkout,
            ScreenAction::BackToShop,
        ] {
            assert_eq!(action.as_str().parse::<ScreenAction>(), Ok(action));
        }
        assert!("dance".parse::<ScreenAction>().is_err());
    }

    #[test]
    fn test_modal_slot() {
        let slot = ModalSlot::new();
        let other_handle = slot.clone();
        other_handle.open(DetailView::new("Detalhes da métrica"));
        assert_eq!(
            slot.current().map(|d| d.title),
            Some("Detalhes da métrica".to_string())
        );
        assert!(slot.close().is_some());
        assert!(slot.current().is_none());
    }
}
