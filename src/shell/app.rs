//! The storefront application
//!
//! [`Storefront`] owns the store, the data source and the render surface.
//! Interactions mutate the [`Store`]; [`Storefront::sync`] then drains the
//! store's events, works out which regions are dirty and re-renders only
//! those. Paging touches the list region alone.

use super::checkout::{self, Payment};
use super::loader::{LoadReport, reload};
use crate::api::{CatalogSource, OrderReceipt};
use crate::config::StorefrontConfig;
use crate::core::discount::DiscountRule;
use crate::core::error::{CheckoutError, RenderError, StoreError};
use crate::core::events::{EventEnvelope, Region};
use crate::core::filter::{CustomerFilters, ProductFilters};
use crate::core::navigation::{Capabilities, Role, SubPage};
use crate::core::state::{AppState, Store};
use crate::core::validation::{NewCustomer, NewProduct, validate_form};
use crate::entities::{Customer, Product};
use crate::render::surface::{Patch, Surface};
use crate::render::templates::Templates;
use crate::render::view::{DetailView, FilterFormView, NavItem, NavView, OfferView, TopBarView};
use crate::screens::{self, ModalSlot, Screen, ScreenAction, ScreenContext, ScreenList, detail, discounts, filters};
use serde_json::json;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

/// Title shown in the top bar of both layouts
pub const TITLE: &str = "Kabom Eletrônicos";

const ALL_REGIONS: [Region; 4] = [Region::TopBar, Region::Nav, Region::Content, Region::List];

/// What a toolbar or footer button did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; these regions were re-rendered
    Patched(Vec<Patch>),
    /// A modal was opened; its markup
    Overlay(String),
}

pub struct Storefront {
    store: Store,
    source: Arc<dyn CatalogSource>,
    config: StorefrontConfig,
    templates: Templates,
    surface: Surface,
    screen: Option<Screen>,
    modal: ModalSlot,
    report: Option<LoadReport>,
    events: broadcast::Receiver<EventEnvelope>,
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("surface", &self.surface)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    pub fn new(source: Arc<dyn CatalogSource>, config: StorefrontConfig) -> Result<Self, StoreError> {
        Self::with_store(Store::default(), source, config)
    }

    /// Build around an existing store (e.g. one shared with an event consumer)
    pub fn with_store(
        store: Store,
        source: Arc<dyn CatalogSource>,
        config: StorefrontConfig,
    ) -> Result<Self, StoreError> {
        config.validate()?;
        let templates = Templates::new()?;
        let events = store.subscribe();
        Ok(Self {
            store,
            source,
            config,
            templates,
            surface: Surface::new(),
            screen: None,
            modal: ModalSlot::new(),
            report: None,
            events,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Replace a built-in template, then redraw
    pub fn templates_mut(&mut self) -> &mut Templates {
        &mut self.templates
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    pub fn list(&self) -> Option<&ScreenList> {
        self.screen.as_ref().and_then(|s| s.list.as_ref())
    }

    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    /// The whole page as currently rendered
    pub fn document(&self) -> Result<String, RenderError> {
        self.surface.document(&self.templates)
    }

    // === Render cycle ===

    /// Drain pending store events and re-render what they made dirty
    pub fn sync(&mut self) -> Result<Vec<Patch>, StoreError> {
        let mut dirty = BTreeSet::new();
        let mut reset_paging = false;
        loop {
            match self.events.try_recv() {
                Ok(envelope) => {
                    dirty.extend(envelope.event.dirty_regions().iter().copied());
                    reset_paging |= envelope.event.resets_paging();
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "render fell behind the store, redrawing everything");
                    dirty.extend(ALL_REGIONS);
                    reset_paging = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if dirty.is_empty() {
            return Ok(Vec::new());
        }
        self.redraw(&dirty, reset_paging)
    }

    /// Render every region from scratch
    pub fn render(&mut self) -> Result<Vec<Patch>, StoreError> {
        while self.events.try_recv().is_ok() {}
        self.redraw(&ALL_REGIONS.into_iter().collect(), true)
    }

    fn redraw(&mut self, dirty: &BTreeSet<Region>, reset_paging: bool) -> Result<Vec<Patch>, StoreError> {
        let state = self.store.snapshot();
        debug!(regions = ?dirty, reset_paging, "redrawing");

        if dirty.contains(&Region::TopBar) {
            let html = match state.role {
                Role::Home => String::new(),
                _ => self.templates.render(Templates::TOP_BAR, &top_bar(&state))?,
            };
            self.surface.write(Region::TopBar, html);
        }
        if dirty.contains(&Region::Nav) {
            let html = match state.role {
                Role::Home => String::new(),
                _ => self.templates.render(Templates::NAV, &nav(&state))?,
            };
            self.surface.write(Region::Nav, html);
        }
        if dirty.contains(&Region::Content) || dirty.contains(&Region::List) {
            self.rebuild(&state, reset_paging)?;
        }
        Ok(self.surface.take_patches())
    }

    /// Rebuild the current screen and write its content and list
    fn rebuild(&mut self, state: &AppState, reset_paging: bool) -> Result<(), StoreError> {
        let Some(page) = state.current_page() else {
            self.screen = None;
            let html = self.templates.render_static(Templates::LANDING)?;
            self.surface.write(Region::Content, html);
            self.surface.clear(Region::List);
            return Ok(());
        };

        if !state.capabilities().allows(page) {
            debug!(role = %state.role, page = page.slug(), "access denied");
            self.screen = None;
            let html = self.templates.render(
                Templates::DENIED,
                &json!({ "role": state.role.pill(), "page": page.slug() }),
            )?;
            self.surface.write(Region::Content, html);
            self.surface.clear(Region::List);
            return Ok(());
        }

        // Row actions keep the reader on the page they were on
        let keep_page = self
            .screen
            .as_ref()
            .filter(|s| !reset_paging && s.view.page == page.slug())
            .and_then(|s| s.list.as_ref())
            .map(ScreenList::page);

        let mut screen = {
            let ctx = ScreenContext {
                state,
                store: &self.store,
                config: &self.config,
                modal: &self.modal,
                report: self.report.as_ref(),
            };
            screens::build(&ctx, page)
        };

        let content = self.templates.render(Templates::SCREEN, &screen.view)?;
        self.surface.write(Region::Content, content);
        match screen.list.as_mut() {
            Some(list) => {
                if let Some(n) = keep_page {
                    list.go_to(n);
                }
                let html = list.render(&self.templates)?;
                self.surface.write(Region::List, html);
            }
            None => {
                self.surface.clear(Region::List);
            }
        }
        self.screen = Some(screen);
        Ok(())
    }

    // === Loading ===

    /// Fetch the catalog and redraw
    pub async fn load(&mut self) -> Result<LoadReport, StoreError> {
        let report = reload(&self.store, self.source.as_ref()).await;
        self.report = Some(report.clone());
        // Failure notices live in the content even if the data did not change
        if report.installed {
            self.sync()?;
        }
        Ok(report)
    }

    // === Navigation ===

    /// Pick a layout from the landing page
    ///
    /// Entering the customer layout logs in the configured customer when
    /// nobody is logged in yet.
    pub fn enter(&mut self, role: Role) -> Result<Vec<Patch>, StoreError> {
        self.modal.close();
        self.store.set_role(role);
        if role == Role::Customer && self.store.read(|s| s.user.is_none()) {
            if let Some(id) = self.config.current_user_id {
                let user = self.store.read(|s| s.catalog.customer(id).cloned());
                self.store.set_user(user);
            }
        }
        info!(role = %role, "entered layout");
        self.sync()
    }

    /// Back to the landing page; the cart and discount are dropped
    pub fn logout(&mut self) -> Result<Vec<Patch>, StoreError> {
        self.modal.close();
        self.store.logout();
        self.store.set_user(None);
        self.sync()
    }

    pub fn navigate(&mut self, page: SubPage) -> Result<Vec<Patch>, StoreError> {
        self.modal.close();
        self.store.navigate(page);
        self.sync()
    }

    /// The page on screen is denied to the current role
    pub fn access_denied(&self) -> bool {
        self.store.read(|s| {
            s.current_page()
                .is_some_and(|page| !s.capabilities().allows(page))
        })
    }

    // === Paging ===

    fn page_list(&mut self, step: impl FnOnce(&mut ScreenList) -> bool) -> Result<Vec<Patch>, StoreError> {
        let Some(list) = self.screen.as_mut().and_then(|s| s.list.as_mut()) else {
            return Ok(Vec::new());
        };
        if !step(list) {
            return Ok(Vec::new());
        }
        let html = list.render(&self.templates)?;
        self.surface.write(Region::List, html);
        Ok(self.surface.take_patches())
    }

    pub fn next_page(&mut self) -> Result<Vec<Patch>, StoreError> {
        self.page_list(ScreenList::next)
    }

    pub fn prev_page(&mut self) -> Result<Vec<Patch>, StoreError> {
        self.page_list(ScreenList::prev)
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<Vec<Patch>, StoreError> {
        self.page_list(|list| list.go_to(page))
    }

    // === Rows ===

    /// Click a row of the current page and return the detail it opened
    pub fn click_row(&mut self, index: usize) -> Option<DetailView> {
        self.modal.close();
        let clicked = self.list().is_some_and(|list| list.click_row(index));
        if clicked {
            self.modal.current()
        } else {
            None
        }
    }

    /// Click the action button of a row, then redraw
    pub fn click_action(&mut self, index: usize) -> Result<Vec<Patch>, StoreError> {
        let triggered = match self.list() {
            Some(list) => list.click_action(index)?,
            None => false,
        };
        if !triggered {
            return Ok(Vec::new());
        }
        self.sync()
    }

    /// The open detail modal, rendered
    pub fn detail_html(&self) -> Result<Option<String>, RenderError> {
        self.modal
            .current()
            .map(|view| self.templates.render(Templates::DETAIL, &view))
            .transpose()
    }

    pub fn close_detail(&mut self) -> Option<DetailView> {
        self.modal.close()
    }

    /// The logged-in customer, opened as a detail modal
    pub fn profile(&mut self) -> Option<DetailView> {
        let view = self.store.read(|s| s.user.as_ref().map(detail::customer))?;
        self.modal.open(view.clone());
        Some(view)
    }

    // === Screen buttons ===

    pub fn screen_action(&mut self, action: ScreenAction) -> Result<Outcome, StoreError> {
        debug!(action = action.as_str(), "screen action");
        match action {
            ScreenAction::OpenFilters => {
                let form = self.filter_form();
                Ok(Outcome::Overlay(self.templates.render(Templates::FILTERS, &form)?))
            }
            ScreenAction::ClearFilters => Ok(Outcome::Patched(self.clear_filters()?)),
            ScreenAction::OpenOffers => {
                let offers = self.offers();
                Ok(Outcome::Overlay(
                    self.templates.render(Templates::OFFERS, &json!({ "offers": offers }))?,
                ))
            }
            ScreenAction::RemoveCoupon => {
                self.store.clear_discount();
                Ok(Outcome::Patched(self.sync()?))
            }
            ScreenAction::Checkout => {
                let summary = self.store.read(|state| {
                    if state.role != Role::Customer {
                        return Err(CheckoutError::NotCustomer);
                    }
                    if state.cart.is_empty() {
                        return Err(CheckoutError::EmptyCart);
                    }
                    Ok(checkout::summary(state))
                })?;
                Ok(Outcome::Overlay(self.templates.render(Templates::DETAIL, &summary)?))
            }
            ScreenAction::BackToShop => Ok(Outcome::Patched(self.navigate(SubPage::Catalog)?)),
        }
    }

    // === Filters ===

    fn on_customers(&self) -> bool {
        self.store
            .read(|s| s.current_page() == Some(SubPage::Customers))
    }

    /// Filter form of the current screen, prefilled with the active filters
    pub fn filter_form(&self) -> FilterFormView {
        self.store.read(|s| {
            if s.current_page() == Some(SubPage::Customers) {
                filters::customer_form(&s.customer_filters)
            } else {
                filters::product_form(&s.product_filters, &self.config.product_kinds)
            }
        })
    }

    pub fn apply_product_filters(&mut self, filters: ProductFilters) -> Result<Vec<Patch>, StoreError> {
        self.store.apply_product_filters(filters);
        self.sync()
    }

    pub fn apply_customer_filters(&mut self, filters: CustomerFilters) -> Result<Vec<Patch>, StoreError> {
        self.store.apply_customer_filters(filters);
        self.sync()
    }

    /// Clear the filters of the current screen
    pub fn clear_filters(&mut self) -> Result<Vec<Patch>, StoreError> {
        if self.on_customers() {
            self.store.clear_customer_filters();
        } else {
            self.store.clear_product_filters();
        }
        self.sync()
    }

    // === Discounts ===

    fn eligible_rules(&self) -> Vec<DiscountRule> {
        let state = self.store.snapshot();
        let ctx = ScreenContext {
            state: &state,
            store: &self.store,
            config: &self.config,
            modal: &self.modal,
            report: self.report.as_ref(),
        };
        discounts::eligible_offers(&ctx).into_iter().cloned().collect()
    }

    /// Offers the current user may pick
    pub fn offers(&self) -> Vec<OfferView> {
        let rules = self.eligible_rules();
        discounts::offer_views(&rules.iter().collect::<Vec<_>>())
    }

    /// Pick an offer by its position in [`Storefront::offers`]
    pub fn select_offer(&mut self, index: usize) -> Result<Vec<Patch>, StoreError> {
        let rule = self
            .eligible_rules()
            .into_iter()
            .nth(index)
            .ok_or(StoreError::NotFound {
                kind: "offer",
                id: index as i64,
            })?;
        info!(title = %rule.title, percent = %rule.percent, "discount selected");
        self.store.select_discount(&rule);
        self.sync()
    }

    // === Checkout ===

    /// Place the order, then reload so stock and totals are fresh
    pub async fn checkout(&mut self, payment: Payment) -> Result<OrderReceipt, StoreError> {
        let receipt =
            checkout::checkout(&self.store, self.source.as_ref(), &self.config, payment).await?;
        self.sync()?;
        self.load().await?;
        Ok(receipt)
    }

    // === Source passthrough ===

    pub async fn recommendations(&self, product_id: i64) -> Result<Vec<Product>, StoreError> {
        if self.store.read(|s| s.catalog.product(product_id).is_none()) {
            return Err(StoreError::NotFound {
                kind: "product",
                id: product_id,
            });
        }
        Ok(self.source.recommendations(product_id).await?)
    }

    /// Validate and register a customer, then reload
    pub async fn register_customer(&mut self, form: NewCustomer) -> Result<Customer, StoreError> {
        let form = validate_form(form)?;
        let customer = self.source.create_customer(&form).await?;
        info!(customer_id = customer.id, "customer registered");
        self.load().await?;
        Ok(customer)
    }

    /// Validate and register a product, then reload (store layout only)
    pub async fn register_product(&mut self, form: NewProduct) -> Result<Product, StoreError> {
        let role = self.store.read(|s| s.role);
        if !Capabilities::for_role(role).can_manage_products {
            return Err(StoreError::AccessDenied {
                role: role.slug().to_string(),
                page: SubPage::Products.slug().to_string(),
            });
        }
        let form = validate_form(form)?;
        let product = self.source.create_product(&form).await?;
        info!(product_id = product.id, "product registered");
        self.load().await?;
        Ok(product)
    }
}

fn top_bar(state: &AppState) -> TopBarView {
    let customer = state.role == Role::Customer;
    TopBarView {
        title: TITLE.to_string(),
        pill: state.role.pill().to_string(),
        show_profile: customer,
        user_name: state
            .user
            .as_ref()
            .filter(|_| customer)
            .map(|u| u.name.clone()),
        cart_count: customer.then_some(state.cart_items().len()),
        show_logout: state.role != Role::Home,
    }
}

fn nav(state: &AppState) -> NavView {
    let current = state.current_page();
    NavView {
        items: state
            .role
            .nav_pages()
            .into_iter()
            .map(|page| NavItem {
                slug: page.slug().to_string(),
                label: page.label().to_string(),
                active: Some(page) == current,
            })
            .collect(),
    }
}

/// Log every store event until the bus closes
pub fn spawn_event_log(store: &Store) -> tokio::task::JoinHandle<()> {
    use tokio_stream::StreamExt;

    let mut events = store.events();
    tokio::spawn(async move {
        while let Some(envelope) = events.next().await {
            debug!(
                id = %envelope.id,
                event = envelope.event.name(),
                at = %envelope.timestamp,
                "store event"
            );
        }
    })
}
