//! Application state container
//!
//! [`Store`] owns the single [`AppState`] behind an `Arc<RwLock<_>>` and
//! publishes a [`StoreEvent`] after every mutation. Readers take cheap
//! snapshots; nothing outside this module mutates state directly.

use super::cart::{Cart, CartTotals};
use super::discount::{ActiveDiscount, DiscountRule, SegmentLists};
use super::error::{CartError, StoreError};
use super::events::{EventBus, EventEnvelope, FilterTarget, StoreEvent};
use super::filter::{CustomerFilters, ProductFilters};
use super::navigation::{Capabilities, Role, SubPage};
use crate::entities::{Customer, Discount, Product, StatMetric};
use rust_decimal::Decimal;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

/// Everything fetched from the catalog source
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub discounts: Vec<Discount>,
    pub stats: Vec<StatMetric>,
    pub segments: SegmentLists,
}

impl Catalog {
    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn customer(&self, id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn discount(&self, id: i64) -> Option<&Discount> {
        self.discounts.iter().find(|d| d.id == id)
    }

    /// Discounts shown to shoppers
    pub fn active_discounts(&self) -> Vec<Discount> {
        self.discounts.iter().filter(|d| d.active).cloned().collect()
    }

    /// Σ price × stock over the whole catalog
    pub fn stock_value(&self) -> Decimal {
        self.products.iter().map(Product::stock_value).sum()
    }
}

/// Snapshot of the whole storefront state
#[derive(Debug, Clone)]
pub struct AppState {
    pub role: Role,
    pub customer_page: SubPage,
    pub store_page: SubPage,
    pub user: Option<Customer>,
    pub active_discount: Option<ActiveDiscount>,
    pub cart: Cart,
    pub product_filters: ProductFilters,
    pub customer_filters: CustomerFilters,
    pub catalog: Catalog,
    /// Generation of the most recently started load
    pub load_generation: u64,
    /// Generation whose results are in `catalog` (0 = nothing loaded)
    pub loaded_generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            role: Role::Home,
            customer_page: SubPage::Catalog,
            store_page: SubPage::Products,
            user: None,
            active_discount: None,
            cart: Cart::new(),
            product_filters: ProductFilters::default(),
            customer_filters: CustomerFilters::default(),
            catalog: Catalog::default(),
            load_generation: 0,
            loaded_generation: 0,
        }
    }
}

impl AppState {
    /// Page shown for the current role, `None` on the landing page
    pub fn current_page(&self) -> Option<SubPage> {
        match self.role {
            Role::Home => None,
            Role::Customer => Some(self.customer_page),
            Role::StoreAdmin => Some(self.store_page),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(self.role)
    }

    pub fn cart_items(&self) -> Vec<Product> {
        self.cart.resolve(&self.catalog.products)
    }

    pub fn cart_totals(&self) -> CartTotals {
        self.cart
            .totals(&self.catalog.products, self.active_discount.as_ref())
    }
}

/// Shared, observable state container
///
/// Cloning yields another handle to the same state and bus.
#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
    bus: EventBus,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            bus: EventBus::default(),
        }
    }

    // A panic while holding the lock leaves plain data behind; keep using it
    fn read_guard(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a mutation, then publish its event (if any) after the lock is released
    fn mutate<R>(&self, f: impl FnOnce(&mut AppState) -> (R, Option<StoreEvent>)) -> R {
        let (result, event) = {
            let mut state = self.write_guard();
            f(&mut state)
        };
        if let Some(event) = event {
            debug!(event = event.name(), "state changed");
            self.bus.publish(event);
        }
        result
    }

    /// Run a closure against the current state
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.read_guard())
    }

    pub fn snapshot(&self) -> AppState {
        self.read_guard().clone()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.bus.subscribe()
    }

    /// Subscribe as a stream; lagged notifications are skipped
    pub fn events(&self) -> impl Stream<Item = EventEnvelope> + Unpin + Send + 'static {
        BroadcastStream::new(self.bus.subscribe()).filter_map(Result::ok)
    }

    // === Navigation ===

    pub fn set_role(&self, role: Role) {
        self.mutate(|state| {
            if state.role == role {
                return ((), None);
            }
            state.role = role;
            ((), Some(StoreEvent::RoleChanged { role }))
        })
    }

    /// Switch the sub-page of the current role
    ///
    /// Pages the role may not open are still recorded; the shell renders them
    /// as access denied.
    pub fn navigate(&self, page: SubPage) {
        self.mutate(|state| {
            let role = state.role;
            let slot = match role {
                Role::Home => return ((), None),
                Role::Customer => &mut state.customer_page,
                Role::StoreAdmin => &mut state.store_page,
            };
            if *slot == page {
                return ((), None);
            }
            *slot = page;
            ((), Some(StoreEvent::PageChanged { role, page }))
        })
    }

    /// Leave the layout: back to the landing page with an empty cart
    pub fn logout(&self) {
        self.mutate(|state| {
            state.role = Role::Home;
            state.cart.clear();
            state.active_discount = None;
            ((), Some(StoreEvent::RoleChanged { role: Role::Home }))
        })
    }

    // === Filters ===

    pub fn apply_product_filters(&self, filters: ProductFilters) {
        self.mutate(|state| {
            state.product_filters = filters;
            (
                (),
                Some(StoreEvent::FiltersApplied {
                    target: FilterTarget::Products,
                }),
            )
        })
    }

    pub fn clear_product_filters(&self) {
        self.mutate(|state| {
            state.product_filters = ProductFilters::default();
            (
                (),
                Some(StoreEvent::FiltersCleared {
                    target: FilterTarget::Products,
                }),
            )
        })
    }

    pub fn apply_customer_filters(&self, filters: CustomerFilters) {
        self.mutate(|state| {
            state.customer_filters = filters;
            (
                (),
                Some(StoreEvent::FiltersApplied {
                    target: FilterTarget::Customers,
                }),
            )
        })
    }

    pub fn clear_customer_filters(&self) {
        self.mutate(|state| {
            state.customer_filters = CustomerFilters::default();
            (
                (),
                Some(StoreEvent::FiltersCleared {
                    target: FilterTarget::Customers,
                }),
            )
        })
    }

    // === Cart ===

    /// Add a product to the cart
    ///
    /// Returns `Ok(false)` without publishing when the product is already there.
    pub fn add_to_cart(&self, product_id: i64) -> Result<bool, CartError> {
        self.mutate(|state| {
            let Some(product) = state.catalog.product(product_id) else {
                return (Err(CartError::UnknownProduct { product_id }), None);
            };
            if !product.in_stock() {
                return (Err(CartError::OutOfStock { product_id }), None);
            }
            if !state.cart.add(product_id) {
                return (Ok(false), None);
            }
            (
                Ok(true),
                Some(StoreEvent::CartChanged {
                    product_id,
                    added: true,
                }),
            )
        })
    }

    pub fn remove_from_cart(&self, product_id: i64) -> Result<(), CartError> {
        self.mutate(|state| {
            if !state.cart.remove(product_id) {
                return (Err(CartError::NotInCart { product_id }), None);
            }
            (
                Ok(()),
                Some(StoreEvent::CartChanged {
                    product_id,
                    added: false,
                }),
            )
        })
    }

    // === Discounts ===

    /// Make `rule` the active discount, replacing any previous one
    pub fn select_discount(&self, rule: &DiscountRule) {
        let active = ActiveDiscount::from(rule);
        self.mutate(|state| {
            let event = StoreEvent::DiscountSelected {
                kind: active.kind,
                percent: active.percent.to_string(),
            };
            state.active_discount = Some(active);
            ((), Some(event))
        })
    }

    pub fn clear_discount(&self) {
        self.mutate(|state| match state.active_discount.take() {
            Some(_) => ((), Some(StoreEvent::DiscountCleared)),
            None => ((), None),
        })
    }

    /// Flip a catalog discount between active and inactive
    pub fn toggle_discount(&self, discount_id: i64) -> Result<bool, StoreError> {
        self.mutate(|state| {
            match state
                .catalog
                .discounts
                .iter_mut()
                .find(|d| d.id == discount_id)
            {
                Some(discount) => {
                    let active = discount.toggle();
                    (
                        Ok(active),
                        Some(StoreEvent::DiscountToggled {
                            discount_id,
                            active,
                        }),
                    )
                }
                None => (
                    Err(StoreError::NotFound {
                        kind: "discount",
                        id: discount_id,
                    }),
                    None,
                ),
            }
        })
    }

    // === Session ===

    pub fn set_user(&self, user: Option<Customer>) {
        self.mutate(|state| {
            let customer_id = user.as_ref().map(|c| c.id);
            if state.user.as_ref().map(|c| c.id) == customer_id {
                return ((), None);
            }
            state.user = user;
            ((), Some(StoreEvent::UserChanged { customer_id }))
        })
    }

    /// Clear cart and discount after a successful order and go back to the catalog
    pub fn complete_checkout(&self, order_id: Option<i64>) {
        self.mutate(|state| {
            state.cart.clear();
            state.active_discount = None;
            state.customer_page = SubPage::Catalog;
            ((), Some(StoreEvent::CheckoutCompleted { order_id }))
        })
    }

    // === Loading ===

    /// Start a new load and return its generation
    ///
    /// Any load still in flight becomes stale.
    pub fn begin_load(&self) -> u64 {
        let mut state = self.write_guard();
        state.load_generation += 1;
        state.load_generation
    }

    /// Install a loaded catalog unless a newer load has started since
    pub fn finish_load(&self, generation: u64, catalog: Catalog) -> bool {
        self.mutate(|state| {
            if generation != state.load_generation {
                debug!(
                    generation,
                    latest = state.load_generation,
                    "dropping stale load"
                );
                return (false, None);
            }
            state.catalog = catalog;
            state.loaded_generation = generation;
            // Keep the logged-in customer in sync with the fresh data
            let user_id = state.user.as_ref().map(|u| u.id);
            if let Some(fresh) = user_id.and_then(|id| state.catalog.customer(id)).cloned() {
                state.user = Some(fresh);
            }
            (true, Some(StoreEvent::CatalogLoaded { generation }))
        })
    }
}
