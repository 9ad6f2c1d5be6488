//! Store change notifications
//!
//! Every [`Store`](super::state::Store) mutation publishes a [`StoreEvent`] on
//! an [`EventBus`] backed by `tokio::sync::broadcast`. The shell subscribes
//! and decides which regions to re-render; mutators never call the renderer.
//!
//! ```text
//! Store::add_to_cart ──┐
//! Store::set_role ─────┼──▶ EventBus::publish() ──▶ broadcast ──▶ Storefront (re-render)
//! Store::finish_load ──┘                                      ──▶ other subscribers
//! ```

use super::discount::DiscountKind;
use super::navigation::{Role, SubPage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Which filter form an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterTarget {
    Products,
    Customers,
}

/// A state change in the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    RoleChanged {
        role: Role,
    },
    PageChanged {
        role: Role,
        page: SubPage,
    },
    FiltersApplied {
        target: FilterTarget,
    },
    FiltersCleared {
        target: FilterTarget,
    },
    CartChanged {
        product_id: i64,
        added: bool,
    },
    DiscountSelected {
        kind: DiscountKind,
        percent: String,
    },
    DiscountCleared,
    DiscountToggled {
        discount_id: i64,
        active: bool,
    },
    UserChanged {
        customer_id: Option<i64>,
    },
    CatalogLoaded {
        generation: u64,
    },
    CheckoutCompleted {
        order_id: Option<i64>,
    },
}

/// A part of the screen that can be re-rendered on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    TopBar,
    Nav,
    /// Screen header, filters and summaries around the list
    Content,
    /// The paginated list inside the content; re-rendered alone on paging
    List,
}

impl StoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::RoleChanged { .. } => "role_changed",
            StoreEvent::PageChanged { .. } => "page_changed",
            StoreEvent::FiltersApplied { .. } => "filters_applied",
            StoreEvent::FiltersCleared { .. } => "filters_cleared",
            StoreEvent::CartChanged { .. } => "cart_changed",
            StoreEvent::DiscountSelected { .. } => "discount_selected",
            StoreEvent::DiscountCleared => "discount_cleared",
            StoreEvent::DiscountToggled { .. } => "discount_toggled",
            StoreEvent::UserChanged { .. } => "user_changed",
            StoreEvent::CatalogLoaded { .. } => "catalog_loaded",
            StoreEvent::CheckoutCompleted { .. } => "checkout_completed",
        }
    }

    /// Regions whose view may change because of this event
    pub fn dirty_regions(&self) -> &'static [Region] {
        match self {
            StoreEvent::RoleChanged { .. }
            | StoreEvent::CatalogLoaded { .. }
            | StoreEvent::CheckoutCompleted { .. } => {
                &[Region::TopBar, Region::Nav, Region::Content, Region::List]
            }
            StoreEvent::PageChanged { .. } => &[Region::Nav, Region::Content, Region::List],
            // The top bar shows the user and the cart count
            StoreEvent::UserChanged { .. } | StoreEvent::CartChanged { .. } => {
                &[Region::TopBar, Region::Content, Region::List]
            }
            _ => &[Region::Content, Region::List],
        }
    }

    /// Whether the rebuilt list starts again from page 1
    ///
    /// Row-level actions (cart, toggles) keep the reader where they were.
    pub fn resets_paging(&self) -> bool {
        !matches!(
            self,
            StoreEvent::CartChanged { .. }
                | StoreEvent::DiscountToggled { .. }
                | StoreEvent::DiscountSelected { .. }
                | StoreEvent::DiscountCleared
                | StoreEvent::UserChanged { .. }
        )
    }
}

/// Envelope wrapping a store event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: StoreEvent,
}

impl EventEnvelope {
    pub fn new(event: StoreEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; slow receivers observe `Lagged` on their next `recv()`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will get the event.
    pub fn publish(&self, event: StoreEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers, which is fine
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = StoreEvent::CartChanged {
            product_id: 7,
            added: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "cart_changed");
        assert_eq!(json["product_id"], 7);
    }

    #[test]
    fn test_dirty_regions() {
        let role = StoreEvent::RoleChanged {
            role: Role::Customer,
        };
        assert_eq!(role.dirty_regions().len(), 4);

        let toggle = StoreEvent::DiscountToggled {
            discount_id: 1,
            active: false,
        };
        assert_eq!(toggle.dirty_regions(), &[Region::Content, Region::List]);

        let cart = StoreEvent::CartChanged {
            product_id: 1,
            added: true,
        };
        assert_eq!(cart.dirty_regions()[0], Region::TopBar);
    }

    #[test]
    fn test_row_actions_keep_paging() {
        assert!(
            !StoreEvent::CartChanged {
                product_id: 1,
                added: false
            }
            .resets_paging()
        );
        assert!(
            StoreEvent::FiltersApplied {
                target: FilterTarget::Products
            }
            .resets_paging()
        );
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let receivers = bus.publish(StoreEvent::DiscountCleared);
        assert_eq!(receivers, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event, StoreEvent::DiscountCleared);
        assert!(!received.id.is_nil());
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        bus.publish(StoreEvent::CatalogLoaded { generation: 1 });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.id, e2.id);
    }

    #[test]
    fn test_event_bus_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(StoreEvent::DiscountCleared), 0);
    }
}
