//! Core module containing the storefront's domain logic
//!
//! Everything here is synchronous and free of I/O: the filter evaluator,
//! pagination, navigation, the cart, discount rules and the state container.

pub mod cart;
pub mod discount;
pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod filter;
pub mod money;
pub mod navigation;
pub mod query;
pub mod state;
pub mod validation;

pub use cart::{Cart, CartTotals};
pub use discount::{ActiveDiscount, DiscountKind, DiscountRule, DiscountRuleTable, Segment, SegmentLists};
pub use entity::Record;
pub use error::{ApiError, CartError, CheckoutError, ConfigError, RenderError, StoreError, ValidationError};
pub use events::{EventBus, EventEnvelope, Region, StoreEvent};
pub use field::FieldValue;
pub use filter::{Criteria, Criterion, CustomerFilters, ProductFilters};
pub use navigation::{Capabilities, Role, SubPage};
pub use query::{PageState, PaginationMeta};
pub use state::{AppState, Catalog, Store};
