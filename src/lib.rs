//! # Kabom
//!
//! Storefront and store-admin screens for Kabom Eletrônicos, rendered to HTML.
//!
//! ## Features
//!
//! - **Paginated Lists**: Generic list component with column descriptors, row clicks and action buttons
//! - **Filtering**: Text, exact and inclusive numeric-range criteria over any [`core::entity::Record`]
//! - **Observable State**: A `Store` that publishes an event for every mutation
//! - **Region Diffing**: Only the parts of the page whose markup changed are re-rendered
//! - **Discount Rules**: Declarative segment → offer table, overridable from YAML
//! - **Checkout**: Typed order assembly with installment checks
//! - **Data Sources**: HTTP catalog API client or a seeded in-memory catalog
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kabom::prelude::*;
//! use std::sync::Arc;
//!
//! let mut app = Storefront::new(Arc::new(SeedCatalog::new()), StorefrontConfig::default())?;
//! app.load().await?;
//! app.enter(Role::Customer)?;
//! app.apply_product_filters(ProductFilters {
//!     kind: Some(ProductKind::Hardware),
//!     price_min: "30".to_string(),
//!     ..Default::default()
//! })?;
//! app.next_page()?; // re-renders the list region only
//!
//! println!("{}", app.document()?);
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod entities;
pub mod render;
pub mod screens;
pub mod shell;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        discount::{ActiveDiscount, DiscountRule, DiscountRuleTable, Segment, SegmentLists},
        entity::Record,
        error::{ApiError, CartError, CheckoutError, ConfigError, RenderError, StoreError, ValidationError},
        events::{EventEnvelope, Region, StoreEvent},
        field::FieldValue,
        filter::{Criteria, Criterion, CustomerFilters, ProductFilters},
        navigation::{Capabilities, Role, SubPage},
        state::{AppState, Catalog, Store},
        validation::{NewCustomer, NewProduct},
    };

    // === Entities ===
    pub use crate::entities::{Customer, Discount, Product, ProductKind, StatMetric};

    // === Rendering ===
    pub use crate::render::{Cell, Column, PaginatedList, Patch, Templates, Tone};

    // === Shell ===
    pub use crate::config::StorefrontConfig;
    pub use crate::screens::ScreenAction;
    pub use crate::shell::{LoadReport, Outcome, Payment, Section, Storefront};

    // === Data sources ===
    pub use crate::api::{ApiClient, CatalogSource, OrderReceipt, OrderRequest, PaymentMethod};
    pub use crate::storage::SeedCatalog;
}
