//! Data sources for the storefront
//!
//! [`CatalogSource`] is the seam between the screens and wherever the data
//! lives: the HTTP catalog API ([`ApiClient`]) or the seeded in-memory
//! catalog ([`crate::storage::SeedCatalog`]).

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{OrderDiscount, OrderItem, OrderReceipt, OrderRequest, PaymentMethod, SegmentEntry};

use crate::core::discount::Segment;
use crate::core::error::ApiError;
use crate::core::validation::{NewCustomer, NewProduct};
use crate::entities::{Customer, Discount, Product, StatMetric};
use async_trait::async_trait;

/// Read and write access to the store's catalog
///
/// Each call is independent, so a loader can issue them concurrently and
/// degrade per section.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All products
    async fn products(&self) -> Result<Vec<Product>, ApiError>;

    /// All customers
    async fn customers(&self) -> Result<Vec<Customer>, ApiError>;

    /// Every discount, active or not
    async fn discounts(&self) -> Result<Vec<Discount>, ApiError>;

    /// Store metrics
    ///
    /// Sources without a metrics endpoint return an empty list and the
    /// loader derives the metrics from the other sections.
    async fn stats(&self) -> Result<Vec<StatMetric>, ApiError> {
        Ok(Vec::new())
    }

    /// Members of a customer segment
    async fn segment(&self, segment: Segment) -> Result<Vec<SegmentEntry>, ApiError>;

    /// Products recommended alongside `product_id`
    async fn recommendations(&self, product_id: i64) -> Result<Vec<Product>, ApiError>;

    /// Register a customer (form already validated)
    async fn create_customer(&self, form: &NewCustomer) -> Result<Customer, ApiError>;

    /// Register a product (form already validated)
    async fn create_product(&self, form: &NewProduct) -> Result<Product, ApiError>;

    /// Place an order
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ApiError>;
}
