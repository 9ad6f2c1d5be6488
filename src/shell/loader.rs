//! Catalog loading
//!
//! All collections are requested at once and joined. Each section succeeds
//! or fails on its own: a failed section keeps whatever the store already
//! had and is reported so its screen can show an error panel.

use crate::api::CatalogSource;
use crate::core::discount::Segment;
use crate::core::money::format_brl;
use crate::core::state::{Catalog, Store};
use crate::entities::{Customer, Discount, Product, StatMetric};
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// A part of the catalog fetched by its own request(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Products,
    Customers,
    Discounts,
    Stats,
    Segments,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Products,
        Section::Customers,
        Section::Discounts,
        Section::Stats,
        Section::Segments,
    ];

    /// Name used in error panels
    pub fn label(&self) -> &'static str {
        match self {
            Section::Products => "produtos",
            Section::Customers => "clientes",
            Section::Discounts => "descontos",
            Section::Stats => "estatísticas",
            Section::Segments => "segmentos de clientes",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one load
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub generation: u64,
    /// Failed sections with the error message, in section order
    pub failures: Vec<(Section, String)>,
    /// False when a newer load superseded this one
    pub installed: bool,
}

impl LoadReport {
    pub fn failure(&self, section: Section) -> Option<&str> {
        self.failures
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Metrics computed locally when the source has none
pub fn derive_stats(products: &[Product], customers: &[Customer], discounts: &[Discount]) -> Vec<StatMetric> {
    let stock_value: Decimal = products.iter().map(Product::stock_value).sum();
    let spent: Decimal = customers.iter().map(|c| c.total_spent).sum();
    vec![
        StatMetric::new(1, "Produtos cadastrados", products.len().to_string()),
        StatMetric::new(2, "Clientes cadastrados", customers.len().to_string()),
        StatMetric::new(
            3,
            "Descontos ativos",
            discounts.iter().filter(|d| d.active).count().to_string(),
        ),
        StatMetric::new(4, "Valor em estoque", format_brl(stock_value)),
        StatMetric::new(
            5,
            "Produtos com estoque baixo",
            products.iter().filter(|p| p.low_stock()).count().to_string(),
        ),
        StatMetric::new(6, "Total gasto pelos clientes", format_brl(spent)),
    ]
}

/// Fetch every section concurrently, falling back to `previous` per section
pub async fn fetch_catalog(source: &dyn CatalogSource, previous: &Catalog) -> (Catalog, Vec<(Section, String)>) {
    let segment_requests = join_all(Segment::ALL.into_iter().map(|segment| async move {
        (segment, source.segment(segment).await)
    }));

    let (products, customers, discounts, stats, segments) = futures::join!(
        source.products(),
        source.customers(),
        source.discounts(),
        source.stats(),
        segment_requests,
    );

    let mut failures = Vec::new();
    let mut keep = |section: Section, err: &dyn fmt::Display| {
        warn!(section = section.label(), error = %err, "section failed to load");
        failures.push((section, err.to_string()));
    };

    let products = products.unwrap_or_else(|err| {
        keep(Section::Products, &err);
        previous.products.clone()
    });
    let customers = customers.unwrap_or_else(|err| {
        keep(Section::Customers, &err);
        previous.customers.clone()
    });
    let discounts = discounts.unwrap_or_else(|err| {
        keep(Section::Discounts, &err);
        previous.discounts.clone()
    });
    let stats = match stats {
        Ok(stats) if stats.is_empty() => derive_stats(&products, &customers, &discounts),
        Ok(stats) => stats,
        Err(err) => {
            keep(Section::Stats, &err);
            previous.stats.clone()
        }
    };

    // A failed segment keeps its previous members; the first error is reported
    let mut lists = previous.segments.clone();
    let mut segment_error = None;
    for (segment, result) in segments {
        match result {
            Ok(entries) => lists.insert(segment, entries.into_iter().map(|e| e.customer_id)),
            Err(err) => {
                segment_error.get_or_insert(format!("{}: {}", segment, err));
            }
        }
    }
    if let Some(message) = segment_error {
        keep(Section::Segments, &message);
    }

    (
        Catalog {
            products,
            customers,
            discounts,
            stats,
            segments: lists,
        },
        failures,
    )
}

/// Load the catalog into the store
///
/// A load that finishes after a newer one has started is dropped.
pub async fn reload(store: &Store, source: &dyn CatalogSource) -> LoadReport {
    let generation = store.begin_load();
    let previous = store.read(|state| state.catalog.clone());
    let (catalog, failures) = fetch_catalog(source, &previous).await;

    let counts = (catalog.products.len(), catalog.customers.len(), catalog.discounts.len());
    let installed = store.finish_load(generation, catalog);
    info!(
        generation,
        products = counts.0,
        customers = counts.1,
        discounts = counts.2,
        failed = failures.len(),
        installed,
        "catalog loaded"
    );

    LoadReport {
        generation,
        failures,
        installed,
    }
}
