//! In-memory implementation of CatalogSource for demos and tests
//!
//! Carries the storefront's demo data set: 23 products, 18 customers, four
//! catalog discounts and seven store metrics. Writes (new customers,
//! products and orders) live for as long as the value does.

use crate::api::{CatalogSource, OrderReceipt, OrderRequest, SegmentEntry};
use crate::core::discount::Segment;
use crate::core::error::ApiError;
use crate::core::validation::{NewCustomer, NewProduct};
use crate::entities::{Customer, Discount, Product, ProductKind, StatMetric};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

const PRODUCT_COUNT: i64 = 23;
const CUSTOMER_COUNT: i64 = 18;

/// Products returned per recommendation request
const RECOMMENDATION_LIMIT: usize = 3;

#[derive(Debug, Default)]
struct SeedData {
    products: Vec<Product>,
    customers: Vec<Customer>,
    discounts: Vec<Discount>,
    stats: Vec<StatMetric>,
    orders: Vec<(i64, OrderRequest)>,
}

/// Seeded catalog source
///
/// Cloning shares the same data.
#[derive(Debug, Clone)]
pub struct SeedCatalog {
    data: Arc<RwLock<SeedData>>,
}

impl SeedCatalog {
    /// A catalog holding the demo data set
    pub fn new() -> Self {
        let products = seed_products();
        let discounts = seed_discounts();
        let stats = seed_stats(&products, &discounts);
        Self::from_parts(products, seed_customers(), discounts, stats)
    }

    /// A catalog with no records at all
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    pub fn from_parts(
        products: Vec<Product>,
        customers: Vec<Customer>,
        discounts: Vec<Discount>,
        stats: Vec<StatMetric>,
    ) -> Self {
        Self {
            data: Arc::new(RwLock::new(SeedData {
                products,
                customers,
                discounts,
                stats,
                orders: Vec::new(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SeedData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SeedData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Orders placed so far, with their ids
    pub fn orders(&self) -> Vec<(i64, OrderRequest)> {
        self.read().orders.clone()
    }
}

impl Default for SeedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_products() -> Vec<Product> {
    let kinds = [
        ProductKind::Dispositivo,
        ProductKind::Hardware,
        ProductKind::Periferico,
    ];
    (0..PRODUCT_COUNT)
        .map(|i| {
            let id = i + 1;
            let mut product = Product::new(
                id,
                format!("Produto {}", id),
                kinds[i as usize % kinds.len()],
                Decimal::from(20 + i * 3),
            );
            product.discount_percent = ((i % 4) * 5) as u32;
            product.loyalty_points = (10 + (i % 5) * 5) as u32;
            product.stock = (5 + (i * 2) % 40) as u32;
            product.min_stock = 10;
            product.description = format!(
                "Descrição completa do Produto {}. Informações adicionais e detalhes técnicos.",
                id
            );
            product
        })
        .collect()
}

fn seed_customers() -> Vec<Customer> {
    let cities = ["São Paulo", "Rio de Janeiro", "Belo Horizonte", "Curitiba"];
    (0..CUSTOMER_COUNT)
        .map(|i| {
            let id = i + 1;
            let mut customer = Customer::new(
                id,
                format!("Cliente {}", id),
                cities[i as usize % cities.len()],
            );
            customer.total_spent = Decimal::from(100 + i * 47);
            customer.registered_at =
                NaiveDate::from_ymd_opt(2022, (i % 12 + 1) as u32, (i % 28 + 1) as u32);
            customer.email = Some(format!("cliente{}@email.com", id));
            customer.phone = Some(format!("(11) 9{:03}-0000", id));
            customer.loyalty_points = ((i % 6) * 20) as u32;
            customer
        })
        .collect()
}

fn seed_discounts() -> Vec<Discount> {
    vec![
        Discount::new(
            1,
            "Desconto Boas-vindas",
            "10% de desconto na primeira compra.",
            Decimal::from(10),
            true,
        ),
        Discount::new(
            2,
            "Semana do Cliente",
            "5% em toda a loja para clientes cadastrados.",
            Decimal::from(5),
            true,
        ),
        Discount::new(
            3,
            "Queima de Estoque",
            "Até 20% em produtos selecionados.",
            Decimal::from(20),
            true,
        ),
        Discount::new(
            4,
            "Cupom Expirado",
            "Exemplo de desconto desativado.",
            Decimal::from(15),
            false,
        ),
    ]
}

fn seed_stats(products: &[Product], discounts: &[Discount]) -> Vec<StatMetric> {
    let active = discounts.iter().filter(|d| d.active).count();
    vec![
        StatMetric::new(1, "Faturamento mensal (R$)", "45.230,90"),
        StatMetric::new(2, "Clientes ativos", "1.245"),
        StatMetric::new(3, "Ticket médio (R$)", "145,60"),
        StatMetric::new(4, "Produtos cadastrados", products.len().to_string()),
        StatMetric::new(5, "Cupons ativos", active.to_string()),
        StatMetric::new(6, "Pedidos no último mês", "382"),
        StatMetric::new(7, "Taxa de recompra", "27%"),
    ]
}

/// Whether a customer belongs to a segment in the demo data
fn in_segment(segment: Segment, customer: &Customer) -> bool {
    match segment {
        Segment::FirstPurchase => customer.id <= 3,
        Segment::Promotional => customer.id % 2 == 1,
        Segment::Loyalty => customer.total_spent >= Decimal::from(700),
        Segment::Inactive => customer.id % 5 == 0,
        Segment::HighTicket => customer.total_spent >= Decimal::from(800),
    }
}

fn rejected(endpoint: &str, status: u16, message: impl Into<String>) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status,
        message: message.into(),
    }
}

#[async_trait]
impl CatalogSource for SeedCatalog {
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.read().products.clone())
    }

    async fn customers(&self) -> Result<Vec<Customer>, ApiError> {
        Ok(self.read().customers.clone())
    }

    async fn discounts(&self) -> Result<Vec<Discount>, ApiError> {
        Ok(self.read().discounts.clone())
    }

    async fn stats(&self) -> Result<Vec<StatMetric>, ApiError> {
        Ok(self.read().stats.clone())
    }

    async fn segment(&self, segment: Segment) -> Result<Vec<SegmentEntry>, ApiError> {
        Ok(self
            .read()
            .customers
            .iter()
            .filter(|c| in_segment(segment, c))
            .map(|c| SegmentEntry { customer_id: c.id })
            .collect())
    }

    async fn recommendations(&self, product_id: i64) -> Result<Vec<Product>, ApiError> {
        let data = self.read();
        let product = data
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| {
                rejected(
                    &format!("/produtos/{}/recomendacoes", product_id),
                    404,
                    "Produto não encontrado",
                )
            })?;

        Ok(data
            .products
            .iter()
            .filter(|p| p.kind == product.kind && p.id != product.id)
            .take(RECOMMENDATION_LIMIT)
            .cloned()
            .collect())
    }

    async fn create_customer(&self, form: &NewCustomer) -> Result<Customer, ApiError> {
        let mut data = self.write();
        if data
            .customers
            .iter()
            .any(|c| c.email.as_deref() == Some(form.email.as_str()))
        {
            return Err(rejected("/clientes", 409, "E-mail já cadastrado"));
        }

        let id = data.customers.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let mut customer = Customer::new(id, form.name.clone(), "");
        customer.email = Some(form.email.clone());
        customer.phone = form.phone.clone();
        customer.registered_at = Some(chrono::Local::now().date_naive());
        data.customers.push(customer.clone());

        debug!(customer_id = id, "customer created");
        Ok(customer)
    }

    async fn create_product(&self, form: &NewProduct) -> Result<Product, ApiError> {
        let mut data = self.write();
        let id = data.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let mut product = Product::new(
            id,
            form.name.clone(),
            form.kind.unwrap_or(ProductKind::Outro),
            form.price,
        );
        product.description = form.description.clone();
        product.discount_percent = form.discount_percent.trunc().to_u32().unwrap_or(0);
        data.products.push(product.clone());

        debug!(product_id = id, "product created");
        Ok(product)
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ApiError> {
        let mut data = self.write();
        if order.items.is_empty() {
            return Err(rejected("/checkout", 400, "Carrinho vazio"));
        }
        if !data.customers.iter().any(|c| c.id == order.customer_id) {
            return Err(rejected("/checkout", 404, "Cliente não encontrado"));
        }
        for item in &order.items {
            let product = data
                .products
                .iter_mut()
                .find(|p| p.id == item.product_id)
                .ok_or_else(|| {
                    rejected(
                        "/checkout",
                        404,
                        format!("Produto {} não encontrado", item.product_id),
                    )
                })?;
            product.stock = product.stock.saturating_sub(1);
        }
        if let Some(customer) = data.customers.iter_mut().find(|c| c.id == order.customer_id) {
            customer.total_spent += order.total;
        }

        let order_id = data.orders.len() as i64 + 1;
        data.orders.push((order_id, order.clone()));

        debug!(order_id, items = order.items.len(), "order placed");
        Ok(OrderReceipt {
            message: "Compra realizada com sucesso!".to_string(),
            order_id: Some(order_id),
        })
    }
}
