//! Checkout: order assembly and submission

use crate::api::{CatalogSource, OrderDiscount, OrderItem, OrderReceipt, OrderRequest, PaymentMethod};
use crate::config::StorefrontConfig;
use crate::core::error::CheckoutError;
use crate::core::money::format_brl;
use crate::core::navigation::Role;
use crate::core::state::{AppState, Store};
use crate::render::view::DetailView;
use tracing::{info, warn};

/// Customer id used when nobody is logged in
pub const FALLBACK_CUSTOMER_ID: i64 = 1;

/// How the customer pays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payment {
    pub method: PaymentMethod,
    pub installments: u8,
}

impl Payment {
    pub fn new(method: PaymentMethod, installments: u8) -> Self {
        Self {
            method,
            installments,
        }
    }

    fn check(&self) -> Result<(), CheckoutError> {
        if self.installments == 0 || self.installments > self.method.max_installments() {
            return Err(CheckoutError::InvalidInstallments {
                method: self.method.as_str().to_string(),
                installments: self.installments,
            });
        }
        Ok(())
    }
}

impl Default for Payment {
    fn default() -> Self {
        Self::new(PaymentMethod::Pix, 1)
    }
}

fn customer_id(state: &AppState, config: &StorefrontConfig) -> i64 {
    state
        .user
        .as_ref()
        .map(|u| u.id)
        .or(config.current_user_id)
        .unwrap_or(FALLBACK_CUSTOMER_ID)
}

/// Build the order for the current cart
///
/// Prices come from the loaded catalog, the total already has the active
/// discount taken off.
pub fn build_order(
    state: &AppState,
    config: &StorefrontConfig,
    payment: Payment,
) -> Result<OrderRequest, CheckoutError> {
    if state.role != Role::Customer {
        return Err(CheckoutError::NotCustomer);
    }
    let items = state.cart_items();
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    payment.check()?;

    let totals = state.cart_totals();
    Ok(OrderRequest {
        customer_id: customer_id(state, config),
        items: items
            .iter()
            .map(|p| OrderItem {
                product_id: p.id,
                price: p.price,
            })
            .collect(),
        total: totals.total,
        payment_method: payment.method,
        installments: payment.installments,
        discount: state.active_discount.as_ref().map(OrderDiscount::from),
    })
}

/// Summary shown in the checkout modal
pub fn summary(state: &AppState) -> DetailView {
    let customer = state
        .user
        .as_ref()
        .map_or("Cliente Anônimo", |u| u.name.as_str());
    let mut view = DetailView::new("Finalizar Pedido")
        .row("Cliente", customer)
        .row("Total a pagar", format_brl(state.cart_totals().total));
    if let Some(discount) = &state.active_discount {
        view = view.row("Cupom aplicado", discount.kind.as_str());
    }
    let methods: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
    view.row("Forma de Pagamento", methods.join(", "))
}

/// Place the order for the current cart
///
/// On success the cart and discount are cleared and the customer goes back
/// to the catalog. On failure the state is left as it was.
pub async fn checkout(
    store: &Store,
    source: &dyn CatalogSource,
    config: &StorefrontConfig,
    payment: Payment,
) -> Result<OrderReceipt, CheckoutError> {
    let order = store.read(|state| build_order(state, config, payment))?;

    let receipt = source.submit_order(&order).await.map_err(|err| {
        warn!(error = %err, customer_id = order.customer_id, "order rejected");
        CheckoutError::Submit(err)
    })?;

    store.complete_checkout(receipt.order_id);
    info!(
        customer_id = order.customer_id,
        items = order.items.len(),
        total = %order.total,
        method = order.payment_method.as_str(),
        order_id = ?receipt.order_id,
        "order placed"
    );
    Ok(receipt)
}
