//! Shopping cart
//!
//! The cart stores product ids only, at most one of each. Prices are looked
//! up in the current catalog whenever totals are computed.

use super::discount::ActiveDiscount;
use crate::entities::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<i64>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.items.contains(&product_id)
    }

    /// Add a product; returns `false` when it was already in the cart
    pub fn add(&mut self, product_id: i64) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.items.push(product_id);
        true
    }

    /// Remove a product; returns `false` when it was not in the cart
    pub fn remove(&mut self, product_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|id| *id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn ids(&self) -> &[i64] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart products in insertion order; ids missing from the catalog are skipped
    pub fn resolve(&self, catalog: &[Product]) -> Vec<Product> {
        self.items
            .iter()
            .filter_map(|id| catalog.iter().find(|p| p.id == *id))
            .cloned()
            .collect()
    }

    pub fn totals(&self, catalog: &[Product], discount: Option<&ActiveDiscount>) -> CartTotals {
        CartTotals::compute(&self.resolve(catalog), discount)
    }
}

/// Subtotal, discount and total of a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub item_count: usize,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    pub fn compute(items: &[Product], discount: Option<&ActiveDiscount>) -> Self {
        let subtotal: Decimal = items.iter().map(|p| p.price).sum();
        let discount = discount.map_or(Decimal::ZERO, |d| d.amount_off(subtotal));
        Self {
            item_count: items.len(),
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::discount::DiscountKind;
    use crate::entities::ProductKind;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Headset", ProductKind::Periferico, Decimal::from(60)),
            Product::new(2, "Cabo HDMI", ProductKind::Outro, Decimal::from(40)),
        ]
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut cart = Cart::new();
        assert!(cart.add(1));
        assert!(!cart.add(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(2);
        assert!(cart.remove(1));
        assert!(!cart.remove(1));
        assert_eq!(cart.ids(), &[2]);
    }

    #[test]
    fn test_totals_with_discount() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(2);
        let discount = ActiveDiscount {
            kind: DiscountKind::Promocional,
            title: "Primeira Compra".to_string(),
            description: String::new(),
            percent: Decimal::from(10),
        };

        let totals = cart.totals(&catalog(), Some(&discount));
        assert_eq!(totals.subtotal, Decimal::from(100));
        assert_eq!(totals.discount, Decimal::from(10));
        assert_eq!(totals.total, Decimal::from(90));
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let mut cart = Cart::new();
        cart.add(99);
        cart.add(2);
        let totals = cart.totals(&catalog(), None);
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.total, Decimal::from(40));
    }
}
