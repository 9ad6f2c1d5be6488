//! Property tests for pagination and filtering

use kabom::core::filter::{Criteria, Criterion, ProductFilters};
use kabom::core::query::{PageState, paginate, total_pages};
use kabom::entities::{Product, ProductKind};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn kind_strategy() -> impl Strategy<Value = ProductKind> {
    prop_oneof![
        Just(ProductKind::Hardware),
        Just(ProductKind::Dispositivo),
        Just(ProductKind::Periferico),
    ]
}

fn products_strategy() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec((kind_strategy(), 0i64..500, 0u32..40), 0..60).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (kind, price, discount))| {
                let id = i as i64 + 1;
                let mut p = Product::new(id, format!("Produto {}", id), kind, Decimal::from(price));
                p.discount_percent = discount;
                p
            })
            .collect()
    })
}

fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
}

proptest! {
    #[test]
    fn test_total_pages_is_ceiling_at_least_one(total in 0usize..1000, size in 1usize..50) {
        let pages = total_pages(total, size);
        prop_assert!(pages >= 1);
        prop_assert_eq!(pages, std::cmp::max(1, total.div_ceil(size)));
    }

    #[test]
    fn test_pages_concatenate_to_the_data(data in prop::collection::vec(any::<u16>(), 0..120), size in 1usize..25) {
        let mut joined = Vec::new();
        for page in 1..=total_pages(data.len(), size) {
            joined.extend_from_slice(paginate(&data, page, size));
        }
        prop_assert_eq!(joined, data);
    }

    #[test]
    fn test_page_state_stays_in_range(total in 0usize..200, size in 1usize..30, target in 0usize..50) {
        let mut state = PageState::new(total, size);
        state.go_to(target);
        prop_assert!(state.page() >= 1);
        prop_assert!(state.page() <= state.total_pages());
        prop_assert!(state.range().len() <= size);
    }

    #[test]
    fn test_filtering_is_idempotent(products in products_strategy(), min in 0i64..500) {
        let criteria = Criteria::new().with("price", Criterion::at_least(min.to_string()));
        let once = criteria.apply(&products);
        let twice = criteria.apply(&once);
        prop_assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_blank_filters_keep_everything(products in products_strategy()) {
        let kept = ProductFilters::default().to_criteria().apply(&products);
        prop_assert_eq!(ids(&kept), ids(&products));
    }

    #[test]
    fn test_price_bounds_are_inclusive(products in products_strategy(), a in 0i64..500, b in 0i64..500) {
        let (lo, hi) = (a.min(b), a.max(b));
        let filters = ProductFilters {
            price_min: lo.to_string(),
            price_max: hi.to_string(),
            ..Default::default()
        };
        let kept = filters.to_criteria().apply(&products);
        let expected: Vec<i64> = products
            .iter()
            .filter(|p| p.price >= Decimal::from(lo) && p.price <= Decimal::from(hi))
            .map(|p| p.id)
            .collect();
        prop_assert_eq!(ids(&kept), expected);
    }

    #[test]
    fn test_kind_filter_keeps_order(products in products_strategy(), kind in kind_strategy()) {
        let filters = ProductFilters {
            kind: Some(kind),
            ..Default::default()
        };
        let kept = filters.to_criteria().apply(&products);
        prop_assert!(kept.iter().all(|p| p.kind == kind));
        let expected: Vec<i64> = products.iter().filter(|p| p.kind == kind).map(|p| p.id).collect();
        prop_assert_eq!(ids(&kept), expected);
    }
}
