//! Application shell: catalog loading, checkout and the render cycle

pub mod app;
pub mod checkout;
pub mod loader;

pub use app::{Outcome, Storefront, TITLE, spawn_event_log};
pub use checkout::{Payment, build_order};
pub use loader::{LoadReport, Section, reload};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::core::events::Region;
    use crate::core::filter::ProductFilters;
    use crate::core::navigation::{Role, SubPage};
    use crate::entities::ProductKind;
    use crate::screens::ScreenAction;
    use crate::storage::SeedCatalog;
    use std::sync::Arc;

    async fn storefront() -> Storefront {
        let mut app = Storefront::new(Arc::new(SeedCatalog::new()), StorefrontConfig::default()).unwrap();
        app.load().await.unwrap();
        app.render().unwrap();
        app
    }

    fn regions(patches: &[crate::render::Patch]) -> Vec<Region> {
        patches.iter().map(|p| p.region).collect()
    }

    #[tokio::test]
    async fn test_landing_page_first() {
        let app = storefront().await;
        let html = app.document().unwrap();
        assert!(html.contains("Visão do Cliente"));
        assert!(html.contains("Visão da Loja"));
        assert!(app.screen().is_none());
    }

    #[tokio::test]
    async fn test_enter_customer_layout() {
        let mut app = storefront().await;
        let patches = app.enter(Role::Customer).unwrap();
        assert!(regions(&patches).contains(&Region::TopBar));

        let html = app.document().unwrap();
        assert!(html.contains("Kabom Eletrônicos"));
        assert!(html.contains("CLIENTE"));
        assert!(html.contains("Catálogo de produtos"));
        assert!(html.contains("Página 1 de 3"));
        // configured customer is logged in
        assert!(app.store().read(|s| s.user.as_ref().map(|u| u.id)) == Some(1));
    }

    #[tokio::test]
    async fn test_paging_patches_only_the_list() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();

        let patches = app.go_to_page(3).unwrap();
        assert_eq!(regions(&patches), vec![Region::List]);
        assert_eq!(app.list().unwrap().page_ids().len(), 3);

        // already on the last page
        assert!(app.next_page().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_row_action_keeps_page_filter_resets_it() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();
        app.go_to_page(2).unwrap();

        let patches = app.click_action(0).unwrap();
        assert!(regions(&patches).contains(&Region::TopBar));
        assert_eq!(app.list().unwrap().page(), 2);
        assert_eq!(app.store().read(|s| s.cart.len()), 1);

        app.apply_product_filters(ProductFilters {
            kind: Some(ProductKind::Hardware),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(app.list().unwrap().page(), 1);
    }

    #[tokio::test]
    async fn test_customer_cannot_open_store_pages() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();
        app.navigate(SubPage::Stock).unwrap();
        assert!(app.access_denied());
        assert!(app.document().unwrap().contains("Acesso Negado"));
        assert!(app.list().is_none());
    }

    #[tokio::test]
    async fn test_store_nav_hides_customer_pages() {
        let mut app = storefront().await;
        app.enter(Role::StoreAdmin).unwrap();
        let nav = app.surface().get(Region::Nav).unwrap().to_string();
        assert!(nav.contains("Estoque"));
        assert!(!nav.contains("Carrinho"));
        assert!(app.document().unwrap().contains("Produtos (Visão da Loja)"));
    }

    #[tokio::test]
    async fn test_offers_and_coupon() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();
        let offers = app.offers();
        assert!(!offers.is_empty());

        app.select_offer(0).unwrap();
        assert!(app.store().read(|s| s.active_discount.is_some()));
        assert!(app.select_offer(99).is_err());

        app.navigate(SubPage::Cart).unwrap();
        match app.screen_action(ScreenAction::RemoveCoupon).unwrap() {
            Outcome::Patched(_) => {}
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(app.store().read(|s| s.active_discount.is_none()));
    }

    #[tokio::test]
    async fn test_checkout_button_with_empty_cart() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();
        app.navigate(SubPage::Cart).unwrap();
        assert!(app.document().unwrap().contains("Seu carrinho está vazio."));
        assert!(app.screen_action(ScreenAction::Checkout).is_err());
    }

    #[tokio::test]
    async fn test_full_checkout_flow() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();
        app.click_action(0).unwrap();
        app.navigate(SubPage::Cart).unwrap();

        match app.screen_action(ScreenAction::Checkout).unwrap() {
            Outcome::Overlay(html) => assert!(html.contains("Finalizar Pedido")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        let receipt = app.checkout(Payment::default()).await.unwrap();
        assert_eq!(receipt.order_id, Some(1));
        assert_eq!(app.store().read(|s| s.customer_page), SubPage::Catalog);
        assert!(app.document().unwrap().contains("Catálogo de produtos"));
    }

    #[tokio::test]
    async fn test_cart_count_skips_products_gone_from_catalog() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();
        app.click_action(0).unwrap();
        app.click_action(1).unwrap();
        assert!(app.document().unwrap().contains(r#"data-count="2""#));

        // product 2 disappears on the next reload
        let mut catalog = app.store().read(|s| s.catalog.clone());
        catalog.products.retain(|p| p.id != 2);
        let generation = app.store().begin_load();
        assert!(app.store().finish_load(generation, catalog));
        app.render().unwrap();

        assert_eq!(app.store().read(|s| s.cart.len()), 2);
        assert!(app.document().unwrap().contains(r#"data-count="1""#));
    }

    #[tokio::test]
    async fn test_row_click_and_profile() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();
        let detail = app.click_row(0).unwrap();
        assert_eq!(detail.title, "Detalhes do produto");
        assert!(app.detail_html().unwrap().unwrap().contains("Detalhes do produto"));

        let profile = app.profile().unwrap();
        assert_eq!(profile.title, "Detalhes do cliente");
        assert!(app.close_detail().is_some());
    }

    #[tokio::test]
    async fn test_logout_returns_to_landing() {
        let mut app = storefront().await;
        app.enter(Role::Customer).unwrap();
        app.click_action(0).unwrap();
        app.logout().unwrap();
        assert!(app.store().read(|s| s.cart.is_empty()));
        assert!(app.document().unwrap().contains("Visão da Loja"));
        assert_eq!(app.surface().get(Region::TopBar), Some(""));
    }
}
