//! ApiClient against a stub catalog API served by axum

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use kabom::prelude::*;
use kabom::shell::reload;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Recorded {
    orders: Arc<Mutex<Vec<Value>>>,
}

async fn produtos() -> Json<Value> {
    // prices come back as strings from the DECIMAL columns
    Json(json!([
        {
            "id_produto": 1,
            "nome_produto": "Placa de Vídeo",
            "tipo_produto": "Hardware",
            "preco_atual": "1899.90",
            "desconto_percent": "5",
            "pontos_fidelidade": 40,
            "estoque_atual": 3,
            "estoque_minimo": 5,
            "specs_hardware": "8GB GDDR6"
        },
        {
            "id_produto": 2,
            "nome_produto": "Mouse Gamer",
            "tipo_produto": "Periférico",
            "preco_atual": 149.5,
            "estoque_atual": null
        }
    ]))
}

async fn clientes() -> Json<Value> {
    Json(json!([
        {
            "id_cliente": 7,
            "nome_cliente": "Ana Souza",
            "cidade": "Curitiba",
            "total_gasto": "320.00",
            "data_cadastro": "2024-03-01T10:00:00.000Z",
            "email": "ana@example.com",
            "pontos_acumulados": 120
        }
    ]))
}

async fn descontos() -> Json<Value> {
    Json(json!([]))
}

async fn segmento(Path(segment): Path<String>) -> (StatusCode, Json<Value>) {
    match segment.as_str() {
        "fidelidade" => (StatusCode::OK, Json(json!([{ "id_cliente": 7 }]))),
        "inativos" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "erro": "falha na consulta" })),
        ),
        _ => (StatusCode::OK, Json(json!([]))),
    }
}

async fn recomendacoes(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "erro": "Produto não encontrado" })),
        );
    }
    (StatusCode::OK, Json(json!([])))
}

async fn checkout(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.orders.lock().unwrap().push(body);
    Json(json!({ "mensagem": "Pedido realizado com sucesso!", "id_pedido": 42 }))
}

async fn stub_server() -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/produtos", get(produtos))
        .route("/api/produtos/{id}/recomendacoes", get(recomendacoes))
        .route("/api/clientes", get(clientes))
        .route("/api/clientes/{segment}", get(segmento))
        .route("/api/descontos", get(descontos))
        .route("/api/checkout", post(checkout))
        .with_state(recorded.clone());
    (serve(app).await, recorded)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_products_with_string_prices() {
    let (base, _) = stub_server().await;
    let products = client(&base).products().await.unwrap();

    assert_eq!(products.len(), 2);
    let gpu = &products[0];
    assert_eq!(gpu.name, "Placa de Vídeo");
    assert_eq!(gpu.kind, ProductKind::Hardware);
    assert_eq!(gpu.price, Decimal::new(189990, 2));
    assert_eq!(gpu.discount_percent, 5);
    assert!(gpu.low_stock());
    assert_eq!(gpu.hardware_specs.as_deref(), Some("8GB GDDR6"));

    let mouse = &products[1];
    assert_eq!(mouse.kind, ProductKind::Periferico);
    assert_eq!(mouse.price, Decimal::new(1495, 1));
    assert_eq!(mouse.stock, 0);
}

#[tokio::test]
async fn test_bad_rows_do_not_sink_the_section() {
    let app = Router::new().route(
        "/api/produtos",
        get(|| async {
            Json(json!([
                { "id_produto": 1, "nome_produto": "Placa de Vídeo", "preco_atual": "1899.90" },
                { "id_produto": 2, "nome_produto": "Mouse", "preco_atual": "R$ 149,50", "estoque_atual": -1 },
                { "id_produto": 3, "nome_produto": "Teclado", "preco_atual": 300 },
                { "nome_produto": "sem id", "preco_atual": 10 }
            ]))
        }),
    );
    let base = serve(app).await;
    let products = client(&base).products().await.unwrap();

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(products[0].price, Decimal::new(189990, 2));
    assert_eq!(products[1].price, Decimal::ZERO);
    assert_eq!(products[1].stock, 0);
    assert_eq!(products[2].price, Decimal::from(300));
}

#[tokio::test]
async fn test_customers_alias_columns() {
    let (base, _) = stub_server().await;
    let customers = client(&base).customers().await.unwrap();

    let ana = &customers[0];
    assert_eq!(ana.id, 7);
    assert_eq!(ana.location, "Curitiba");
    assert_eq!(ana.total_spent, Decimal::from(320));
    assert_eq!(ana.loyalty_points, 120);
    assert_eq!(
        ana.registered_at.map(|d| d.to_string()).as_deref(),
        Some("2024-03-01")
    );
}

#[tokio::test]
async fn test_error_body_becomes_status_error() {
    let (base, _) = stub_server().await;
    let err = client(&base).recommendations(404).await.unwrap_err();

    match &err {
        ApiError::Status {
            endpoint,
            status,
            message,
        } => {
            assert_eq!(endpoint, "/produtos/404/recomendacoes");
            assert_eq!(*status, 404);
            assert_eq!(message, "Produto não encontrado");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.error_code(), "API_STATUS");
}

#[tokio::test]
async fn test_segment_lists() {
    let (base, _) = stub_server().await;
    let api = client(&base);

    let loyal = api.segment(Segment::Loyalty).await.unwrap();
    assert_eq!(loyal.len(), 1);
    assert_eq!(loyal[0].customer_id, 7);
    assert!(api.segment(Segment::Inactive).await.is_err());
}

#[tokio::test]
async fn test_checkout_posts_order_body() {
    let (base, recorded) = stub_server().await;
    let order = OrderRequest {
        customer_id: 7,
        items: vec![kabom::api::OrderItem {
            product_id: 1,
            price: Decimal::new(189990, 2),
        }],
        total: Decimal::new(170991, 2),
        payment_method: PaymentMethod::CartaoCredito,
        installments: 3,
        discount: None,
    };

    let receipt = client(&base).submit_order(&order).await.unwrap();
    assert_eq!(receipt.order_id, Some(42));
    assert_eq!(receipt.message, "Pedido realizado com sucesso!");

    let orders = recorded.orders.lock().unwrap();
    let body = &orders[0];
    assert_eq!(body["cliente_id"], 7);
    assert_eq!(body["metodo_pagamento"], "cartao_credito");
    assert_eq!(body["parcelas"], 3);
    assert_eq!(body["items"][0]["id_produto"], 1);
    assert!(body["desconto"].is_null());
}

#[tokio::test]
async fn test_reload_degrades_per_section() {
    let (base, _) = stub_server().await;
    let store = Store::default();
    let report = reload(&store, &client(&base)).await;

    // only the inactive-customers segment fails
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, Section::Segments);
    assert!(report.failures[0].1.contains("inativos"));

    store.read(|s| {
        assert_eq!(s.catalog.products.len(), 2);
        assert_eq!(s.catalog.customers.len(), 1);
        assert!(!s.catalog.stats.is_empty());
        assert!(s.catalog.segments.contains(Segment::Loyalty, 7));
    });
}
