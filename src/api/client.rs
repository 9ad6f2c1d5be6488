//! HTTP implementation of [`CatalogSource`] on top of `reqwest`

use super::CatalogSource;
use super::types::{ErrorBody, OrderReceipt, OrderRequest, SegmentEntry};
use crate::config::StorefrontConfig;
use crate::core::discount::Segment;
use crate::core::error::ApiError;
use crate::core::validation::{NewCustomer, NewProduct};
use crate::entities::{Customer, Discount, Product};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the catalog REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kabom/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(endpoint = path, "GET");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport(path, &e))?;
        decode(path, response).await
    }

    /// GET a JSON array, skipping the rows that do not decode
    async fn get_rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let rows: Vec<Value> = self.get_json(path).await?;
        let total = rows.len();
        let decoded: Vec<T> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value(row) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(endpoint = path, index, error = %err, "skipping malformed row");
                    None
                }
            })
            .collect();
        if decoded.len() < total {
            debug!(endpoint = path, kept = decoded.len(), total, "decoded with skips");
        }
        Ok(decoded)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(endpoint = path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| transport(path, &e))?;
        decode(path, response).await
    }
}

fn transport(endpoint: &str, err: &reqwest::Error) -> ApiError {
    let message = if err.is_timeout() {
        "timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    };
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message,
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(|e| transport(endpoint, &e))?;

    if !status.is_success() {
        // Prefer the API's own message ({"erro": "..."}) over the raw body
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|b| b.erro)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_rows("/produtos").await
    }

    async fn customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get_rows("/clientes").await
    }

    async fn discounts(&self) -> Result<Vec<Discount>, ApiError> {
        self.get_rows("/descontos").await
    }

    async fn segment(&self, segment: Segment) -> Result<Vec<SegmentEntry>, ApiError> {
        self.get_json(&format!("/clientes/{}", segment.api_path()))
            .await
    }

    async fn recommendations(&self, product_id: i64) -> Result<Vec<Product>, ApiError> {
        self.get_json(&format!("/produtos/{}/recomendacoes", product_id))
            .await
    }

    async fn create_customer(&self, form: &NewCustomer) -> Result<Customer, ApiError> {
        self.post_json("/clientes", form).await
    }

    async fn create_product(&self, form: &NewProduct) -> Result<Product, ApiError> {
        self.post_json("/produtos", form).await
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ApiError> {
        self.post_json("/checkout", order).await
    }
}
