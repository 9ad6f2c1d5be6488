//! Typed error handling for the storefront
//!
//! Callers can match on the specific failure instead of a generic
//! `anyhow::Error`. Reads from the catalog API degrade per section (see
//! [`crate::shell::loader`]); writes surface these errors to the caller.
//!
//! # Error Categories
//!
//! - [`ApiError`]: transport, status and decoding failures of the catalog API
//! - [`ValidationError`]: missing or malformed form fields
//! - [`CartError`]: cart mutations that would break its invariants
//! - [`CheckoutError`]: order assembly and submission failures
//! - [`ConfigError`]: configuration loading and validation
//! - [`RenderError`]: template rendering failures
//!
//! # Example
//!
//! ```rust,ignore
//! match storefront.add_to_cart(7) {
//!     Ok(true) => println!("added"),
//!     Ok(false) => println!("already in cart"),
//!     Err(StoreError::Cart(CartError::OutOfStock { product_id })) => {
//!         println!("product {} is sold out", product_id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type for the storefront
#[derive(Debug, Error)]
pub enum StoreError {
    /// Catalog API errors
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Form validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Cart errors
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Checkout errors
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Rendering errors
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The current role may not open the requested page
    #[error("access denied: role '{role}' cannot open page '{page}'")]
    AccessDenied { role: String, page: String },

    /// A record was not found in the loaded catalog
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },
}

impl StoreError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Api(e) => e.error_code(),
            StoreError::Validation(_) => "VALIDATION_ERROR",
            StoreError::Cart(e) => e.error_code(),
            StoreError::Checkout(e) => e.error_code(),
            StoreError::Config(_) => "CONFIG_ERROR",
            StoreError::Render(_) => "RENDER_ERROR",
            StoreError::AccessDenied { .. } => "ACCESS_DENIED",
            StoreError::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// Message shown to the shopper in an alert box
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Validation(e) => e.user_message(),
            StoreError::Cart(CartError::OutOfStock { .. }) => "Produto sem estoque.".to_string(),
            StoreError::Checkout(CheckoutError::EmptyCart) => {
                "Seu carrinho está vazio!".to_string()
            }
            StoreError::AccessDenied { .. } => "Acesso Negado".to_string(),
            other => format!("Erro ao processar: {}", other),
        }
    }
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors raised while talking to the catalog API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout)
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The server answered with a non-success status
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The response body could not be decoded
    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// The HTTP client could not be constructed
    #[error("invalid HTTP client setup: {0}")]
    Client(String),
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "API_TRANSPORT",
            ApiError::Status { .. } => "API_STATUS",
            ApiError::Decode { .. } => "API_DECODE",
            ApiError::Client(_) => "API_CLIENT",
        }
    }

    /// The endpoint involved, when known
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => Some(endpoint),
            ApiError::Client(_) => None,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single invalid form field
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Errors related to user-entered form data
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One field is invalid
    #[error("invalid field '{field}': {message}")]
    Field { field: String, message: String },

    /// Several fields are invalid
    #[error("{} invalid field(s)", .0.len())]
    Fields(Vec<FieldIssue>),

    /// A JSON filter expression could not be understood
    #[error("invalid filter expression: {0}")]
    Filter(String),
}

impl ValidationError {
    /// Every offending field, in a stable order
    pub fn issues(&self) -> Vec<FieldIssue> {
        match self {
            ValidationError::Field { field, message } => vec![FieldIssue {
                field: field.clone(),
                message: message.clone(),
            }],
            ValidationError::Fields(issues) => issues.clone(),
            ValidationError::Filter(message) => vec![FieldIssue {
                field: "filter".to_string(),
                message: message.clone(),
            }],
        }
    }

    pub fn user_message(&self) -> String {
        let fields: Vec<String> = self.issues().into_iter().map(|i| i.field).collect();
        format!("Preencha corretamente: {}", fields.join(", "))
    }
}

// =============================================================================
// Cart Errors
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product id is not in the loaded catalog
    #[error("product {product_id} is not in the catalog")]
    UnknownProduct { product_id: i64 },

    /// The product has no stock left
    #[error("product {product_id} is out of stock")]
    OutOfStock { product_id: i64 },

    /// The product is not in the cart
    #[error("product {product_id} is not in the cart")]
    NotInCart { product_id: i64 },
}

impl CartError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CartError::UnknownProduct { .. } => "CART_UNKNOWN_PRODUCT",
            CartError::OutOfStock { .. } => "CART_OUT_OF_STOCK",
            CartError::NotInCart { .. } => "CART_NOT_IN_CART",
        }
    }
}

// =============================================================================
// Checkout Errors
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to buy
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// Installments requested outside 1..=6, or for a method that has none
    #[error("{installments} installment(s) not allowed for {method}")]
    InvalidInstallments { method: String, installments: u8 },

    /// Only customers can place orders
    #[error("checkout requires the customer role")]
    NotCustomer,

    /// The order API rejected or failed the submission
    #[error("order submission failed: {0}")]
    Submit(#[source] ApiError),
}

impl CheckoutError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckoutError::EmptyCart => "CHECKOUT_EMPTY_CART",
            CheckoutError::InvalidInstallments { .. } => "CHECKOUT_INSTALLMENTS",
            CheckoutError::NotCustomer => "CHECKOUT_NOT_CUSTOMER",
            CheckoutError::Submit(_) => "CHECKOUT_SUBMIT",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The YAML could not be parsed
    #[error("invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of its allowed range
    #[error("invalid config value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

// =============================================================================
// Render Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum RenderError {
    /// A template failed to parse or render
    #[error("template '{template}' failed: {message}")]
    Template { template: String, message: String },

    /// Nothing has been rendered into the requested region yet
    #[error("no list is mounted on the current screen")]
    NoListMounted,
}

impl RenderError {
    pub(crate) fn template(template: &str, err: &tera::Error) -> Self {
        // tera nests the useful detail in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        RenderError::Template {
            template: template.to_string(),
            message,
        }
    }
}
