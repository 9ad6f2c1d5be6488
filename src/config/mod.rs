//! Configuration loading and management

use crate::core::discount::DiscountRuleTable;
use crate::core::error::ConfigError;
use crate::core::query::DEFAULT_PAGE_SIZE;
use crate::entities::ProductKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`StorefrontConfig::api_base_url`]
pub const API_URL_ENV: &str = "KABOM_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Storefront configuration
///
/// Every field has a default, so an empty YAML document is valid.
///
/// ```yaml
/// api_base_url: http://localhost:5000/api
/// page_size: 10
/// request_timeout_secs: 10
/// current_user_id: 36
/// discount_rules:
///   - segment: loyalty
///     kind: fidelidade
///     title: Cliente VIP
///     description: Recompensa por sua fidelidade.
///     percent: 20
///     style: roxo
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Base URL of the catalog API, without trailing slash
    pub api_base_url: String,

    /// Rows per page in every list
    pub page_size: usize,

    /// Per-request timeout for the HTTP client
    pub request_timeout_secs: u64,

    /// Kinds offered in the product filter form
    pub product_kinds: Vec<ProductKind>,

    /// Customer treated as logged in when the customer view opens
    pub current_user_id: Option<i64>,

    /// Segment → offer table used by the discount picker
    pub discount_rules: DiscountRuleTable,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 10,
            product_kinds: ProductKind::ALL.to_vec(),
            current_user_id: Some(1),
            discount_rules: DiscountRuleTable::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides (`KABOM_API_URL`)
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                key: "api_base_url".to_string(),
                message: format!("'{}' is not an http(s) URL", self.api_base_url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
