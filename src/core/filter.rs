//! Filter predicate evaluation over records
//!
//! Criteria are an ordered map from field name to a [`Criterion`]. A record
//! is kept when every criterion accepts it. Blank criteria never filter.
//!
//! # JSON form
//!
//! ```text
//! {"kind": "Hardware", "price>=": "30", "price<=": 100, "name~": "mouse"}
//! ```
//!
//! - `field`: exact match
//! - `field~`: case-insensitive substring
//! - `field>=` / `field<=`: inclusive numeric bounds

use super::entity::Record;
use super::error::ValidationError;
use super::field::{FieldValue, coerce_number};
use crate::entities::ProductKind;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single user-entered constraint on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Criterion {
    /// Case-insensitive substring
    Contains(String),
    /// Exact equality (category, kind)
    Equals(String),
    /// Inclusive numeric bounds, kept as the raw text the user typed
    Range {
        min: Option<String>,
        max: Option<String>,
    },
}

impl Criterion {
    pub fn range(min: impl Into<String>, max: impl Into<String>) -> Self {
        Criterion::Range {
            min: Some(min.into()),
            max: Some(max.into()),
        }
    }

    pub fn at_least(min: impl Into<String>) -> Self {
        Criterion::Range {
            min: Some(min.into()),
            max: None,
        }
    }

    pub fn at_most(max: impl Into<String>) -> Self {
        Criterion::Range {
            min: None,
            max: Some(max.into()),
        }
    }

    /// True when the criterion cannot reject anything
    pub fn is_blank(&self) -> bool {
        match self {
            Criterion::Contains(s) | Criterion::Equals(s) => s.trim().is_empty(),
            Criterion::Range { min, max } => {
                bound(min.as_deref()).is_none() && bound(max.as_deref()).is_none()
            }
        }
    }

    /// Check one field value against this criterion
    ///
    /// `None` means the record has no such field.
    pub fn accepts(&self, value: Option<&FieldValue>) -> bool {
        match self {
            Criterion::Contains(term) => {
                let term = term.trim();
                if term.is_empty() {
                    return true;
                }
                match value.and_then(FieldValue::as_str) {
                    Some(text) => text.to_lowercase().contains(&term.to_lowercase()),
                    None => false,
                }
            }
            Criterion::Equals(expected) => {
                let expected = expected.trim();
                if expected.is_empty() {
                    return true;
                }
                match value {
                    Some(FieldValue::String(s)) => s == expected,
                    Some(FieldValue::Boolean(b)) => expected.parse::<bool>() == Ok(*b),
                    Some(other) => match (other.as_decimal(), coerce_number(expected)) {
                        (Some(a), Some(b)) => a == b,
                        _ => false,
                    },
                    None => false,
                }
            }
            Criterion::Range { min, max } => {
                let min = bound(min.as_deref());
                let max = bound(max.as_deref());
                if min.is_none() && max.is_none() {
                    return true;
                }
                let Some(actual) = value.and_then(FieldValue::as_decimal) else {
                    return false;
                };
                min.is_none_or(|m| actual >= m) && max.is_none_or(|m| actual <= m)
            }
        }
    }
}

/// Unparseable bounds are dropped rather than failing the filter
fn bound(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(coerce_number)
}

/// Ordered set of criteria, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    entries: IndexMap<String, Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, criterion: Criterion) -> Self {
        self.insert(field, criterion);
        self
    }

    /// Set the criterion for a field, replacing any previous one
    pub fn insert(&mut self, field: impl Into<String>, criterion: Criterion) {
        self.entries.insert(field.into(), criterion);
    }

    pub fn get(&self, field: &str) -> Option<&Criterion> {
        self.entries.get(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No criterion at all, or only blank ones
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Criterion::is_blank)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Decide whether a record passes every criterion
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.entries.iter().all(|(field, criterion)| {
            criterion.is_blank() || criterion.accepts(record.field(field).as_ref())
        })
    }

    /// Keep the matching records, preserving their relative order
    pub fn apply<R: Record>(&self, records: &[R]) -> Vec<R> {
        if self.is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|r| self.matches(*r))
            .cloned()
            .collect()
    }

    /// Parse the JSON filter form
    ///
    /// Bounds on the same field merge into one range. Values may be strings,
    /// numbers or booleans; `null` values are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ValidationError::Filter("expected a JSON object".to_string()))?;

        let mut criteria = Criteria::new();
        for (key, raw) in obj {
            let text = match raw {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(ValidationError::Filter(format!(
                        "unsupported value for '{}': {}",
                        key, other
                    )));
                }
            };

            if let Some(field) = key.strip_suffix(">=") {
                criteria.merge_bound(field, Some(text), None);
            } else if let Some(field) = key.strip_suffix("<=") {
                criteria.merge_bound(field, None, Some(text));
            } else if let Some(field) = key.strip_suffix('~') {
                criteria.insert(field, Criterion::Contains(text));
            } else {
                criteria.insert(key.as_str(), Criterion::Equals(text));
            }
        }
        Ok(criteria)
    }

    fn merge_bound(&mut self, field: &str, min: Option<String>, max: Option<String>) {
        match self.entries.get_mut(field) {
            Some(Criterion::Range {
                min: cur_min,
                max: cur_max,
            }) => {
                if min.is_some() {
                    *cur_min = min;
                }
                if max.is_some() {
                    *cur_max = max;
                }
            }
            _ => self.insert(field, Criterion::Range { min, max }),
        }
    }
}

/// Convenience form of [`Criteria::matches`]
pub fn matches<R: Record>(record: &R, criteria: &Criteria) -> bool {
    criteria.matches(record)
}

/// Convenience form of [`Criteria::apply`]
pub fn apply<R: Record>(records: &[R], criteria: &Criteria) -> Vec<R> {
    criteria.apply(records)
}

// =============================================================================
// Filter forms
// =============================================================================

/// The product filter form (catalog, store products, stock)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilters {
    pub name: String,
    pub kind: Option<ProductKind>,
    pub price_min: String,
    pub price_max: String,
    pub min_discount: String,
}

impl ProductFilters {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_criteria(&self) -> Criteria {
        let mut criteria = Criteria::new()
            .with("name", Criterion::Contains(self.name.clone()))
            .with(
                "price",
                Criterion::Range {
                    min: Some(self.price_min.clone()),
                    max: Some(self.price_max.clone()),
                },
            )
            .with("discount_percent", Criterion::at_least(self.min_discount.clone()));
        if let Some(kind) = self.kind {
            criteria.insert("kind", Criterion::Equals(kind.label().to_string()));
        }
        criteria
    }
}

/// The customer filter form on the admin customers screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerFilters {
    pub name: String,
    pub location: String,
    pub spent_min: String,
    pub spent_max: String,
    pub min_points: String,
}

impl CustomerFilters {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_criteria(&self) -> Criteria {
        Criteria::new()
            .with("name", Criterion::Contains(self.name.clone()))
            .with("location", Criterion::Contains(self.location.clone()))
            .with(
                "total_spent",
                Criterion::Range {
                    min: Some(self.spent_min.clone()),
                    max: Some(self.spent_max.clone()),
                },
            )
            .with("loyalty_points", Criterion::at_least(self.min_points.clone()))
    }
}
