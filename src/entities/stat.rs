//! Store metric shown on the statistics screen

use crate::core::entity::Record;
use crate::core::field::FieldValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatMetric {
    pub id: i64,

    #[serde(rename = "metrica")]
    pub label: String,

    /// Already formatted for display
    #[serde(rename = "valor")]
    pub value: String,
}

impl StatMetric {
    pub fn new(id: i64, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            value: value.into(),
        }
    }
}

impl Record for StatMetric {
    fn kind() -> &'static str {
        "stat"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "label" => Some(self.label.as_str().into()),
            "value" => Some(self.value.as_str().into()),
            _ => None,
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["label", "value"]
    }
}
