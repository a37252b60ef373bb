//! Placed block instances
//!
//! Mirrors the block object of the editor's workspace JSON:
//! `{"type": "bmp280_read_temperature", "id": "...", "fields": {"addr": "0x76"}}`.
//! Position and connection members are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field::FieldValue;
use super::BlockId;

/// A configured occurrence of a block kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Block kind key
    #[serde(rename = "type")]
    pub kind: String,
    /// Instance identifier
    #[serde(default)]
    pub id: BlockId,
    /// Current field values by field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldValue>,
}

impl BlockInstance {
    /// Create an instance of `kind` with a fresh id and no field values
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: BlockId::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Set a field value, builder style
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Set a field value
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Read a field value
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Read a text field value
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::as_string)
    }

    /// Parse an instance from workspace JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to workspace JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
