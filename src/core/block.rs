//! Block definitions
//!
//! A [`BlockDefinition`] is the declarative description of one block kind:
//! its message template, fields, output type and styling. It serializes to the
//! JSON object an editor passes to `jsonInit`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

use super::field::FieldSpec;

/// Highest hue an editor colour accepts
pub const MAX_HUE: u16 = 360;

/// Declarative schema for a block kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Unique block kind key
    #[serde(rename = "type")]
    pub kind: String,
    /// Message template; `%1`..`%n` mark where fields are inlined
    #[serde(rename = "message0")]
    pub message: String,
    /// Ordered field declarations
    #[serde(rename = "args0", default)]
    pub fields: Vec<FieldSpec>,
    /// Type of the value this block produces
    pub output: OutputType,
    /// Display hue
    pub colour: u16,
    /// Hover text
    #[serde(default)]
    pub tooltip: String,
    /// Help page, written as `""` when absent
    #[serde(
        rename = "helpUrl",
        default,
        serialize_with = "serialize_help_url",
        deserialize_with = "deserialize_help_url"
    )]
    pub help_url: Option<String>,
}

impl BlockDefinition {
    /// Create a definition with no fields, hue 0 and no tooltip
    pub fn new(kind: impl Into<String>, message: impl Into<String>, output: OutputType) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            fields: Vec::new(),
            output,
            colour: 0,
            tooltip: String::new(),
            help_url: None,
        }
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the display hue
    pub fn with_colour(mut self, colour: u16) -> Self {
        self.colour = colour;
        self
    }

    /// Set the tooltip
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    /// Set the help URL
    pub fn with_help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = Some(url.into());
        self
    }

    /// Look up a field declaration by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Check the definition's own invariants
    pub fn validate(&self) -> Result<(), BlockError> {
        if self.kind.is_empty() {
            return Err(BlockError::InvalidDefinition(
                "Block kind cannot be empty".into(),
            ));
        }

        if self.colour > MAX_HUE {
            return Err(BlockError::InvalidDefinition(format!(
                "Block '{}' has colour {} above {}",
                self.kind, self.colour, MAX_HUE
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name().is_empty() {
                return Err(BlockError::InvalidDefinition(format!(
                    "Block '{}' declares a field with an empty name",
                    self.kind
                )));
            }
            if !seen.insert(field.name()) {
                return Err(BlockError::DuplicateField {
                    kind: self.kind.clone(),
                    field: field.name().to_string(),
                });
            }
            if field.options().is_empty() {
                return Err(BlockError::InvalidDefinition(format!(
                    "Dropdown '{}' on block '{}' has no options",
                    field.name(),
                    self.kind
                )));
            }
        }

        Ok(())
    }

    /// Serialize to the editor's JSON form
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Output type tag for value blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputType {
    Number,
    String,
    Boolean,
    Array,
}

fn serialize_help_url<S: Serializer>(url: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(url.as_deref().unwrap_or(""))
}

fn deserialize_help_url<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let url = Option::<String>::deserialize(d)?;
    Ok(url.filter(|u| !u.is_empty()))
}

/// Block definition errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockError {
    /// Definition breaks a structural rule
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// Two fields share a name
    #[error("Duplicate field '{field}' on block '{kind}'")]
    DuplicateField { kind: String, field: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::DropdownOption;

    fn sample() -> BlockDefinition {
        BlockDefinition::new("sample_block", "read %1", OutputType::Number)
            .with_field(FieldSpec::dropdown(
                "addr",
                vec![DropdownOption::same("0x76"), DropdownOption::same("0x77")],
            ))
            .with_colour(135)
            .with_tooltip("sample tooltip")
    }

    #[test]
    fn test_definition_json_shape() {
        let json = sample().to_json();
        assert_eq!(json["type"], "sample_block");
        assert_eq!(json["message0"], "read %1");
        assert_eq!(json["output"], "Number");
        assert_eq!(json["colour"], 135);
        assert_eq!(json["tooltip"], "sample tooltip");
        assert_eq!(json["helpUrl"], "");
        assert_eq!(json["args0"][0]["name"], "addr");
    }

    #[test]
    fn test_empty_help_url_reads_back_as_none() {
        let parsed: BlockDefinition = serde_json::from_value(sample().to_json()).unwrap();
        assert_eq!(parsed.help_url, None);
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_help_url_is_kept() {
        let def = sample().with_help_url("https://example.com/bmp280");
        let json = def.to_json();
        assert_eq!(json["helpUrl"], "https://example.com/bmp280");
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_kind() {
        let def = BlockDefinition::new("", "x", OutputType::Number);
        assert!(matches!(def.validate(), Err(BlockError::InvalidDefinition(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_field() {
        let def = sample().with_field(FieldSpec::dropdown("addr", vec![DropdownOption::same("1")]));
        assert_eq!(
            def.validate(),
            Err(BlockError::DuplicateField {
                kind: "sample_block".into(),
                field: "addr".into(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_dropdown() {
        let def = BlockDefinition::new("k", "%1", OutputType::Number)
            .with_field(FieldSpec::dropdown("addr", vec![]));
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_colour() {
        let def = sample().with_colour(400);
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_field_lookup() {
        assert!(sample().field("addr").is_some());
        assert!(sample().field("bus").is_none());
    }
}
