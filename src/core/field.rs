//! Field system for block inputs
//!
//! Fields are the configurable inputs rendered inline on a block. A field is
//! declared once on the block definition and read back by name from every
//! placed instance.

use serde::{Deserialize, Serialize};

/// Declaration of a single block field
///
/// Serializes to the editor's `args0` entry shape, e.g.
/// `{"type": "field_dropdown", "name": "addr", "options": [["0x76", "0x76"]]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldSpec {
    /// Closed enumeration rendered as a dropdown
    #[serde(rename = "field_dropdown")]
    Dropdown {
        /// Lookup key used when reading the instance value
        name: String,
        /// Ordered (label, value) pairs
        options: Vec<DropdownOption>,
    },
}

impl FieldSpec {
    /// Create a dropdown field
    pub fn dropdown(name: impl Into<String>, options: Vec<DropdownOption>) -> Self {
        FieldSpec::Dropdown {
            name: name.into(),
            options,
        }
    }

    /// Field name, unique within its block definition
    pub fn name(&self) -> &str {
        match self {
            FieldSpec::Dropdown { name, .. } => name,
        }
    }

    /// Dropdown options, in display order
    pub fn options(&self) -> &[DropdownOption] {
        match self {
            FieldSpec::Dropdown { options, .. } => options,
        }
    }

    /// Check a value read from an instance against this declaration
    pub fn validate_value(&self, value: &FieldValue) -> ValidationResult {
        match self {
            FieldSpec::Dropdown { name, options } => {
                let Some(raw) = value.as_string() else {
                    return ValidationResult::error(format!(
                        "Field '{}' must hold a string, got {}",
                        name, value
                    ));
                };
                if options.iter().any(|opt| opt.value() == raw) {
                    ValidationResult::ok()
                } else {
                    ValidationResult::error(format!(
                        "Field '{}' has value '{}' outside its options [{}]",
                        name,
                        raw,
                        options
                            .iter()
                            .map(|opt| opt.value())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                }
            }
        }
    }
}

/// One dropdown entry: display label then stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption(pub String, pub String);

impl DropdownOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        DropdownOption(label.into(), value.into())
    }

    /// Option whose label and value are the same text
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        DropdownOption(text.clone(), text)
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &str {
        &self.1
    }
}

/// Value held by a field on a placed block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value (dropdown values are always text)
    String(String),
    /// Numeric value
    Number(f64),
    /// Checkbox value
    Boolean(bool),
}

impl FieldValue {
    /// Try to convert to string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "'{}'", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Error messages
    pub errors: Vec<String>,
    /// Warning messages
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a validation result with an error
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![msg.into()],
            warnings: Vec::new(),
        }
    }

    /// Add a warning to the validation result
    pub fn with_warning(mut self, msg: impl Into<String>) -> Self {
        self.warnings.push(msg.into());
        self
    }

    /// Check if the validation has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the validation has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Merge another validation result into this one
    pub fn merge(mut self, other: ValidationResult) -> Self {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}
