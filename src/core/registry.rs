//! Block Registry - Central registry of block kinds
//!
//! Maps each block kind key to its [`BlockDefinition`] and [`CodeGenerator`].
//! The registry is populated once while the plugin loads, then sealed; after
//! that it is read-only and can be shared freely between renderers and code
//! assemblers.

use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::codegen::CodeGenerator;
use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::core::block::BlockDefinition;
use crate::core::field::ValidationResult;
use crate::core::instance::BlockInstance;

/// Definition and generator registered under one kind
#[derive(Clone)]
pub struct RegisteredBlock {
    pub definition: BlockDefinition,
    pub generator: Arc<dyn CodeGenerator>,
}

impl std::fmt::Debug for RegisteredBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredBlock")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct RegistryState {
    blocks: HashMap<String, RegisteredBlock>,
    sealed: bool,
}

/// Registry of block kinds
///
/// Cloning is cheap and every clone shares the same entries. Reads take a
/// shared `parking_lot` lock, so concurrent lookups never contend with each
/// other once registration is over.
#[derive(Clone)]
pub struct BlockRegistry {
    state: Arc<RwLock<RegistryState>>,
    config: RegistryConfig,
}

impl BlockRegistry {
    /// Create a new empty block registry
    ///
    /// # Example
    /// ```
    /// use bmp280_blocks::core::registry::BlockRegistry;
    ///
    /// let registry = BlockRegistry::new();
    /// assert_eq!(registry.count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState::default())),
            config,
        }
    }

    /// Register a block kind
    ///
    /// # Arguments
    /// * `kind` - The block kind key; must match `definition.kind`
    /// * `definition` - The declarative schema
    /// * `generator` - The code generator for instances of this kind
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err(RegistryError)` if the kind is empty, the definition is invalid,
    ///   the kind is taken under [`DuplicatePolicy::Reject`], or the registry
    ///   is sealed
    pub fn register(
        &self,
        kind: &str,
        definition: BlockDefinition,
        generator: Arc<dyn CodeGenerator>,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write();
        if state.sealed {
            return Err(RegistryError::Sealed(kind.to_string()));
        }

        if kind.is_empty() {
            return Err(RegistryError::EmptyKind);
        }
        if definition.kind != kind {
            return Err(RegistryError::ValidationError(format!(
                "Definition kind '{}' does not match registration key '{}'",
                definition.kind, kind
            )));
        }
        definition
            .validate()
            .map_err(|e| RegistryError::ValidationError(e.to_string()))?;

        if state.blocks.contains_key(kind) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::DuplicateBlock(kind.to_string()));
                }
                DuplicatePolicy::Overwrite => {
                    warn!("Overwriting existing registration for block kind '{}'", kind);
                }
            }
        }

        debug!(
            "Registered block kind '{}' with {} field(s)",
            kind,
            definition.fields.len()
        );
        state.blocks.insert(
            kind.to_string(),
            RegisteredBlock {
                definition,
                generator,
            },
        );
        Ok(())
    }

    /// End the registration phase
    ///
    /// Later calls to [`register`](Self::register) fail with
    /// [`RegistryError::Sealed`]. Sealing twice is a no-op.
    pub fn seal(&self) {
        let mut state = self.state.write();
        if !state.sealed {
            state.sealed = true;
            debug!("Block registry sealed with {} kind(s)", state.blocks.len());
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.state.read().sealed
    }

    /// Get the full registration for a kind
    pub fn get_block(&self, kind: &str) -> Result<RegisteredBlock, RegistryError> {
        self.state
            .read()
            .blocks
            .get(kind)
            .cloned()
            .ok_or_else(|| RegistryError::BlockNotFound(kind.to_string()))
    }

    /// Get the definition for a kind
    pub fn definition(&self, kind: &str) -> Result<BlockDefinition, RegistryError> {
        self.get_block(kind).map(|b| b.definition)
    }

    /// Get the generator for a kind
    pub fn generator(&self, kind: &str) -> Result<Arc<dyn CodeGenerator>, RegistryError> {
        self.get_block(kind).map(|b| b.generator)
    }

    /// Get the number of registered kinds
    pub fn count(&self) -> usize {
        self.state.read().blocks.len()
    }

    /// Check if a kind is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.state.read().blocks.contains_key(kind)
    }

    /// All registered kinds, sorted
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.state.read().blocks.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// All definitions, sorted by kind
    pub fn definitions(&self) -> Vec<BlockDefinition> {
        let state = self.state.read();
        let mut defs: Vec<BlockDefinition> = state
            .blocks
            .values()
            .map(|b| b.definition.clone())
            .collect();
        defs.sort_by(|a, b| a.kind.cmp(&b.kind));
        defs
    }

    /// All definitions as a JSON array in the editor's `jsonInit` form
    pub fn definitions_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.definitions().iter().map(|d| d.to_json()).collect())
    }

    /// Check an instance against the schema of its kind
    ///
    /// Every declared field must be present with one of its option values.
    /// Fields the schema does not declare produce warnings.
    pub fn validate_instance(
        &self,
        instance: &BlockInstance,
    ) -> Result<ValidationResult, RegistryError> {
        let definition = self.definition(&instance.kind)?;
        let mut result = ValidationResult::ok();

        for field in &definition.fields {
            match instance.field(field.name()) {
                Some(value) => result = result.merge(field.validate_value(value)),
                None => {
                    result = result.merge(ValidationResult::error(format!(
                        "Block '{}' is missing field '{}'",
                        instance.kind,
                        field.name()
                    )))
                }
            }
        }

        for name in instance.fields.keys() {
            if definition.field(name).is_none() {
                result = result.with_warning(format!(
                    "Block '{}' has undeclared field '{}'",
                    instance.kind, name
                ));
            }
        }

        Ok(result)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Block kind key was empty
    #[error("Block kind cannot be empty")]
    EmptyKind,

    /// Block kind was not found
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// Attempted to register a kind twice
    #[error("Duplicate block kind: {0}")]
    DuplicateBlock(String),

    /// Block definition validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Registration attempted after the registry was sealed
    #[error("Registry is sealed; cannot register '{0}'")]
    Sealed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{GenerateError, GeneratedCode, Order};
    use crate::core::block::OutputType;
    use crate::core::field::{DropdownOption, FieldSpec};

    fn mock_definition(kind: &str) -> BlockDefinition {
        BlockDefinition::new(kind, "mock %1", OutputType::Number)
            .with_field(FieldSpec::dropdown(
                "mode",
                vec![DropdownOption::same("a"), DropdownOption::same("b")],
            ))
            .with_colour(20)
    }

    fn mock_generator(code: &'static str) -> Arc<dyn CodeGenerator> {
        Arc::new(move |_: &BlockInstance| -> Result<GeneratedCode, GenerateError> {
            Ok(GeneratedCode::new(code, Order::Atomic))
        })
    }

    #[test]
    fn test_registry_creation() {
        let registry = BlockRegistry::new();
        assert_eq!(registry.count(), 0);
        assert!(!registry.is_sealed());
    }

    #[test]
    fn test_block_registration() {
        let registry = BlockRegistry::new();
        registry
            .register("mock", mock_definition("mock"), mock_generator("1"))
            .unwrap();

        assert_eq!(registry.count(), 1);
        assert!(registry.contains("mock"));
        assert_eq!(registry.definition("mock").unwrap().colour, 20);
    }

    #[test]
    fn test_empty_kind_rejected() {
        let registry = BlockRegistry::new();
        let result = registry.register("", mock_definition(""), mock_generator("1"));
        assert_eq!(result, Err(RegistryError::EmptyKind));
    }

    #[test]
    fn test_mismatched_kind_rejected() {
        let registry = BlockRegistry::new();
        let result = registry.register("mock", mock_definition("other"), mock_generator("1"));
        assert!(matches!(result, Err(RegistryError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let registry = BlockRegistry::new();
        registry
            .register("mock", mock_definition("mock"), mock_generator("1"))
            .unwrap();
        let result = registry.register("mock", mock_definition("mock"), mock_generator("2"));
        assert_eq!(result, Err(RegistryError::DuplicateBlock("mock".into())));
    }

    #[test]
    fn test_duplicate_overwrites_when_configured() {
        let registry = BlockRegistry::with_config(RegistryConfig {
            duplicate_policy: DuplicatePolicy::Overwrite,
        });
        registry
            .register("mock", mock_definition("mock"), mock_generator("1"))
            .unwrap();
        registry
            .register("mock", mock_definition("mock"), mock_generator("2"))
            .unwrap();

        assert_eq!(registry.count(), 1);
        let generated = registry
            .generator("mock")
            .unwrap()
            .generate(&BlockInstance::new("mock"))
            .unwrap();
        assert_eq!(generated.code, "2");
    }

    #[test]
    fn test_sealed_registry_rejects_registration() {
        let registry = BlockRegistry::new();
        registry.seal();
        registry.seal();
        assert!(registry.is_sealed());
        let result = registry.register("mock", mock_definition("mock"), mock_generator("1"));
        assert_eq!(result, Err(RegistryError::Sealed("mock".into())));
    }

    #[test]
    fn test_sealed_registry_reports_sealed_before_validation() {
        let registry = BlockRegistry::new();
        registry.seal();

        let invalid = mock_definition("mock").with_colour(999);
        let result = registry.register("mock", invalid, mock_generator("1"));
        assert_eq!(result, Err(RegistryError::Sealed("mock".into())));

        let result = registry.register("", mock_definition(""), mock_generator("1"));
        assert_eq!(result, Err(RegistryError::Sealed(String::new())));

        let result = registry.register("mock", mock_definition("other"), mock_generator("1"));
        assert_eq!(result, Err(RegistryError::Sealed("mock".into())));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_clones_share_entries() {
        let registry = BlockRegistry::new();
        let shared = registry.clone();
        registry
            .register("mock", mock_definition("mock"), mock_generator("1"))
            .unwrap();
        assert!(shared.contains("mock"));
    }

    #[test]
    fn test_lookup_missing() {
        let registry = BlockRegistry::new();
        assert!(matches!(
            registry.get_block("nope"),
            Err(RegistryError::BlockNotFound(_))
        ));
    }

    #[test]
    fn test_kinds_sorted() {
        let registry = BlockRegistry::new();
        for kind in ["zeta", "alpha", "mid"] {
            registry
                .register(kind, mock_definition(kind), mock_generator("1"))
                .unwrap();
        }
        assert_eq!(registry.kinds(), vec!["alpha", "mid", "zeta"]);
        let defs = registry.definitions();
        assert_eq!(defs[0].kind, "alpha");
        assert_eq!(registry.definitions_json()[2]["type"], "zeta");
    }

    #[test]
    fn test_validate_instance() {
        let registry = BlockRegistry::new();
        registry
            .register("mock", mock_definition("mock"), mock_generator("1"))
            .unwrap();

        let good = BlockInstance::new("mock").with_field("mode", "b");
        assert!(registry.validate_instance(&good).unwrap().valid);

        let bad = BlockInstance::new("mock").with_field("mode", "c");
        assert!(!registry.validate_instance(&bad).unwrap().valid);

        let missing = BlockInstance::new("mock");
        let result = registry.validate_instance(&missing).unwrap();
        assert!(result.errors[0].contains("missing field 'mode'"));

        let extra = BlockInstance::new("mock")
            .with_field("mode", "a")
            .with_field("colour", "red");
        let result = registry.validate_instance(&extra).unwrap();
        assert!(result.valid);
        assert!(result.has_warnings());

        let unknown = BlockInstance::new("other");
        assert!(registry.validate_instance(&unknown).is_err());
    }
}
