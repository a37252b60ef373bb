//! Code assembly over a registry
//!
//! The assembler is the dispatch step of a code-generation pass: it finds the
//! generator for an instance's kind, runs it, and parenthesizes the result for
//! the slot it is placed into.

use log::{debug, warn};

use super::{GenerateError, GeneratedCode, Order};
use crate::core::instance::BlockInstance;
use crate::core::registry::BlockRegistry;

/// Dispatches instances to their registered generators
pub struct CodeAssembler<'r> {
    registry: &'r BlockRegistry,
}

impl<'r> CodeAssembler<'r> {
    pub fn new(registry: &'r BlockRegistry) -> Self {
        Self { registry }
    }

    /// Generate code for one instance of `kind`
    pub fn generate(
        &self,
        kind: &str,
        instance: &BlockInstance,
    ) -> Result<GeneratedCode, GenerateError> {
        if instance.kind != kind {
            return Err(GenerateError::KindMismatch {
                expected: kind.to_string(),
                found: instance.kind.clone(),
            });
        }

        let generator = self
            .registry
            .generator(kind)
            .map_err(|_| GenerateError::UnknownKind(kind.to_string()))?;

        match generator.generate(instance) {
            Ok(generated) => {
                debug!("Generated code for block {} ({})", instance.id, kind);
                Ok(generated)
            }
            Err(e) => {
                warn!("Code generation rejected block {}: {}", instance.id, e);
                Err(e)
            }
        }
    }

    /// Generate code for an instance using its own kind
    pub fn generate_instance(&self, instance: &BlockInstance) -> Result<GeneratedCode, GenerateError> {
        self.generate(&instance.kind, instance)
    }

    /// Generate code for an instance placed into a slot of order `outer`
    ///
    /// The expression is wrapped in parentheses when its own order does not
    /// bind tightly enough for the slot.
    pub fn value_to_code(
        &self,
        instance: &BlockInstance,
        outer: Order,
    ) -> Result<String, GenerateError> {
        let generated = self.generate_instance(instance)?;
        if generated.order.needs_parens_in(outer) {
            Ok(format!("({})", generated.code))
        } else {
            Ok(generated.code)
        }
    }

    /// Generate code for each instance, in order
    ///
    /// Stops at the first failing instance.
    pub fn generate_all<'a, I>(&self, instances: I) -> Result<Vec<GeneratedCode>, GenerateError>
    where
        I: IntoIterator<Item = &'a BlockInstance>,
    {
        instances
            .into_iter()
            .map(|instance| self.generate_instance(instance))
            .collect()
    }
}
