//! Code generation
//!
//! Each block kind has a [`CodeGenerator`] that turns one placed instance into
//! a JavaScript expression plus the [`Order`] the expression binds at. The
//! [`assembler::CodeAssembler`] dispatches instances to generators through the
//! registry and applies parenthesization.

pub mod assembler;
pub mod expr;
pub mod order;

use serde::Serialize;

use crate::core::instance::BlockInstance;

pub use assembler::CodeAssembler;
pub use expr::Expr;
pub use order::Order;

/// Output of a generator: expression source and its binding order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCode {
    pub code: String,
    pub order: Order,
}

impl GeneratedCode {
    pub fn new(code: impl Into<String>, order: Order) -> Self {
        Self {
            code: code.into(),
            order,
        }
    }

    /// Render an expression tree
    pub fn from_expr(expr: &Expr, order: Order) -> Self {
        Self::new(expr.to_string(), order)
    }
}

/// Generator for one block kind
pub trait CodeGenerator: Send + Sync {
    /// Generate code for a single instance
    ///
    /// Implementations are pure: the same instance always yields the same code.
    fn generate(&self, instance: &BlockInstance) -> Result<GeneratedCode, GenerateError>;
}

impl<F> CodeGenerator for F
where
    F: Fn(&BlockInstance) -> Result<GeneratedCode, GenerateError> + Send + Sync,
{
    fn generate(&self, instance: &BlockInstance) -> Result<GeneratedCode, GenerateError> {
        self(instance)
    }
}

/// Code generation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// No generator is registered for the kind
    #[error("No generator registered for block kind '{0}'")]
    UnknownKind(String),

    /// Instance was handed to the generator of another kind
    #[error("Generator for '{expected}' received a '{found}' block")]
    KindMismatch { expected: String, found: String },

    /// Required field absent from the instance
    #[error("Block '{kind}' is missing field '{field}'")]
    MissingField { kind: String, field: String },

    /// Field holds a value outside its declared options
    #[error("Block '{kind}' field '{field}' has invalid value {value}: {reason}")]
    InvalidFieldValue {
        kind: String,
        field: String,
        value: String,
        reason: String,
    },
}
