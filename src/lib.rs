//! BMP280 Blocks - block definitions and code generators for a Blockly-style editor
//!
//! This crate provides the declarative schemas for two value blocks that read
//! temperature and pressure from a BMP280 sensor on an I2C bus, and the code
//! generators that turn placed instances into JavaScript calls on the
//! runtime's I2C driver object.

pub mod categories;
pub mod codegen;
pub mod config;
pub mod core;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use categories::{builtin_registry, register_builtin_blocks};
pub use codegen::{CodeAssembler, CodeGenerator, GenerateError, GeneratedCode, Order};
pub use crate::core::block::BlockDefinition;
pub use crate::core::instance::BlockInstance;
pub use crate::core::registry::{BlockRegistry, RegistryError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
