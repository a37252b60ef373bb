//! Block categories
//!
//! Each category module contributes block definitions and generators. The
//! plugin entry point [`register_builtin_blocks`] loads all of them.

pub mod sensor;

use crate::core::registry::{BlockRegistry, RegistryError};

/// Register every built-in block kind
///
/// Called once while the plugin loads, before the registry is sealed.
pub fn register_builtin_blocks(registry: &BlockRegistry) -> Result<(), RegistryError> {
    sensor::bmp280::register(registry)?;
    log::debug!("Built-in blocks registered ({} kinds)", registry.count());
    Ok(())
}

/// Build a sealed registry holding the built-in blocks
pub fn builtin_registry() -> Result<BlockRegistry, RegistryError> {
    let registry = BlockRegistry::new();
    register_builtin_blocks(&registry)?;
    registry.seal();
    Ok(registry)
}
