//! WASM API — `#[wasm_bindgen]` exports for the editor frontend.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_plugin` / `destroy_plugin` — lifecycle
//! - `get_block_definitions` — schemas to pass to `defineBlocksWithJsonArray`
//! - `generate_code` — one instance in, `{code, order}` out
//! - `validate_instance` — schema check for a single instance
//!
//! Every function returns a JSON string; failures are `{"error": "..."}`.

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::categories::register_builtin_blocks;
use crate::codegen::{CodeAssembler, Order};
use crate::config;
use crate::core::instance::BlockInstance;
use crate::core::registry::BlockRegistry;

// ── Global state ────────────────────────────────────────────────────────────

thread_local! {
    static REGISTRY: RefCell<Option<BlockRegistry>> = RefCell::new(None);
}

fn with_registry<R>(f: impl FnOnce(&BlockRegistry) -> R) -> Result<R, String> {
    REGISTRY.with(|cell| match cell.borrow().as_ref() {
        Some(registry) => Ok(f(registry)),
        None => Err("Plugin not initialized. Call init_plugin() first.".into()),
    })
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct InitResponse {
    kinds: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct CodeResponse {
    code: String,
    order: Order,
    precedence: f64,
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn parse_instance(instance_json: &str) -> Result<BlockInstance, String> {
    BlockInstance::from_json(instance_json).map_err(|e| format!("Invalid block JSON: {}", e))
}

// ── Exported functions ──────────────────────────────────────────────────────

/// Build and seal the registry. `config_json` may be empty.
#[wasm_bindgen]
pub fn init_plugin(config_json: &str) -> String {
    console_error_panic_hook::set_once();

    let cfg = if config_json.trim().is_empty() {
        config::RegistryConfig::default()
    } else {
        match config::from_json_str(config_json) {
            Ok(c) => c,
            Err(e) => return json_err(e.to_string()),
        }
    };

    let registry = BlockRegistry::with_config(cfg);
    if let Err(e) = register_builtin_blocks(&registry) {
        return json_err(e.to_string());
    }
    registry.seal();

    let kinds = registry.kinds();
    REGISTRY.with(|cell| {
        *cell.borrow_mut() = Some(registry);
    });
    serde_json::to_string(&InitResponse { kinds }).unwrap_or_default()
}

#[wasm_bindgen]
pub fn destroy_plugin() {
    REGISTRY.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn get_block_definitions() -> String {
    match with_registry(|r| r.definitions_json()) {
        Ok(defs) => defs.to_string(),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn generate_code(instance_json: &str) -> String {
    let instance = match parse_instance(instance_json) {
        Ok(i) => i,
        Err(e) => return json_err(e),
    };

    match with_registry(|r| CodeAssembler::new(r).generate_instance(&instance)) {
        Ok(Ok(generated)) => serde_json::to_string(&CodeResponse {
            precedence: generated.order.precedence(),
            code: generated.code,
            order: generated.order,
        })
        .unwrap_or_default(),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn validate_instance(instance_json: &str) -> String {
    let instance = match parse_instance(instance_json) {
        Ok(i) => i,
        Err(e) => return json_err(e),
    };

    match with_registry(|r| r.validate_instance(&instance)) {
        Ok(Ok(result)) => serde_json::to_string(&result).unwrap_or_default(),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}
