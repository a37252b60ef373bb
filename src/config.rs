//! Registry configuration
//!
//! Configuration is plain JSON; every member is optional.
//!
//! ```json
//! { "duplicate_policy": "overwrite" }
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when a block kind is registered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the second registration
    #[default]
    Reject,
    /// Replace the earlier registration
    Overwrite,
}

/// Settings for a [`BlockRegistry`](crate::core::registry::BlockRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub duplicate_policy: DuplicatePolicy,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a configuration from JSON text
pub fn from_json_str(json: &str) -> Result<RegistryConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a configuration file
pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<RegistryConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading registry config {}", path.display()))?;
    let config =
        from_json_str(&text).with_context(|| format!("parsing registry config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_rejects_duplicates() {
        assert_eq!(
            RegistryConfig::default().duplicate_policy,
            DuplicatePolicy::Reject
        );
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        assert_eq!(from_json_str("{}").unwrap(), RegistryConfig::default());
    }

    #[test]
    fn test_parse_overwrite() {
        let config = from_json_str(r#"{"duplicate_policy":"overwrite"}"#).unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Overwrite);
    }

    #[test]
    fn test_unknown_policy_is_error() {
        assert!(from_json_str(r#"{"duplicate_policy":"merge"}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"duplicate_policy":"reject"}}"#).unwrap();

        let config = load_from_path(file.path()).unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }
}
