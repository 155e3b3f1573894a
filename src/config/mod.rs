//! Configuration file handling for depsync
//!
//! Values the sync needs (dependency, consumers, remotes, commit message,
//! exclusions) come from three layers, later layers winning:
//! 1. built-in defaults
//! 2. `depsync.yaml` in the workspace root (or an explicit `--config` file)
//! 3. command-line flags ([`ConfigOverrides`])
//!
//! The merged result is validated into [`SyncSettings`].

pub mod settings;

pub use settings::{ConfigOverrides, SyncSettings};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::FetchMode;
use crate::error::{Result, config};

/// Configuration filename looked up in the workspace root
pub const CONFIG_FILE: &str = "depsync.yaml";

/// Contents of `depsync.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Submodule path of the dependency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,

    /// Directory mirrored into consumers (defaults to `dependency`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Consumer directories
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumers: Vec<String>,

    /// Remotes pushed to, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<String>,

    /// Commit message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Extra exclusion globs (`.git` is always excluded)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Fetch strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchMode>,
}

impl ConfigFile {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the configuration for a workspace.
    ///
    /// An explicit path must exist. Without one, `depsync.yaml` in the
    /// workspace root is used when present and defaults otherwise.
    pub fn load(workspace_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => workspace_root.join(path),
            None => workspace_root.join(CONFIG_FILE),
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(config::not_found(path.display().to_string()));
            }
            log::debug!("No {} found, using command-line values only", CONFIG_FILE);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;
        log::debug!("Loaded configuration from {}", path.display());

        Self::from_yaml(&content).map_err(|e| match e {
            crate::error::SyncError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
dependency: bond
consumers:
  - producer/bond
  - consumer/bond
remotes: [origin, backup]
message: "Update bond"
exclude: ["__pycache__"]
fetch: submodule
"#;
        let config = ConfigFile::from_yaml(yaml).unwrap();
        assert_eq!(config.dependency.as_deref(), Some("bond"));
        assert_eq!(config.consumers, vec!["producer/bond", "consumer/bond"]);
        assert_eq!(config.remotes, vec!["origin", "backup"]);
        assert_eq!(config.message.as_deref(), Some("Update bond"));
        assert_eq!(config.fetch, Some(FetchMode::Submodule));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ConfigFile::from_yaml("  \n").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = ConfigFile::from_yaml("dependency: bond\nconsumerz: [a]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_roundtrip_omits_empty_fields() {
        let config = ConfigFile {
            dependency: Some("bond".to_string()),
            consumers: vec!["producer/bond".to_string()],
            ..ConfigFile::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("remotes"));
        assert_eq!(ConfigFile::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_missing_default_file() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load(temp.path(), None).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let result = ConfigFile::load(temp.path(), Some(Path::new("custom.yaml")));
        assert!(matches!(
            result,
            Err(crate::error::SyncError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_load_reports_file_path_on_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "consumers: {broken").unwrap();
        let err = ConfigFile::load(temp.path(), None).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE), "got: {err}");
    }
}
