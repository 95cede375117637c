//! Configuration file support for sbom-graph.
//!
//! Provides YAML-based configuration through `sbom-graph.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::dto::OutputFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "sbom-graph.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
    pub batch_size: Option<usize>,
    pub max_depth: Option<usize>,
    pub max_walks: Option<usize>,
    pub disable_cache: Option<bool>,
    /// Relative paths are resolved against the config file's directory.
    pub store_dir: Option<PathBuf>,
    pub keep_generations: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let mut config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    if let (Some(store_dir), Some(base)) = (config.store_dir.as_ref(), path.parent()) {
        if store_dir.is_relative() {
            config.store_dir = Some(base.join(store_dir));
        }
    }

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (name, value) in [
        ("batch_size", config.batch_size),
        ("max_depth", config.max_depth),
        ("max_walks", config.max_walks),
        ("keep_generations", config.keep_generations),
    ] {
        if value == Some(0) {
            bail!(
                "Invalid config: {} must be greater than zero.\n\n\
                 💡 Hint: Remove the key to use the default value.",
                name
            );
        }
    }

    if let Some(store_dir) = &config.store_dir {
        if store_dir.as_os_str().is_empty() {
            bail!(
                "Invalid config: store_dir must not be empty.\n\n\
                 💡 Hint: Remove the key to print paths without persisting them."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
