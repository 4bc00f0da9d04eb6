//! Optional `keycmp.toml` configuration
//!
//! Every value can also be given on the command line; flags win.

use anyhow::Context;
use clap::ValueEnum;
use keycmp_core::errors::CmpError;
use keycmp_core::logging_facility::Profile;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File looked up in the current directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "keycmp.toml";

/// How `diff` renders its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown summary
    #[default]
    Human,
    /// Full result as JSON
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Key field for both sides (or the base side when `working_key` is set)
    pub key: Option<String>,
    pub working_key: Option<String>,
    /// Fields compared for matched items; empty compares whole items
    #[serde(default)]
    pub fields: Vec<String>,
    pub format: Option<OutputFormat>,
    pub log_profile: Option<Profile>,
}

/// Load the config file
///
/// An explicit path must exist. Without one, `keycmp.toml` in the current
/// directory is used if present, otherwise every value is unset.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<FileConfig> {
    let path = match explicit {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
        None => return Ok(FileConfig::default()),
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = parse_config_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

/// Parse and validate config file contents
pub fn parse_config_str(content: &str) -> Result<FileConfig, CmpError> {
    let config: FileConfig = toml::from_str(content).map_err(|e| CmpError::Serialization {
        message: format!("TOML parse error: {}", e),
    })?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &FileConfig) -> Result<(), CmpError> {
    let named = [("key", &config.key), ("working_key", &config.working_key)];
    for (name, value) in named {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(CmpError::InvalidArgument {
                reason: format!("`{}` must not be empty", name),
            });
        }
    }

    if config.fields.iter().any(|f| f.trim().is_empty()) {
        return Err(CmpError::InvalidArgument {
            reason: "`fields` must not contain empty names".to_string(),
        });
    }

    Ok(())
}
