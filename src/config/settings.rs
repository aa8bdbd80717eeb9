//! TOML-based configuration for xrmquery.
//!
//! Supports a config file (xrmquery.toml) with environment variable expansion
//! in schema file paths.
//!
//! Example configuration:
//! ```toml
//! [query]
//! default_join_operator = "left_outer"
//!
//! [junctions]
//! new_project_contact = "new_projectcontact"
//!
//! [schema]
//! files = ["${SCHEMA_DIR}/entities.toml"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::query::JoinOperator;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Query construction defaults.
    pub query: QuerySettings,

    /// Extra relationship schema name → junction entity mappings.
    pub junctions: HashMap<String, String>,

    /// Schema descriptor sources.
    pub schema: SchemaSettings,
}

/// Query construction defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Join operator for links that do not set one.
    pub default_join_operator: Option<JoinOperator>,
}

/// Schema descriptor sources.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SchemaSettings {
    /// Descriptor files (TOML or JSON), loaded in order.
    pub files: Vec<String>,

    /// Directory relative `files` are resolved against. Set by
    /// [`Settings::from_file`] to the config file's directory.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl SchemaSettings {
    /// Descriptor file paths with environment variables expanded.
    ///
    /// Relative paths are joined onto `base_dir` when it is set, and left
    /// relative to the working directory otherwise.
    pub fn resolved_files(&self) -> Result<Vec<PathBuf>, SettingsError> {
        self.files
            .iter()
            .map(|f| {
                let path = PathBuf::from(expand_env_vars(f)?);
                Ok(match &self.base_dir {
                    Some(base) if path.is_relative() => base.join(path),
                    _ => path,
                })
            })
            .collect()
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut settings: Settings = toml::from_str(&content)?;
        settings.schema.base_dir = path.parent().map(Path::to_path_buf);
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `XRMQUERY_CONFIG`
    /// 2. `./xrmquery.toml`
    /// 3. `~/.config/xrmquery/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("XRMQUERY_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("xrmquery.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("xrmquery").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                var_name.push(ch);
                chars.next();
            }
            if var_name.is_empty() {
                // lone $
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
