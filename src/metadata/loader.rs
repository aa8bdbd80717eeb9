//! Loading entity descriptors from TOML or JSON files.
//!
//! Descriptor files stand in for code generation when the entity types are
//! only known at runtime:
//!
//! ```toml
//! [[entity]]
//! logical_name = "account"
//! primary_key = "accountid"
//!
//! [[entity.attribute]]
//! property = "Name"
//! logical_name = "name"
//!
//! [[entity.relationship]]
//! property = "Contacts"
//! schema_name = "contact_customer_accounts"
//! target = "contact"
//!
//! [junctions]
//! new_account_project = "new_accountproject"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::config::{Settings, SettingsError};

use super::descriptor::EntityDescriptor;
use super::registry::{Schema, SchemaBuilder};

/// Error type for schema loading.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    #[error("Schema file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read schema file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entity registered twice: {0}")]
    DuplicateEntity(String),

    #[error("Unsupported schema file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SchemaFile {
    #[serde(rename = "entity")]
    entities: Vec<EntityDescriptor>,
    junctions: HashMap<String, String>,
}

/// Accumulates descriptors from several sources into one [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaLoader {
    builder: SchemaBuilder,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from a builder that already has early-bound types registered.
    pub fn with_builder(builder: SchemaBuilder) -> Self {
        Self { builder }
    }

    pub fn load_toml_str(self, content: &str) -> Result<Self, SchemaLoadError> {
        let file: SchemaFile = toml::from_str(content)?;
        Ok(self.merge(file))
    }

    pub fn load_json_str(self, content: &str) -> Result<Self, SchemaLoadError> {
        let file: SchemaFile = serde_json::from_str(content)?;
        Ok(self.merge(file))
    }

    /// Load a `.toml` or `.json` descriptor file.
    pub fn load_file<P: AsRef<Path>>(self, path: P) -> Result<Self, SchemaLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SchemaLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        debug!("loading schema descriptors from {}", path.display());

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => self.load_toml_str(&content),
            Some("json") => self.load_json_str(&content),
            _ => Err(SchemaLoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Load every file listed in the settings and apply its query defaults.
    pub fn from_settings(settings: &Settings) -> Result<Schema, SchemaLoadError> {
        let mut loader = Self::new();
        for path in settings.schema.resolved_files()? {
            loader = loader.load_file(path)?;
        }
        loader.builder = loader.builder.settings(settings.clone());
        loader.finish()
    }

    pub fn finish(self) -> Result<Schema, SchemaLoadError> {
        self.builder.build()
    }

    fn merge(mut self, file: SchemaFile) -> Self {
        self.builder = self.builder.entities(file.entities);
        for (schema_name, junction) in file.junctions {
            self.builder = self.builder.junction(schema_name, junction);
        }
        self
    }
}

impl Schema {
    /// Build a schema from a single TOML descriptor document.
    pub fn from_toml_str(content: &str) -> Result<Schema, SchemaLoadError> {
        SchemaLoader::new().load_toml_str(content)?.finish()
    }

    /// Build a schema from a single JSON descriptor document.
    pub fn from_json_str(content: &str) -> Result<Schema, SchemaLoadError> {
        SchemaLoader::new().load_json_str(content)?.finish()
    }
}
