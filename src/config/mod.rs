//! Configuration module for xrmquery.
//!
//! Handles the settings file: default join operator, junction name table and
//! schema descriptor files.

mod settings;

pub use settings::{expand_env_vars, QuerySettings, SchemaSettings, Settings, SettingsError};
