//! Error types for query construction and rehydration.
//!
//! Every variant except [`QueryError::Service`] is a configuration error: the
//! typed model and the platform schema disagree, and retrying cannot help.

use thiserror::Error;

use crate::service::ServiceError;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while compiling, executing or rehydrating a typed query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A member token names a property with no attribute logical name.
    #[error("no attribute logical name for member '{property}' on entity '{entity}'")]
    MissingAttribute { entity: String, property: String },

    /// A navigation token has no relationship metadata, or no side of the
    /// relationship could be matched.
    #[error("no relationship metadata for navigation '{property}' on entity '{entity}'")]
    MissingRelationship { entity: String, property: String },

    /// The relationship descriptor targets a different entity than the
    /// navigation token was declared with.
    #[error("relationship '{relationship}' targets '{found}' but the navigation expects '{expected}'")]
    TargetMismatch {
        relationship: String,
        expected: String,
        found: String,
    },

    /// No descriptor is registered under this logical name.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// The link tree needs more aliases than the alias alphabet holds.
    #[error("link entity tree needs more than {0} aliases")]
    AliasesExhausted(usize),

    /// A result key refers to an alias that was never assigned.
    #[error("unknown alias '{alias}' in attribute key '{key}'")]
    UnknownAlias { alias: char, key: String },

    /// A rehydrated entity carries no usable identifier.
    #[error("missing identifier attribute '{attribute}' on rehydrated '{entity}'")]
    MissingIdentifier { entity: String, attribute: String },

    /// A relationship path was processed before its parent path.
    #[error("parent of '{path}' was not materialized before its children")]
    ParentNotMaterialized { path: String },

    /// The execution boundary failed; passed through untouched.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl QueryError {
    /// Create a missing-attribute error.
    pub fn missing_attribute(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self::MissingAttribute {
            entity: entity.into(),
            property: property.into(),
        }
    }

    /// Create a missing-relationship error.
    pub fn missing_relationship(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self::MissingRelationship {
            entity: entity.into(),
            property: property.into(),
        }
    }

    /// Check if this error points at a model/schema mismatch rather than the
    /// execution boundary.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Service(_))
    }
}
