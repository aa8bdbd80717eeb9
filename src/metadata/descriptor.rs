//! Static schema descriptors for entity types.
//!
//! A descriptor carries everything the translator and resolver need to know
//! about an entity type: its logical name, primary key, the attribute logical
//! name behind each property, and the relationship behind each navigation.

use serde::{Deserialize, Serialize};

use crate::model::{EntityRole, Relationship};

/// Maps a property on a typed entity to its attribute logical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub property: String,
    pub logical_name: String,
}

/// Relationship metadata carried by a navigation property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDescriptor {
    /// Navigation property name.
    pub property: String,

    /// Relationship schema name.
    pub schema_name: String,

    /// Primary entity role, for self-referencing relationships.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<EntityRole>,

    /// Logical name of the entity on the other side.
    pub target: String,

    /// Foreign-key attribute carried by this side, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,

    /// Explicit many-to-many junction entity logical name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction: Option<String>,
}

impl RelationshipDescriptor {
    pub fn new(
        property: impl Into<String>,
        schema_name: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            schema_name: schema_name.into(),
            role: None,
            target: target.into(),
            attribute: None,
            junction: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: EntityRole) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    #[must_use]
    pub fn with_junction(mut self, junction: impl Into<String>) -> Self {
        self.junction = Some(junction.into());
        self
    }

    /// The relationship key related records are stored under.
    pub fn relationship(&self) -> Relationship {
        Relationship {
            schema_name: self.schema_name.clone(),
            primary_entity_role: self.role,
        }
    }
}

/// Schema metadata for one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub logical_name: String,
    pub primary_key: String,
    #[serde(default, rename = "attribute")]
    pub attributes: Vec<AttributeDescriptor>,
    #[serde(default, rename = "relationship")]
    pub relationships: Vec<RelationshipDescriptor>,
}

impl EntityDescriptor {
    pub fn new(logical_name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            primary_key: primary_key.into(),
            attributes: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Declare a property backed by an attribute.
    #[must_use]
    pub fn attribute(mut self, property: impl Into<String>, logical_name: impl Into<String>) -> Self {
        self.attributes.push(AttributeDescriptor {
            property: property.into(),
            logical_name: logical_name.into(),
        });
        self
    }

    /// Declare a navigation property.
    #[must_use]
    pub fn relationship(mut self, relationship: RelationshipDescriptor) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Attribute logical name behind `property`.
    pub fn attribute_name(&self, property: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.property == property)
            .map(|a| a.logical_name.as_str())
    }

    /// Relationship metadata on navigation `property`.
    pub fn relationship_for(&self, property: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.iter().find(|r| r.property == property)
    }

    /// The canonical navigation for a relationship: same schema name and,
    /// when `role` is given, the same role.
    pub fn find_relationship(
        &self,
        schema_name: &str,
        role: Option<EntityRole>,
    ) -> Option<&RelationshipDescriptor> {
        self.relationships
            .iter()
            .find(|r| r.schema_name == schema_name && (role.is_none() || r.role == role))
    }

    /// The mirror of a relationship seen from this side: same schema name
    /// and, when `role` is given, any other role.
    pub fn find_mirror(
        &self,
        schema_name: &str,
        role: Option<EntityRole>,
    ) -> Option<&RelationshipDescriptor> {
        self.relationships
            .iter()
            .find(|r| r.schema_name == schema_name && (role.is_none() || r.role != role))
    }
}
