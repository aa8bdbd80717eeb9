//! Untyped entity records as exchanged with the platform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value::Value;
use super::EarlyBound;

/// Which side of a self-referencing relationship a navigation sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRole {
    Referencing,
    Referenced,
}

impl fmt::Display for EntityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRole::Referencing => write!(f, "Referencing"),
            EntityRole::Referenced => write!(f, "Referenced"),
        }
    }
}

impl FromStr for EntityRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Referencing" => Ok(EntityRole::Referencing),
            "Referenced" => Ok(EntityRole::Referenced),
            other => Err(format!("unknown entity role: {}", other)),
        }
    }
}

/// A named relationship, optionally qualified by role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub schema_name: String,
    #[serde(default)]
    pub primary_entity_role: Option<EntityRole>,
}

impl Relationship {
    pub fn new(schema_name: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            primary_entity_role: None,
        }
    }

    pub fn with_role(mut self, role: EntityRole) -> Self {
        self.primary_entity_role = Some(role);
        self
    }

    /// Parse a relationship path segment: `schema` or `schema:Role`.
    ///
    /// An unrecognised role is dropped, leaving the bare schema name.
    pub fn parse(segment: &str) -> Self {
        match segment.split_once(':') {
            Some((schema, role)) => Self {
                schema_name: schema.to_string(),
                primary_entity_role: role.parse().ok(),
            },
            None => Self::new(segment),
        }
    }

    /// The path segment naming this relationship: `schema[:Role]`.
    pub fn path_segment(&self) -> String {
        match self.primary_entity_role {
            Some(role) => format!("{}:{}", self.schema_name, role),
            None => self.schema_name.clone(),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

/// Attribute bag preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeCollection(Vec<(String, Value)>);

impl AttributeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace; a replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Value) -> bool) {
        self.0.retain(|(k, v)| keep(k, v));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeCollection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

/// Related entity collections keyed by relationship, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelatedEntities(Vec<(Relationship, EntityCollection)>);

impl RelatedEntities {
    pub fn get(&self, relationship: &Relationship) -> Option<&EntityCollection> {
        self.0
            .iter()
            .find(|(r, _)| r == relationship)
            .map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, relationship: &Relationship) -> Option<&mut EntityCollection> {
        self.0
            .iter_mut()
            .find(|(r, _)| r == relationship)
            .map(|(_, c)| c)
    }

    pub fn contains_key(&self, relationship: &Relationship) -> bool {
        self.get(relationship).is_some()
    }

    pub fn insert(&mut self, relationship: Relationship, collection: EntityCollection) {
        match self.get_mut(&relationship) {
            Some(existing) => *existing = collection,
            None => self.0.push((relationship, collection)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Relationship, &EntityCollection)> {
        self.0.iter().map(|(r, c)| (r, c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A record: logical name, identifier, attributes and related records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub logical_name: String,
    pub id: Uuid,
    #[serde(default)]
    pub attributes: AttributeCollection,
    #[serde(default)]
    pub related_entities: RelatedEntities,
}

impl Entity {
    pub fn new(logical_name: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(logical_name: impl Into<String>, id: Uuid) -> Self {
        Self {
            logical_name: logical_name.into(),
            id,
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn get_attribute_value(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key, value);
    }

    pub fn related(&self, relationship: &Relationship) -> Option<&EntityCollection> {
        self.related_entities.get(relationship)
    }

    /// Related records under `relationship`, converted to an early-bound type.
    pub fn related_as<U: EarlyBound>(&self, relationship: &Relationship) -> Vec<U> {
        self.related(relationship)
            .map(|c| c.entities.iter().cloned().map(U::from_entity).collect())
            .unwrap_or_default()
    }

    /// The single related record under a many-to-one relationship.
    pub fn related_one<U: EarlyBound>(&self, relationship: &Relationship) -> Option<U> {
        self.related(relationship)
            .and_then(|c| c.entities.first())
            .cloned()
            .map(U::from_entity)
    }

    pub fn set_related(&mut self, relationship: Relationship, entities: Vec<Entity>) {
        self.related_entities
            .insert(relationship, EntityCollection::new(entities));
    }
}

/// A flat page of records returned by the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityCollection {
    pub entity_name: String,
    pub entities: Vec<Entity>,
    pub more_records: bool,
    pub paging_cookie: String,
    pub min_active_row_version: String,
    pub total_record_count: i32,
    pub total_record_count_limit_exceeded: bool,
}

impl EntityCollection {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            ..Default::default()
        }
    }

    pub fn with_entity_name(mut self, entity_name: impl Into<String>) -> Self {
        self.entity_name = entity_name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
