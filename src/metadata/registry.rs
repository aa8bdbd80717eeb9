//! The schema registry: descriptors and factories keyed by logical name.

use std::collections::HashMap;

use crate::config::Settings;
use crate::error::{QueryError, QueryResult};
use crate::model::{new_entity, EarlyBound, Entity};
use crate::query::JoinOperator;

use super::descriptor::EntityDescriptor;
use super::junction::JunctionNames;
use super::loader::SchemaLoadError;

/// Creates a blank record of a registered entity type.
pub type EntityFactory = fn() -> Entity;

#[derive(Debug, Clone)]
struct Registered {
    descriptor: EntityDescriptor,
    factory: Option<EntityFactory>,
}

/// Immutable set of entity descriptors shared by every query.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entities: HashMap<String, Registered>,
    junctions: JunctionNames,
    default_join_operator: Option<JoinOperator>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Descriptor for a logical name, if registered.
    pub fn get(&self, logical_name: &str) -> Option<&EntityDescriptor> {
        self.entities.get(logical_name).map(|r| &r.descriptor)
    }

    /// Descriptor for a logical name.
    pub fn descriptor(&self, logical_name: &str) -> QueryResult<&EntityDescriptor> {
        self.get(logical_name)
            .ok_or_else(|| QueryError::UnknownEntity(logical_name.to_string()))
    }

    /// Descriptor for an early-bound type.
    pub fn descriptor_of<T: EarlyBound>(&self) -> QueryResult<&EntityDescriptor> {
        self.descriptor(T::LOGICAL_NAME)
    }

    pub fn contains(&self, logical_name: &str) -> bool {
        self.entities.contains_key(logical_name)
    }

    /// Create a blank record of a registered entity type.
    pub fn create(&self, logical_name: &str) -> QueryResult<Entity> {
        let registered = self
            .entities
            .get(logical_name)
            .ok_or_else(|| QueryError::UnknownEntity(logical_name.to_string()))?;

        Ok(match registered.factory {
            Some(factory) => factory(),
            None => Entity::new(registered.descriptor.logical_name.clone()),
        })
    }

    pub fn junctions(&self) -> &JunctionNames {
        &self.junctions
    }

    /// Join operator applied to links that set none, when configured.
    pub fn default_join_operator(&self) -> Option<JoinOperator> {
        self.default_join_operator
    }

    pub fn logical_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Merge query defaults and junction mappings from settings.
    #[must_use]
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.apply_settings(settings);
        self
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.junctions.extend(&settings.junctions);
        if settings.query.default_join_operator.is_some() {
            self.default_join_operator = settings.query.default_join_operator;
        }
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entities: Vec<Registered>,
    junctions: Vec<(String, String)>,
    settings: Option<Settings>,
}

impl SchemaBuilder {
    /// Register an early-bound type with its factory.
    #[must_use]
    pub fn register<T: EarlyBound>(mut self) -> Self {
        self.entities.push(Registered {
            descriptor: T::descriptor(),
            factory: Some(new_entity::<T>),
        });
        self
    }

    /// Register a descriptor with no early-bound type behind it.
    #[must_use]
    pub fn entity(mut self, descriptor: EntityDescriptor) -> Self {
        self.entities.push(Registered {
            descriptor,
            factory: None,
        });
        self
    }

    #[must_use]
    pub fn entities(mut self, descriptors: impl IntoIterator<Item = EntityDescriptor>) -> Self {
        for descriptor in descriptors {
            self = self.entity(descriptor);
        }
        self
    }

    /// Add an irregular junction mapping.
    #[must_use]
    pub fn junction(mut self, schema_name: impl Into<String>, junction: impl Into<String>) -> Self {
        self.junctions.push((schema_name.into(), junction.into()));
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the schema; each logical name may be registered once.
    pub fn build(self) -> Result<Schema, SchemaLoadError> {
        let mut schema = Schema::default();

        for registered in self.entities {
            let name = registered.descriptor.logical_name.clone();
            if schema.entities.contains_key(&name) {
                return Err(SchemaLoadError::DuplicateEntity(name));
            }
            schema.entities.insert(name, registered);
        }

        schema.junctions.extend(self.junctions);
        if let Some(settings) = &self.settings {
            schema.apply_settings(settings);
        }

        Ok(schema)
    }
}
