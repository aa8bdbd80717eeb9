//! Typed result collections.

use std::fmt;

use crate::error::QueryResult;
use crate::metadata::Schema;
use crate::model::{self, EarlyBound};
use crate::planner::AliasMap;

use super::Rehydrator;

/// Typed root records plus the paging metadata of the page they came from.
pub struct EntityCollection<T> {
    pub entities: Vec<T>,
    pub entity_name: String,
    pub more_records: bool,
    pub paging_cookie: String,
    pub min_active_row_version: String,
    pub total_record_count: i32,
    pub total_record_count_limit_exceeded: bool,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            entity_name: String::new(),
            more_records: false,
            paging_cookie: String::new(),
            min_active_row_version: String::new(),
            total_record_count: 0,
            total_record_count_limit_exceeded: false,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for EntityCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCollection")
            .field("entity_name", &self.entity_name)
            .field("entities", &self.entities)
            .field("more_records", &self.more_records)
            .field("total_record_count", &self.total_record_count)
            .finish()
    }
}

impl<T: EarlyBound> EntityCollection<T> {
    /// Convert a flat collection.
    ///
    /// Without an alias map every row becomes one record as-is; with one,
    /// rows are rehydrated into nested records.
    pub fn from_untyped(
        collection: model::EntityCollection,
        schema: &Schema,
        aliases: Option<&AliasMap>,
    ) -> QueryResult<Self> {
        let model::EntityCollection {
            entity_name,
            entities,
            more_records,
            paging_cookie,
            min_active_row_version,
            total_record_count,
            total_record_count_limit_exceeded,
        } = collection;

        let entities = match aliases {
            Some(aliases) => Rehydrator::new(schema, aliases).rehydrate(entities)?,
            None => entities,
        };

        Ok(Self {
            entities: entities.into_iter().map(T::from_entity).collect(),
            entity_name,
            more_records,
            paging_cookie,
            min_active_row_version,
            total_record_count,
            total_record_count_limit_exceeded,
        })
    }

    /// Back to the untyped form, named after `T`.
    pub fn to_untyped(self) -> model::EntityCollection {
        model::EntityCollection {
            entity_name: T::LOGICAL_NAME.to_string(),
            entities: self.entities.into_iter().map(T::into_entity).collect(),
            more_records: self.more_records,
            paging_cookie: self.paging_cookie,
            min_active_row_version: self.min_active_row_version,
            total_record_count: self.total_record_count,
            total_record_count_limit_exceeded: self.total_record_count_limit_exceeded,
        }
    }

    pub fn push(&mut self, entity: T) {
        self.entities.push(entity);
    }
}

impl<T> EntityCollection<T> {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.entities.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }
}

impl<T> IntoIterator for EntityCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
