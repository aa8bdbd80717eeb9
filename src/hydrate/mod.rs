//! Result rehydration: flat aliased rows → nested entity graph.
//!
//! The platform returns one row per combination of root record and joined
//! records. Joined attributes arrive as [`AliasedValue`]s under keys such as
//! `A.name` or `A.B.name`. Rows are grouped by root identifier, and every
//! aliased value is moved into a related record under the relationship path
//! its alias stands for.

mod collection;

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use log::trace;
use regex::Regex;
use uuid::Uuid;

use crate::error::{QueryError, QueryResult};
use crate::metadata::Schema;
use crate::model::{AliasedValue, Entity, Relationship};
use crate::planner::AliasMap;

pub use collection::EntityCollection;

/// `prefix.attribute`, where the prefix is one or more dotted aliases.
static ALIASED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z](?:\.[A-Za-z])*)\.([^.]+)$").unwrap());

/// Position of a materialized record below the root.
type Location = Vec<(Relationship, usize)>;

/// Rebuilds nested records from flat rows using the aliases of one query.
pub struct Rehydrator<'a> {
    schema: &'a Schema,
    aliases: &'a AliasMap,
}

impl<'a> Rehydrator<'a> {
    pub fn new(schema: &'a Schema, aliases: &'a AliasMap) -> Self {
        Self { schema, aliases }
    }

    /// One merged root per distinct root identifier, in first-seen order.
    pub fn rehydrate(&self, rows: Vec<Entity>) -> QueryResult<Vec<Entity>> {
        let mut groups: Vec<Vec<Entity>> = Vec::new();
        let mut by_id: HashMap<Uuid, usize> = HashMap::new();
        for row in rows {
            match by_id.get(&row.id) {
                Some(&index) => groups[index].push(row),
                None => {
                    by_id.insert(row.id, groups.len());
                    groups.push(vec![row]);
                }
            }
        }

        groups
            .iter()
            .filter_map(|rows| rows.first().map(|first| self.merge(first.clone(), rows)))
            .collect()
    }

    fn merge(&self, mut root: Entity, rows: &[Entity]) -> QueryResult<Entity> {
        trace!(
            "merging {} row(s) for {} {}",
            rows.len(),
            root.logical_name,
            root.id
        );

        for row in rows {
            self.relate(row, &mut root)?;
        }

        root.attributes.retain(|_, value| !value.is_aliased());
        Ok(root)
    }

    /// Attach the joined records carried by one row to the root.
    fn relate(&self, row: &Entity, root: &mut Entity) -> QueryResult<()> {
        let mut located: HashMap<String, Location> = HashMap::new();
        located.insert(String::new(), Vec::new());

        for (path, values) in self.group_by_path(row)? {
            let child = self.materialize(&values)?;

            let (parent_path, segment) = match path.rsplit_once('.') {
                Some((parent, segment)) => (parent, segment),
                None => ("", path.as_str()),
            };
            let mut location = located
                .get(parent_path)
                .cloned()
                .ok_or_else(|| QueryError::ParentNotMaterialized { path: path.clone() })?;

            let parent = locate_mut(root, &location)
                .ok_or_else(|| QueryError::ParentNotMaterialized { path: path.clone() })?;
            let relationship = Relationship::parse(segment);

            let index = match parent.related_entities.get_mut(&relationship) {
                Some(collection) => {
                    match collection.entities.iter().position(|e| e.id == child.id) {
                        Some(existing) => existing,
                        None => {
                            collection.entities.push(child);
                            collection.entities.len() - 1
                        }
                    }
                }
                None => {
                    parent.set_related(relationship.clone(), vec![child]);
                    0
                }
            };

            location.push((relationship, index));
            located.insert(path, location);
        }

        Ok(())
    }

    /// Aliased values of a row grouped by relationship path, sorted so a
    /// parent path always precedes its children.
    fn group_by_path(&self, row: &Entity) -> QueryResult<BTreeMap<String, Vec<AliasedValue>>> {
        let mut groups: BTreeMap<String, Vec<AliasedValue>> = BTreeMap::new();

        for (key, value) in row.attributes.iter() {
            // Formatted-value shadows.
            if key.starts_with('_') {
                continue;
            }
            let Some(aliased) = value.as_aliased() else {
                continue;
            };
            let Some(captures) = ALIASED_KEY.captures(key) else {
                continue;
            };
            let Some(alias) = captures[1].chars().last() else {
                continue;
            };

            let path = self
                .aliases
                .get(alias)
                .ok_or_else(|| QueryError::UnknownAlias {
                    alias,
                    key: key.to_string(),
                })?;
            groups
                .entry(path.to_string())
                .or_default()
                .push(aliased.clone());
        }

        Ok(groups)
    }

    /// Create the record a path group describes.
    fn materialize(&self, values: &[AliasedValue]) -> QueryResult<Entity> {
        let logical_name = values
            .first()
            .map(|v| v.entity_logical_name.as_str())
            .unwrap_or_default();

        let mut entity = self.schema.create(logical_name)?;
        for value in values.iter().filter(|v| v.entity_logical_name == logical_name) {
            entity
                .attributes
                .insert(value.attribute_logical_name.clone(), (*value.value).clone());
        }

        let primary_key = &self.schema.descriptor(logical_name)?.primary_key;
        entity.id = entity
            .get_attribute_value(primary_key)
            .and_then(|v| v.as_guid())
            .ok_or_else(|| QueryError::MissingIdentifier {
                entity: logical_name.to_string(),
                attribute: primary_key.clone(),
            })?;

        Ok(entity)
    }
}

fn locate_mut<'e>(root: &'e mut Entity, location: &[(Relationship, usize)]) -> Option<&'e mut Entity> {
    let mut current = root;
    for (relationship, index) in location {
        current = current
            .related_entities
            .get_mut(relationship)?
            .entities
            .get_mut(*index)?;
    }
    Some(current)
}
