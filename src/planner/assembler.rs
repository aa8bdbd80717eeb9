//! Query assembly: typed query → untyped query plus alias map.

use log::debug;

use crate::error::QueryResult;
use crate::metadata::Schema;
use crate::model::EarlyBound;
use crate::query::{self, ColumnSet};
use crate::typed::QueryExpression;

use super::alias::{assign_aliases, AliasMap};
use super::resolver::LinkResolver;

/// An assembled query with the aliases its links were given.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub query: query::QueryExpression,
    pub aliases: AliasMap,
}

pub struct QueryAssembler<'a> {
    schema: &'a Schema,
}

impl<'a> QueryAssembler<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Assemble a typed query.
    ///
    /// Links are aliased on a copy of the typed link tree, so the caller's
    /// query can be compiled again with the same result.
    pub fn assemble<T: EarlyBound>(&self, typed: &QueryExpression<T>) -> QueryResult<CompiledQuery> {
        let default_join = typed
            .default_join_operator
            .or(self.schema.default_join_operator())
            .unwrap_or_default();

        let mut links = typed.link_entities.clone();
        let aliases = assign_aliases(&mut links, self.schema, default_join)?;

        let mut query = query::QueryExpression::new(T::LOGICAL_NAME);
        query.column_set = match &typed.column_set {
            Some(columns) => columns.to_untyped(self.schema)?,
            None => ColumnSet::all(),
        };

        query.criteria = typed.criteria.to_untyped(self.schema)?;
        for condition in &typed.conditions {
            query
                .criteria
                .add_condition(condition.to_untyped(self.schema)?);
        }

        query.orders = typed
            .orders
            .iter()
            .map(|o| o.to_untyped(self.schema))
            .collect::<QueryResult<_>>()?;

        let resolver = LinkResolver::new(self.schema);
        for link in &links {
            query.link_entities.push(resolver.resolve(link)?.link);
        }

        query.page_info = typed.page_info.clone();
        query.top_count = typed.top_count;
        query.distinct = typed.distinct;

        debug!(
            "assembled query on '{}' with {} link(s)",
            query.entity_name,
            aliases.len()
        );
        Ok(CompiledQuery { query, aliases })
    }
}
