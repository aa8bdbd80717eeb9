//! Public retrieve operations over the execution boundary.

use log::debug;
use uuid::Uuid;

use crate::error::QueryResult;
use crate::hydrate::EntityCollection;
use crate::metadata::Schema;
use crate::model::EarlyBound;
use crate::planner::CompiledQuery;
use crate::typed::{Attribute, ColumnSet, ConditionExpression, QueryExpression};

use super::{OrganizationService, OrganizationServiceAsync};

impl<T: EarlyBound> QueryExpression<T> {
    /// Compile, execute once and rehydrate.
    pub fn retrieve_multiple<S>(&self, service: &S, schema: &Schema) -> QueryResult<EntityCollection<T>>
    where
        S: OrganizationService + ?Sized,
    {
        let CompiledQuery { query, aliases } = self.compile(schema)?;
        debug!("executing query on '{}'", query.entity_name);

        let flat = service.retrieve_multiple(&query)?;
        EntityCollection::from_untyped(flat, schema, Some(&aliases))
    }

    pub async fn retrieve_multiple_async<S>(
        &self,
        service: &S,
        schema: &Schema,
    ) -> QueryResult<EntityCollection<T>>
    where
        S: OrganizationServiceAsync + ?Sized,
    {
        let CompiledQuery { query, aliases } = self.compile(schema)?;
        debug!("executing query on '{}'", query.entity_name);

        let flat = service.retrieve_multiple_async(&query).await?;
        EntityCollection::from_untyped(flat, schema, Some(&aliases))
    }

    /// The first matching record, restricted to `id` when one is given.
    pub fn retrieve<S>(&self, service: &S, schema: &Schema, id: Option<Uuid>) -> QueryResult<Option<T>>
    where
        S: OrganizationService + ?Sized,
    {
        let records = self.restricted_to(id).retrieve_multiple(service, schema)?;
        Ok(records.into_iter().next())
    }

    pub async fn retrieve_async<S>(
        &self,
        service: &S,
        schema: &Schema,
        id: Option<Uuid>,
    ) -> QueryResult<Option<T>>
    where
        S: OrganizationServiceAsync + ?Sized,
    {
        let records = self
            .restricted_to(id)
            .retrieve_multiple_async(service, schema)
            .await?;
        Ok(records.into_iter().next())
    }

    fn restricted_to(&self, id: Option<Uuid>) -> Self {
        let mut query = self.clone();
        if let Some(id) = id.filter(|id| !id.is_nil()) {
            query
                .criteria
                .add_condition(ConditionExpression::equal(Attribute::<T, Uuid>::id(), id));
        }
        query
    }
}

/// Fetch one record by identifier with an optional projection.
///
/// No matching record is `Ok(None)`, not an error.
pub fn retrieve<T, S>(
    service: &S,
    schema: &Schema,
    id: Uuid,
    columns: Option<ColumnSet<T>>,
) -> QueryResult<Option<T>>
where
    T: EarlyBound,
    S: OrganizationService + ?Sized,
{
    by_id_query(columns).retrieve(service, schema, Some(id))
}

pub async fn retrieve_async<T, S>(
    service: &S,
    schema: &Schema,
    id: Uuid,
    columns: Option<ColumnSet<T>>,
) -> QueryResult<Option<T>>
where
    T: EarlyBound,
    S: OrganizationServiceAsync + ?Sized,
{
    by_id_query(columns)
        .retrieve_async(service, schema, Some(id))
        .await
}

fn by_id_query<T: EarlyBound>(columns: Option<ColumnSet<T>>) -> QueryExpression<T> {
    let mut query = QueryExpression::new();
    query.column_set = columns;
    query
}
