//! The typed root query.

use std::fmt;
use std::marker::PhantomData;

use crate::error::QueryResult;
use crate::metadata::Schema;
use crate::model::EarlyBound;
use crate::planner::{CompiledQuery, QueryAssembler};
use crate::query::{JoinOperator, PagingInfo};

use super::columns::ColumnSet;
use super::condition::ConditionExpression;
use super::filter::FilterExpression;
use super::link::{LinkEntity, LinkSpec};
use super::order::OrderExpression;

/// What to fetch for root entity type `T`.
///
/// ```ignore
/// let query = QueryExpression::<Account>::new()
///     .columns(ColumnSet::new().with(Account::NAME))
///     .condition(ConditionExpression::equal(Account::NAME, "Contoso"))
///     .link(LinkEntity::new(Account::CONTACTS).columns(ColumnSet::new().with(Contact::FULL_NAME)));
///
/// let accounts = query.retrieve_multiple(&service, &schema)?;
/// ```
pub struct QueryExpression<T> {
    /// Explicit projection; `None` requests every column.
    pub column_set: Option<ColumnSet<T>>,
    pub criteria: FilterExpression<T>,
    /// Extra conditions appended to the criteria.
    pub conditions: Vec<ConditionExpression<T>>,
    pub orders: Vec<OrderExpression<T>>,
    pub link_entities: Vec<LinkSpec>,
    pub page_info: PagingInfo,
    pub top_count: Option<u32>,
    pub distinct: bool,
    /// Join operator for links that set none; falls back to the schema's.
    pub default_join_operator: Option<JoinOperator>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for QueryExpression<T> {
    fn default() -> Self {
        Self {
            column_set: None,
            criteria: FilterExpression::default(),
            conditions: Vec::new(),
            orders: Vec::new(),
            link_entities: Vec::new(),
            page_info: PagingInfo::default(),
            top_count: None,
            distinct: false,
            default_join_operator: None,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for QueryExpression<T> {
    fn clone(&self) -> Self {
        Self {
            column_set: self.column_set.clone(),
            criteria: self.criteria.clone(),
            conditions: self.conditions.clone(),
            orders: self.orders.clone(),
            link_entities: self.link_entities.clone(),
            page_info: self.page_info.clone(),
            top_count: self.top_count,
            distinct: self.distinct,
            default_join_operator: self.default_join_operator,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for QueryExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryExpression")
            .field("column_set", &self.column_set)
            .field("criteria", &self.criteria)
            .field("conditions", &self.conditions)
            .field("orders", &self.orders)
            .field("link_entities", &self.link_entities)
            .field("page_info", &self.page_info)
            .field("top_count", &self.top_count)
            .field("distinct", &self.distinct)
            .finish()
    }
}

impl<T: EarlyBound> QueryExpression<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn columns(mut self, columns: ColumnSet<T>) -> Self {
        self.column_set = Some(columns);
        self
    }

    #[must_use]
    pub fn criteria(mut self, criteria: FilterExpression<T>) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: ConditionExpression<T>) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn order(mut self, order: OrderExpression<T>) -> Self {
        self.orders.push(order);
        self
    }

    #[must_use]
    pub fn link<U: EarlyBound>(mut self, link: LinkEntity<T, U>) -> Self {
        self.add_link(link);
        self
    }

    pub fn add_link<U: EarlyBound>(&mut self, link: LinkEntity<T, U>) {
        self.link_entities.push(link.into_spec());
    }

    #[must_use]
    pub fn page(mut self, page_info: PagingInfo) -> Self {
        self.page_info = page_info;
        self
    }

    #[must_use]
    pub fn top(mut self, count: u32) -> Self {
        self.top_count = Some(count);
        self
    }

    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    #[must_use]
    pub fn default_join(mut self, join_operator: JoinOperator) -> Self {
        self.default_join_operator = Some(join_operator);
        self
    }

    /// Assign aliases and assemble the untyped query without executing it.
    pub fn compile(&self, schema: &Schema) -> QueryResult<CompiledQuery> {
        QueryAssembler::new(schema).assemble(self)
    }
}
