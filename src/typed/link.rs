//! Typed link entities.
//!
//! [`LinkEntity<T, U>`] is a builder facade; every link, whatever its types,
//! is stored as one erased [`LinkSpec`] so link trees of mixed entity types
//! can nest freely.

use std::fmt;
use std::marker::PhantomData;

use crate::model::EarlyBound;
use crate::query::JoinOperator;

use super::columns::ColumnSet;
use super::condition::{ConditionExpression, ConditionNode};
use super::filter::{FilterExpression, FilterNode};
use super::member::{MemberExpr, Navigation, NavigationRef};
use super::order::{OrderExpression, OrderNode};

/// A link with its entity types erased.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSpec {
    pub navigation: NavigationRef,
    pub join_operator: Option<JoinOperator>,
    /// Assigned when the query is compiled.
    pub entity_alias: Option<String>,
    /// Explicit projection; `None` requests every column.
    pub columns: Option<Vec<MemberExpr>>,
    pub criteria: FilterNode,
    /// Extra conditions appended to the criteria.
    pub conditions: Vec<ConditionNode>,
    pub orders: Vec<OrderNode>,
    pub link_entities: Vec<LinkSpec>,
}

impl LinkSpec {
    pub fn new(navigation: NavigationRef) -> Self {
        Self {
            navigation,
            join_operator: None,
            entity_alias: None,
            columns: None,
            criteria: FilterNode::default(),
            conditions: Vec::new(),
            orders: Vec::new(),
            link_entities: Vec::new(),
        }
    }
}

/// A join from `T` to related `U` records through a navigation property.
pub struct LinkEntity<T, U> {
    spec: LinkSpec,
    _marker: PhantomData<fn() -> (T, U)>,
}

impl<T, U> Clone for LinkEntity<T, U> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, U> fmt::Debug for LinkEntity<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.spec.fmt(f)
    }
}

impl<T: EarlyBound, U: EarlyBound> LinkEntity<T, U> {
    pub fn new(navigation: Navigation<T, U>) -> Self {
        Self {
            spec: LinkSpec::new(navigation.reference()),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn join_operator(mut self, join_operator: JoinOperator) -> Self {
        self.spec.join_operator = Some(join_operator);
        self
    }

    /// Set an alias; the alias walker replaces it at compile time.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.spec.entity_alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: ColumnSet<U>) -> Self {
        self.spec.columns = Some(columns.into_members());
        self
    }

    #[must_use]
    pub fn criteria(mut self, criteria: FilterExpression<U>) -> Self {
        self.spec.criteria = criteria.into_node();
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: ConditionExpression<U>) -> Self {
        self.spec.conditions.push(condition.into_node());
        self
    }

    #[must_use]
    pub fn order(mut self, order: OrderExpression<U>) -> Self {
        self.spec.orders.push(order.into_node());
        self
    }

    /// Nest a link from `U` onwards.
    #[must_use]
    pub fn link<V: EarlyBound>(mut self, link: LinkEntity<U, V>) -> Self {
        self.spec.link_entities.push(link.into_spec());
        self
    }

    pub fn spec(&self) -> &LinkSpec {
        &self.spec
    }

    pub fn into_spec(self) -> LinkSpec {
        self.spec
    }
}

impl<T: EarlyBound, U: EarlyBound> From<Navigation<T, U>> for LinkEntity<T, U> {
    fn from(navigation: Navigation<T, U>) -> Self {
        Self::new(navigation)
    }
}
