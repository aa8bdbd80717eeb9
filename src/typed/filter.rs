//! Typed filter trees.

use std::fmt;
use std::marker::PhantomData;

use crate::error::QueryResult;
use crate::metadata::Schema;
use crate::model::EarlyBound;
use crate::query::{self, LogicalOperator};

use super::condition::{ConditionExpression, ConditionNode};

/// A filter with its owner type erased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterNode {
    pub filter_operator: LogicalOperator,
    pub conditions: Vec<ConditionNode>,
    pub filters: Vec<FilterNode>,
}

impl FilterNode {
    pub fn to_untyped(&self, schema: &Schema) -> QueryResult<query::FilterExpression> {
        let mut filter = query::FilterExpression::new(self.filter_operator);
        for condition in &self.conditions {
            filter.add_condition(condition.to_untyped(schema)?);
        }
        for child in &self.filters {
            filter.add_filter(child.to_untyped(schema)?);
        }
        Ok(filter)
    }
}

/// A boolean combination of conditions on `T`.
pub struct FilterExpression<T> {
    node: FilterNode,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for FilterExpression<T> {
    fn default() -> Self {
        Self {
            node: FilterNode::default(),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for FilterExpression<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for FilterExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl<T: EarlyBound> FilterExpression<T> {
    pub fn new(filter_operator: LogicalOperator) -> Self {
        Self {
            node: FilterNode {
                filter_operator,
                ..Default::default()
            },
            _marker: PhantomData,
        }
    }

    pub fn and() -> Self {
        Self::new(LogicalOperator::And)
    }

    pub fn or() -> Self {
        Self::new(LogicalOperator::Or)
    }

    #[must_use]
    pub fn condition(mut self, condition: ConditionExpression<T>) -> Self {
        self.add_condition(condition);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: FilterExpression<T>) -> Self {
        self.add_filter(filter);
        self
    }

    pub fn add_condition(&mut self, condition: ConditionExpression<T>) {
        self.node.conditions.push(condition.into_node());
    }

    pub fn add_filter(&mut self, filter: FilterExpression<T>) {
        self.node.filters.push(filter.node);
    }

    pub fn filter_operator(&self) -> LogicalOperator {
        self.node.filter_operator
    }

    pub fn node(&self) -> &FilterNode {
        &self.node
    }

    pub fn into_node(self) -> FilterNode {
        self.node
    }

    pub fn to_untyped(&self, schema: &Schema) -> QueryResult<query::FilterExpression> {
        self.node.to_untyped(schema)
    }
}
