//! Typed sort orders.

use std::fmt;
use std::marker::PhantomData;

use crate::error::QueryResult;
use crate::metadata::Schema;
use crate::model::EarlyBound;
use crate::query::{self, OrderType};

use super::member::{Member, MemberExpr};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderNode {
    pub member: MemberExpr,
    pub order_type: OrderType,
}

impl OrderNode {
    pub fn to_untyped(&self, schema: &Schema) -> QueryResult<query::OrderExpression> {
        Ok(query::OrderExpression::new(
            self.member.logical_name(schema)?,
            self.order_type,
        ))
    }
}

/// Sort on an attribute of `T`.
pub struct OrderExpression<T> {
    node: OrderNode,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for OrderExpression<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for OrderExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl<T: EarlyBound> OrderExpression<T> {
    pub fn new(member: impl Into<Member<T>>, order_type: OrderType) -> Self {
        Self {
            node: OrderNode {
                member: member.into().into_expr(),
                order_type,
            },
            _marker: PhantomData,
        }
    }

    pub fn ascending(member: impl Into<Member<T>>) -> Self {
        Self::new(member, OrderType::Ascending)
    }

    pub fn descending(member: impl Into<Member<T>>) -> Self {
        Self::new(member, OrderType::Descending)
    }

    pub fn node(&self) -> &OrderNode {
        &self.node
    }

    pub fn into_node(self) -> OrderNode {
        self.node
    }

    pub fn to_untyped(&self, schema: &Schema) -> QueryResult<query::OrderExpression> {
        self.node.to_untyped(schema)
    }
}
