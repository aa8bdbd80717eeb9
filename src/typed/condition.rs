//! Typed conditions.

use std::fmt;
use std::marker::PhantomData;

use crate::error::QueryResult;
use crate::metadata::Schema;
use crate::model::{EarlyBound, Value};
use crate::query::{self, ConditionOperator};

use super::member::{Attribute, Member, MemberExpr};

/// A condition with its owner type erased; the form stored in link specs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNode {
    pub member: MemberExpr,
    pub operator: ConditionOperator,
    pub values: Vec<Value>,
}

impl ConditionNode {
    /// Translate the member and reduce values to their platform form.
    pub fn to_untyped(&self, schema: &Schema) -> QueryResult<query::ConditionExpression> {
        Ok(query::ConditionExpression::new(
            self.member.logical_name(schema)?,
            self.operator,
            self.values
                .iter()
                .cloned()
                .map(Value::into_condition_value)
                .collect(),
        ))
    }
}

/// A condition on an attribute of `T`.
pub struct ConditionExpression<T> {
    node: ConditionNode,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ConditionExpression<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ConditionExpression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl<T: EarlyBound> ConditionExpression<T> {
    /// A condition on any member with explicit values.
    pub fn new(member: impl Into<Member<T>>, operator: ConditionOperator, values: Vec<Value>) -> Self {
        Self {
            node: ConditionNode {
                member: member.into().into_expr(),
                operator,
                values,
            },
            _marker: PhantomData,
        }
    }

    pub fn compare<V, X>(attribute: Attribute<T, V>, operator: ConditionOperator, value: X) -> Self
    where
        V: Into<Value>,
        X: Into<V>,
    {
        let value: V = value.into();
        Self::new(attribute, operator, vec![value.into()])
    }

    pub fn equal<V, X>(attribute: Attribute<T, V>, value: X) -> Self
    where
        V: Into<Value>,
        X: Into<V>,
    {
        Self::compare(attribute, ConditionOperator::Equal, value)
    }

    pub fn not_equal<V, X>(attribute: Attribute<T, V>, value: X) -> Self
    where
        V: Into<Value>,
        X: Into<V>,
    {
        Self::compare(attribute, ConditionOperator::NotEqual, value)
    }

    pub fn in_values<V, X, I>(attribute: Attribute<T, V>, values: I) -> Self
    where
        V: Into<Value>,
        X: Into<V>,
        I: IntoIterator<Item = X>,
    {
        let values = values
            .into_iter()
            .map(|v| {
                let v: V = v.into();
                v.into()
            })
            .collect();
        Self::new(attribute, ConditionOperator::In, values)
    }

    pub fn null<V>(attribute: Attribute<T, V>) -> Self {
        Self::new(attribute, ConditionOperator::Null, Vec::new())
    }

    pub fn not_null<V>(attribute: Attribute<T, V>) -> Self {
        Self::new(attribute, ConditionOperator::NotNull, Vec::new())
    }

    pub fn node(&self) -> &ConditionNode {
        &self.node
    }

    pub fn into_node(self) -> ConditionNode {
        self.node
    }

    pub fn to_untyped(&self, schema: &Schema) -> QueryResult<query::ConditionExpression> {
        self.node.to_untyped(schema)
    }
}
