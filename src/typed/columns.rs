//! Typed column projection.

use std::fmt;
use std::marker::PhantomData;

use crate::error::QueryResult;
use crate::metadata::Schema;
use crate::model::EarlyBound;
use crate::query;

use super::member::{Member, MemberExpr};

/// Attributes of `T` to return, in order.
pub struct ColumnSet<T> {
    members: Vec<MemberExpr>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for ColumnSet<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for ColumnSet<T> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.members).finish()
    }
}

impl<T: EarlyBound> ColumnSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, member: impl Into<Member<T>>) -> Self {
        self.add(member);
        self
    }

    pub fn add(&mut self, member: impl Into<Member<T>>) {
        self.members.push(member.into().into_expr());
    }

    pub fn members(&self) -> &[MemberExpr] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// One logical name per member, in declaration order.
    pub fn to_untyped(&self, schema: &Schema) -> QueryResult<query::ColumnSet> {
        columns_to_untyped(&self.members, schema)
    }

    pub(crate) fn into_members(self) -> Vec<MemberExpr> {
        self.members
    }
}

impl<T: EarlyBound> FromIterator<Member<T>> for ColumnSet<T> {
    fn from_iter<I: IntoIterator<Item = Member<T>>>(iter: I) -> Self {
        let mut columns = Self::new();
        for member in iter {
            columns.add(member);
        }
        columns
    }
}

pub(crate) fn columns_to_untyped(
    members: &[MemberExpr],
    schema: &Schema,
) -> QueryResult<query::ColumnSet> {
    let names = members
        .iter()
        .map(|m| m.logical_name(schema))
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(query::ColumnSet::new(names))
}
