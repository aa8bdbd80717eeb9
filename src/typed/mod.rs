//! Strongly-typed query construction.
//!
//! Every builder here is generic over the entity type it constrains, so a
//! condition on a contact cannot be placed on an account link. Each converts
//! explicitly into its untyped counterpart in [`crate::query`] through
//! `to_untyped`, translating member tokens against the [`Schema`].
//!
//! [`Schema`]: crate::metadata::Schema

mod columns;
mod condition;
mod filter;
mod link;
mod member;
mod order;
mod query;

pub use columns::ColumnSet;
pub use condition::{ConditionExpression, ConditionNode};
pub use filter::{FilterExpression, FilterNode};
pub use link::{LinkEntity, LinkSpec};
pub use member::{Attribute, Member, MemberExpr, Navigation, NavigationRef, ID_PROPERTY};
pub use order::{OrderExpression, OrderNode};
pub use query::QueryExpression;

pub(crate) use columns::columns_to_untyped;
