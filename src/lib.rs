//! # xrmquery
//!
//! Strongly-typed query construction and result rehydration over a CRM
//! platform's dynamic, string-keyed query API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Typed query (QueryExpression<T>, LinkEntity)     │
//! │   member tokens: Attribute<T, V>, Navigation<T, U>      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [planner: aliases + link resolution]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Untyped query tree (query::QueryExpression)      │
//! │        + AliasMap (alias → relationship path)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [service: OrganizationService]
//! ┌─────────────────────────────────────────────────────────┐
//! │            Flat aliased rows (EntityCollection)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [hydrate]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Nested typed records (EntityCollection<T>)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Entity metadata comes from [`metadata::EntityDescriptor`] values, either
//! supplied by generated [`model::EarlyBound`] types or loaded from files,
//! and collected in a [`metadata::Schema`].

pub mod config;
pub mod error;
pub mod hydrate;
pub mod metadata;
pub mod model;
pub mod planner;
pub mod query;
pub mod service;
pub mod typed;

pub use error::{QueryError, QueryResult};

/// Re-exports for convenient usage.
///
/// Test doubles stay out of the prelude; import them from [`service`].
///
/// ```compile_fail
/// use xrmquery::prelude::InMemoryService;
/// ```
pub mod prelude {
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::hydrate::EntityCollection;
    pub use crate::metadata::{EntityDescriptor, RelationshipDescriptor, Schema};
    pub use crate::model::{
        AliasedValue, EarlyBound, Entity, EntityReference, EntityRole, OptionSetValue,
        Relationship, Value,
    };
    pub use crate::query::{ConditionOperator, JoinOperator, LogicalOperator, OrderType, PagingInfo};
    pub use crate::service::{
        retrieve, retrieve_async, OrganizationService, OrganizationServiceAsync, ServiceError,
    };
    pub use crate::typed::{
        Attribute, ColumnSet, ConditionExpression, FilterExpression, LinkEntity, Navigation,
        OrderExpression, QueryExpression,
    };
}
