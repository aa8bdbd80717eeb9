//! The execution boundary.
//!
//! The crate never talks to the platform itself. Callers supply an
//! [`OrganizationService`] (or its async twin) that executes one untyped
//! query and returns one flat page of records.
//!
//! ```text
//! QueryExpression<T> ──compile──▶ query::QueryExpression ──▶ OrganizationService
//!                                        │ aliases                    │ flat rows
//!                                        ▼                            ▼
//!                              EntityCollection<T> ◀──rehydrate── model::EntityCollection
//! ```

mod error;
mod memory;
mod retrieve;

use async_trait::async_trait;

use crate::model::EntityCollection;
use crate::query::QueryExpression;

pub use error::{ServiceError, ServiceResult};
pub use memory::InMemoryService;
pub use retrieve::{retrieve, retrieve_async};

/// Synchronous query execution.
pub trait OrganizationService {
    /// Execute a query and return the flat result page.
    fn retrieve_multiple(&self, query: &QueryExpression) -> ServiceResult<EntityCollection>;
}

/// Asynchronous query execution.
#[async_trait]
pub trait OrganizationServiceAsync: Send + Sync {
    /// Execute a query and return the flat result page.
    async fn retrieve_multiple_async(
        &self,
        query: &QueryExpression,
    ) -> ServiceResult<EntityCollection>;
}

impl<S: OrganizationService + ?Sized> OrganizationService for &S {
    fn retrieve_multiple(&self, query: &QueryExpression) -> ServiceResult<EntityCollection> {
        (**self).retrieve_multiple(query)
    }
}
