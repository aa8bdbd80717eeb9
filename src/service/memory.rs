//! An in-process service answering every query with a canned page.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::model::{Entity, EntityCollection};
use crate::query::QueryExpression;

use super::{OrganizationService, OrganizationServiceAsync, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
enum Reply {
    Page(EntityCollection),
    Fault { code: String, message: String },
}

/// Records the queries it receives and replies with a fixed page or fault.
#[derive(Debug)]
pub struct InMemoryService {
    reply: Reply,
    received: Mutex<Vec<QueryExpression>>,
}

impl InMemoryService {
    pub fn new(page: EntityCollection) -> Self {
        Self {
            reply: Reply::Page(page),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rows(rows: Vec<Entity>) -> Self {
        Self::new(EntityCollection::new(rows))
    }

    pub fn empty() -> Self {
        Self::with_rows(Vec::new())
    }

    /// A service whose every call fails with a platform fault.
    pub fn failing(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Fault {
                code: code.into(),
                message: message.into(),
            },
            received: Mutex::new(Vec::new()),
        }
    }

    /// Every query received so far, oldest first.
    pub fn received(&self) -> Vec<QueryExpression> {
        self.lock().clone()
    }

    pub fn last_query(&self) -> Option<QueryExpression> {
        self.lock().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<QueryExpression>> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer(&self, query: &QueryExpression) -> ServiceResult<EntityCollection> {
        self.lock().push(query.clone());
        match &self.reply {
            Reply::Page(page) => Ok(page.clone()),
            Reply::Fault { code, message } => Err(ServiceError::remote(code.clone(), message.clone())),
        }
    }
}

impl OrganizationService for InMemoryService {
    fn retrieve_multiple(&self, query: &QueryExpression) -> ServiceResult<EntityCollection> {
        self.answer(query)
    }
}

#[async_trait]
impl OrganizationServiceAsync for InMemoryService {
    async fn retrieve_multiple_async(
        &self,
        query: &QueryExpression,
    ) -> ServiceResult<EntityCollection> {
        self.answer(query)
    }
}
