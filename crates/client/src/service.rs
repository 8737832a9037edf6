//! Per-entity CRUD service.
//!
//! [`EntityApi`] is the seam views depend on. [`EntityService`] is the
//! HTTP implementation: every call is one round trip with no retry and
//! no local caching.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use cwcrm_core::{DbId, Entity, Stored};
use reqwest::Method;

use crate::api::CrmApi;
use crate::error::ClientError;
use crate::query::{Page, QueryParams, TOTAL_COUNT_HEADER};

/// CRUD and search operations for one entity type.
///
/// Views hold an `EntityApi<E>` rather than a concrete service so tests
/// can substitute an in-memory backend.
#[async_trait]
pub trait EntityApi<E: Entity>: Send + Sync {
    /// Create a new record. The returned record carries its server id.
    async fn create(&self, record: &E) -> Result<Stored<E>, ClientError>;

    /// Replace an existing record.
    async fn update(&self, record: &Stored<E>) -> Result<Stored<E>, ClientError>;

    /// Delete a record by id.
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;

    /// Fetch one record by id.
    async fn find(&self, id: DbId) -> Result<Stored<E>, ClientError>;

    /// List records, optionally paged and sorted.
    async fn query(&self, params: &QueryParams) -> Result<Page<E>, ClientError>;

    /// Free-text search.
    async fn search(&self, term: &str, params: &QueryParams) -> Result<Page<E>, ClientError>;
}

#[async_trait]
impl<E, T> EntityApi<E> for Arc<T>
where
    E: Entity,
    T: EntityApi<E> + ?Sized,
{
    async fn create(&self, record: &E) -> Result<Stored<E>, ClientError> {
        (**self).create(record).await
    }

    async fn update(&self, record: &Stored<E>) -> Result<Stored<E>, ClientError> {
        (**self).update(record).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        (**self).delete(id).await
    }

    async fn find(&self, id: DbId) -> Result<Stored<E>, ClientError> {
        (**self).find(id).await
    }

    async fn query(&self, params: &QueryParams) -> Result<Page<E>, ClientError> {
        (**self).query(params).await
    }

    async fn search(&self, term: &str, params: &QueryParams) -> Result<Page<E>, ClientError> {
        (**self).search(term, params).await
    }
}

/// HTTP-backed [`EntityApi`] for entity type `E`.
pub struct EntityService<E> {
    api: CrmApi,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(api: CrmApi) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    async fn fetch_page(
        &self,
        url: String,
        term: Option<&str>,
        params: &QueryParams,
    ) -> Result<Page<E>, ClientError> {
        let mut pairs = params.to_pairs();
        if let Some(term) = term {
            pairs.insert(0, ("query", term.to_string()));
        }

        let response = self.api.request(Method::GET, url).query(&pairs).send().await?;
        let response = CrmApi::ensure_success(response).await?;

        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let items: Vec<Stored<E>> = response.json().await?;

        Ok(Page::new(items, total_count))
    }
}

impl<E> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for EntityService<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityService")
            .field("entity", &E::KIND)
            .field("api_url", &self.api.api_url())
            .finish()
    }
}

#[async_trait]
impl<E: Entity> EntityApi<E> for EntityService<E> {
    async fn create(&self, record: &E) -> Result<Stored<E>, ClientError> {
        record.check()?;
        tracing::debug!(entity = %E::KIND, "Request to create record");

        let response = self
            .api
            .request(Method::POST, self.api.resource_url(E::KIND))
            .json(record)
            .send()
            .await?;
        let created: Stored<E> = CrmApi::parse_response(response).await?;

        tracing::info!(entity = %E::KIND, id = created.id, "Record created");
        Ok(created)
    }

    async fn update(&self, record: &Stored<E>) -> Result<Stored<E>, ClientError> {
        record.fields.check()?;
        tracing::debug!(entity = %E::KIND, id = record.id, "Request to update record");

        let response = self
            .api
            .request(Method::PUT, self.api.record_url(E::KIND, record.id))
            .json(record)
            .send()
            .await?;
        let updated: Stored<E> = CrmApi::parse_response(response).await?;

        tracing::info!(entity = %E::KIND, id = updated.id, "Record updated");
        Ok(updated)
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        tracing::debug!(entity = %E::KIND, id, "Request to delete record");

        let response = self
            .api
            .request(Method::DELETE, self.api.record_url(E::KIND, id))
            .send()
            .await?;
        CrmApi::check_status(response).await?;

        tracing::info!(entity = %E::KIND, id, "Record deleted");
        Ok(())
    }

    async fn find(&self, id: DbId) -> Result<Stored<E>, ClientError> {
        tracing::debug!(entity = %E::KIND, id, "Request to get record");

        let response = self
            .api
            .request(Method::GET, self.api.record_url(E::KIND, id))
            .send()
            .await?;
        CrmApi::parse_response(response).await
    }

    async fn query(&self, params: &QueryParams) -> Result<Page<E>, ClientError> {
        tracing::debug!(entity = %E::KIND, "Request to get all records");
        self.fetch_page(self.api.resource_url(E::KIND), None, params)
            .await
    }

    async fn search(&self, term: &str, params: &QueryParams) -> Result<Page<E>, ClientError> {
        tracing::debug!(entity = %E::KIND, query = term, "Request to search records");
        self.fetch_page(self.api.search_url(E::KIND), Some(term), params)
            .await
    }
}
