//! Where list views get their records from.
//!
//! A view is seeded once, either from an in-memory collection (mock data) or
//! from a one-shot fetch against the upstream JSON API. Both sit behind the
//! [`DataSource`] trait so the list view can issue the fetch as a bubbletea
//! command and retry it on demand.

pub mod http;
mod loader;

pub use http::{ApiClient, Category};
pub use loader::{LoadState, LoadTicket, Loader};

use crate::error::FetchError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// One page of an upstream collection:
/// `{ <collection>: [...], total, skip, limit }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Size of the whole upstream collection.
    pub total: usize,
    /// Offset of the first record.
    pub skip: usize,
    /// Requested page size.
    pub limit: usize,
}

/// Extracts a [`Paged`] from a raw response body, reading the records from
/// `collection_key`.
///
/// Missing `total`/`skip`/`limit` fields fall back to the length of the
/// collection, 0 and the length again.
///
/// # Examples
///
/// ```rust
/// use posboard::source::parse_page;
/// use serde_json::json;
///
/// let body = json!({ "users": [1, 2, 3], "total": 208, "skip": 0, "limit": 3 });
/// let page = parse_page::<u32>(body, "users").unwrap();
/// assert_eq!(page.items, vec![1, 2, 3]);
/// assert_eq!(page.total, 208);
/// ```
pub fn parse_page<T: DeserializeOwned>(
    mut body: Value,
    collection_key: &str,
) -> Result<Paged<T>, FetchError> {
    let raw = body
        .get_mut(collection_key)
        .map(Value::take)
        .filter(Value::is_array)
        .ok_or_else(|| FetchError::MissingCollection(collection_key.to_string()))?;
    let items: Vec<T> = serde_json::from_value(raw)?;

    let number = |key: &str| body.get(key).and_then(Value::as_u64).map(|n| n as usize);
    Ok(Paged {
        total: number("total").unwrap_or(items.len()),
        skip: number("skip").unwrap_or(0),
        limit: number("limit").unwrap_or(items.len()),
        items,
    })
}

/// A record type served by a paged upstream endpoint.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Endpoint path, e.g. `/products`.
    const PATH: &'static str;
    /// Key of the record array in the paged response, e.g. `products`.
    const COLLECTION_KEY: &'static str;
}

/// Produces the initial snapshot of a collection.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Fetches the whole snapshot.
    async fn fetch(&self) -> Result<Vec<T>, FetchError>;

    /// Short label for logs.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// A fixed, in-memory collection, typically produced by
/// [`crate::mock::MockGenerator`].
#[derive(Debug, Clone)]
pub struct StaticSource<T> {
    items: Vec<T>,
}

impl<T> StaticSource<T> {
    /// Wraps a collection.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> DataSource<T> for StaticSource<T> {
    async fn fetch(&self) -> Result<Vec<T>, FetchError> {
        Ok(self.items.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} records)", self.items.len())
    }
}

/// A single page of a [`Resource`] endpoint.
pub struct ResourceSource<T> {
    client: Arc<ApiClient>,
    limit: usize,
    skip: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceSource<T> {
    /// Fetches the first `limit` records.
    pub fn new(client: Arc<ApiClient>, limit: usize) -> Self {
        Self {
            client,
            limit,
            skip: 0,
            _marker: PhantomData,
        }
    }

    /// Starts at `skip` instead of 0.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }
}

#[async_trait]
impl<T: Resource> DataSource<T> for ResourceSource<T> {
    async fn fetch(&self) -> Result<Vec<T>, FetchError> {
        let page = self.client.fetch_page::<T>(self.limit, self.skip).await?;
        Ok(page.items)
    }

    fn describe(&self) -> String {
        format!("{}{}?limit={}&skip={}", self.client.base_url(), T::PATH, self.limit, self.skip)
    }
}
