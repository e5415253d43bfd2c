//! HTTP client for the demo JSON API (`https://dummyjson.com` by default).

use super::{parse_page, Paged, Resource};
use crate::config::ApiConfig;
use crate::domain::Product;
use crate::error::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Display;

/// A product category as returned by `/products/categories`.
///
/// Older API versions return bare strings, newer ones return objects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Category {
    /// `"smartphones"`
    Name(String),
    /// `{ "slug": "smartphones", "name": "Smartphones", "url": "..." }`
    Detailed {
        /// URL-safe identifier.
        slug: String,
        /// Display name.
        name: String,
    },
}

impl Category {
    /// The identifier used in product records.
    pub fn slug(&self) -> &str {
        match self {
            Category::Name(name) => name,
            Category::Detailed { slug, .. } => slug,
        }
    }
}

/// Read-only client for the upstream endpoints.
///
/// No timeout and no retries: a failed request surfaces as a [`FetchError`]
/// and the user retries by hand.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .user_agent(concat!("posboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates a client from the `[api]` configuration section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::new(config.base_url.clone())
    }

    /// The base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<R, FetchError> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%url, status = status.as_u16(), "API request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<R>(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            tracing::error!(%url, error = %e, %preview, "failed to parse API response");
            FetchError::from(e)
        })
    }

    /// Fetches one page of a resource with `limit`/`skip`.
    pub async fn fetch_page<T: Resource>(
        &self,
        limit: usize,
        skip: usize,
    ) -> Result<Paged<T>, FetchError> {
        let body: serde_json::Value = self
            .get_json(
                T::PATH,
                &[("limit", limit.to_string()), ("skip", skip.to_string())],
            )
            .await?;
        let page = parse_page(body, T::COLLECTION_KEY)?;
        tracing::info!(
            path = T::PATH,
            count = page.items.len(),
            total = page.total,
            "fetched page"
        );
        Ok(page)
    }

    /// Fetches a single record, e.g. `/products/7`.
    pub async fn fetch_by_id<T: Resource>(&self, id: impl Display) -> Result<T, FetchError> {
        self.get_json(&format!("{}/{}", T::PATH, id), &[]).await
    }

    /// Full-text product search (`/products/search?q=`).
    pub async fn search_products(&self, query: &str) -> Result<Paged<Product>, FetchError> {
        let body: serde_json::Value = self
            .get_json("/products/search", &[("q", query.to_string())])
            .await?;
        parse_page(body, Product::COLLECTION_KEY)
    }

    /// All product categories.
    pub async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.get_json("/products/categories", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_loses_trailing_slash() {
        let client = ApiClient::new("https://dummyjson.com/").unwrap();
        assert_eq!(client.base_url(), "https://dummyjson.com");
        assert_eq!(client.url("/carts"), "https://dummyjson.com/carts");
    }

    #[test]
    fn test_categories_accept_both_shapes() {
        let old: Vec<Category> = serde_json::from_str(r#"["laptops", "groceries"]"#).unwrap();
        assert_eq!(old[1].slug(), "groceries");

        let new: Vec<Category> = serde_json::from_str(
            r#"[{"slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty"}]"#,
        )
        .unwrap();
        assert_eq!(new[0].slug(), "beauty");
    }
}
