//! HTTP client for the remote catalog API.

mod endpoint;
mod fetch_all;

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use gadgetcmp_core::{Category, RawRecord, StoreDirectory, StoreInfo};

use crate::error::CatalogError;
use crate::pagination::{extract_records, has_next_page};
use crate::rate_limit::retry_with_backoff;

pub use endpoint::normalize_base_url;

/// Maximum number of pages fetched for one category before giving up.
///
/// Each page may be retried up to `max_retries` times, so the worst-case
/// request count is `MAX_PAGES * (1 + max_retries)`.
pub(super) const MAX_PAGES: usize = 200;

/// One page of raw records plus whether the API says more follow.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub records: Vec<RawRecord>,
    pub has_next: bool,
}

/// Client for `GET {base}/{category}` and `GET {base}/stores`.
///
/// 429 and transport failures are retried with exponential backoff; 404 and
/// other statuses are returned as typed errors.
pub struct CatalogClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
    pub(super) max_retries: u32,
    pub(super) backoff_base_secs: u64,
}

impl CatalogClient {
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`CatalogError::Http`] if the underlying
    /// `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CatalogError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_secs,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetches page `page` (1-based) of `category`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`]: HTTP 429 after all retries.
    /// - [`CatalogError::NotFound`]: HTTP 404.
    /// - [`CatalogError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`CatalogError::Deserialize`]: the body is not JSON.
    /// - [`CatalogError::MissingRecords`]: the body has no record array.
    pub async fn fetch_page(
        &self,
        category: Category,
        page: u32,
        limit: u32,
    ) -> Result<CatalogPage, CatalogError> {
        let url = endpoint::category_url(&self.base_url, category, page, limit)?;
        let body = self.get_json(&url, category.as_str()).await?;
        let records = extract_records(&body)
            .cloned()
            .ok_or_else(|| CatalogError::MissingRecords {
                url: url.to_string(),
            })?;
        let has_next = has_next_page(&body, page, records.len(), limit);
        tracing::debug!(
            %category,
            page,
            count = records.len(),
            has_next,
            "fetched catalog page"
        );
        Ok(CatalogPage { records, has_next })
    }

    /// Fetches the store directory from `GET {base}/stores`.
    ///
    /// Entries that do not deserialize are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_page`].
    pub async fn fetch_stores(&self) -> Result<StoreDirectory, CatalogError> {
        let url = endpoint::join(&self.base_url, "stores")?;
        let body = self.get_json(&url, "stores").await?;
        let entries = extract_records(&body).ok_or_else(|| CatalogError::MissingRecords {
            url: url.to_string(),
        })?;

        let stores: Vec<StoreInfo> = entries
            .iter()
            .filter_map(|entry| match serde_json::from_value::<StoreInfo>(entry.clone()) {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed store entry");
                    None
                }
            })
            .collect();
        Ok(StoreDirectory::from_stores(stores))
    }

    async fn get_json(&self, url: &Url, context: &str) -> Result<Value, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(CatalogError::RateLimited {
                        url: url.to_string(),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(CatalogError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<Value>(&body).map_err(|e| CatalogError::Deserialize {
                    context: format!("{context} response from {url}"),
                    source: e,
                })
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
