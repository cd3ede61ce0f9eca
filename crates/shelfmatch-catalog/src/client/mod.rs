//! HTTP client for the catalog's JSON search and listing-detail endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shelfmatch_core::{AppConfig, CandidateResult, TextSource};
use shelfmatch_matcher::{CatalogSearch, CollaboratorError, DetailFetch};

use crate::error::CatalogError;
use crate::normalize::{candidate_from_listing, text_sources_from_listing, FULFILLMENT_SOURCE_PATHS};
use crate::rate_limit::RetryPolicy;
use crate::types::CatalogSearchResponse;

/// Connection settings for [`CatalogClient`].
#[derive(Clone)]
pub struct CatalogClientConfig {
    pub base_url: String,
    pub detail_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub backoff_base_secs: u64,
    /// Longest `Retry-After` the client will honour on a 429.
    pub max_retry_after_secs: u64,
    pub proxy_url: Option<String>,
}

impl std::fmt::Debug for CatalogClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClientConfig")
            .field("base_url", &self.base_url)
            .field("detail_base_url", &self.detail_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_secs", &self.backoff_base_secs)
            .field("max_retry_after_secs", &self.max_retry_after_secs)
            .field("proxy_url", &self.proxy_url.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl From<&AppConfig> for CatalogClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.catalog_base_url.clone(),
            detail_base_url: config.detail_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
            max_retry_after_secs: config.max_retry_after_secs,
            proxy_url: config.proxy_url.clone(),
        }
    }
}

/// Catalog collaborator over HTTP.
///
/// 429 responses and network failures are retried with exponential backoff,
/// stretched to the server's `Retry-After` when that is longer. 404s, other
/// non-2xx statuses, and unparseable bodies fail immediately.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    detail_base_url: String,
    retry: RetryPolicy,
}

impl CatalogClient {
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if either base URL does not
    /// parse, or [`CatalogError::Http`] if the proxy URL is rejected or the
    /// underlying `reqwest::Client` cannot be built.
    pub fn new(config: &CatalogClientConfig) -> Result<Self, CatalogError> {
        let base_url = validated_base(&config.base_url)?;
        let detail_base_url = validated_base(&config.detail_base_url)?;

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str());
        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            detail_base_url,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff_base_secs: config.backoff_base_secs,
                max_retry_after_secs: config.max_retry_after_secs,
            },
        })
    }

    /// Runs one catalog query and returns up to `limit` normalized listings.
    /// Listings without a title are dropped.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] from the request after retries are exhausted.
    pub async fn search_listings(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<CandidateResult>, CatalogError> {
        let url = self.search_url(query, limit)?;
        let response: CatalogSearchResponse =
            self.get_json(url, format!("search response for \"{query}\"")).await?;

        let returned = response.products.len();
        let mut candidates: Vec<CandidateResult> = response
            .products
            .iter()
            .filter_map(candidate_from_listing)
            .collect();
        candidates.truncate(limit);

        tracing::debug!(
            query,
            returned,
            kept = candidates.len(),
            "catalog search completed"
        );
        Ok(candidates)
    }

    /// Fetches the raw listing object behind `listing_ref`.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] from the request after retries are exhausted.
    pub async fn fetch_listing(&self, listing_ref: &str) -> Result<Value, CatalogError> {
        let url = self.detail_url(listing_ref)?;
        self.get_json(url, format!("listing {listing_ref}")).await
    }

    fn search_url(&self, query: &str, limit: usize) -> Result<String, CatalogError> {
        let mut url = parse_base(&self.base_url)?;
        append_segments(&mut url, &self.base_url, &["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());
        Ok(url.to_string())
    }

    /// Absolute `http(s)` refs are used as-is; anything else is a listing id
    /// under `{detail_base_url}/listings/`.
    fn detail_url(&self, listing_ref: &str) -> Result<String, CatalogError> {
        let trimmed = listing_ref.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(trimmed.to_owned());
        }
        let mut url = parse_base(&self.detail_base_url)?;
        append_segments(&mut url, &self.detail_base_url, &["listings", trimmed])?;
        Ok(url.to_string())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        context: String,
    ) -> Result<T, CatalogError> {
        self.retry.run(|| {
            let url = url.clone();
            let context = context.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
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
                        .unwrap_or(0);
                    return Err(CatalogError::RateLimited {
                        domain: host_of(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(CatalogError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body)
                    .map_err(|source| CatalogError::Deserialize { context, source })
            }
        })
        .await
    }
}

#[async_trait]
impl CatalogSearch for CatalogClient {
    async fn search(
        &self,
        query_text: &str,
        max_results: usize,
    ) -> Result<Vec<CandidateResult>, CollaboratorError> {
        Ok(self.search_listings(query_text, max_results).await?)
    }
}

#[async_trait]
impl DetailFetch for CatalogClient {
    async fn fetch_detail(&self, listing_ref: &str) -> Result<Vec<TextSource>, CollaboratorError> {
        let listing = self.fetch_listing(listing_ref).await?;
        Ok(text_sources_from_listing(&listing, FULFILLMENT_SOURCE_PATHS))
    }
}

fn validated_base(base_url: &str) -> Result<String, CatalogError> {
    let trimmed = base_url.trim().trim_end_matches('/').to_owned();
    let url = parse_base(&trimmed)?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: "expected an http(s) URL".to_owned(),
        });
    }
    Ok(trimmed)
}

fn parse_base(base_url: &str) -> Result<Url, CatalogError> {
    Url::parse(base_url).map_err(|e| CatalogError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

fn append_segments(url: &mut Url, base_url: &str, segments: &[&str]) -> Result<(), CatalogError> {
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: "URL cannot carry a path".to_owned(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// Hostname for error messages; falls back to the full URL.
fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
