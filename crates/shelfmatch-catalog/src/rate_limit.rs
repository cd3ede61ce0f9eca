//! Retry policy for catalog requests.
//!
//! Only 429 responses and transport failures are retried. A 404, any other
//! non-2xx status, or a body that does not parse fails on the first attempt.
//! A 429 waits at least as long as the catalog's `Retry-After` asks, capped
//! at `max_retry_after_secs`.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_secs: u64,
    pub max_retry_after_secs: u64,
}

impl RetryPolicy {
    /// Wait before retry number `retry` (0-based), or `None` when `err` is
    /// final or retries are used up.
    ///
    /// Backoff is `backoff_base_secs * 2^retry`; a rate-limit response
    /// replaces it with the server's delay when that is longer.
    pub(crate) fn delay_before_retry(&self, retry: u32, err: &CatalogError) -> Option<Duration> {
        if retry >= self.max_retries {
            return None;
        }
        let backoff = 2u64
            .checked_pow(retry)
            .and_then(|factor| self.backoff_base_secs.checked_mul(factor))
            .unwrap_or(u64::MAX);

        let secs = match err {
            CatalogError::RateLimited {
                retry_after_secs, ..
            } => backoff.max((*retry_after_secs).min(self.max_retry_after_secs)),
            CatalogError::Http(_) => backoff,
            _ => return None,
        };
        Some(Duration::from_secs(secs))
    }

    /// Runs `request` until it succeeds or [`Self::delay_before_retry`] gives
    /// up; the last error is returned.
    pub(crate) async fn run<T, F, Fut>(&self, mut request: F) -> Result<T, CatalogError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let mut retry = 0u32;
        loop {
            let err = match request().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            let Some(delay) = self.delay_before_retry(retry, &err) else {
                return Err(err);
            };

            retry += 1;
            tracing::warn!(
                retry,
                max_retries = self.max_retries,
                delay_secs = delay.as_secs(),
                error = %err,
                "catalog request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
