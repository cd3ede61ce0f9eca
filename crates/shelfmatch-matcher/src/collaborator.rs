//! Capabilities the matcher consumes but does not implement.
//!
//! Implementations own transport concerns (timeouts, retries, proxies) and
//! must be safe to share across concurrent searches.

use async_trait::async_trait;
use shelfmatch_core::{CandidateResult, TextSource};

use crate::error::CollaboratorError;

/// Runs one query against the target catalog.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(
        &self,
        query_text: &str,
        max_results: usize,
    ) -> Result<Vec<CandidateResult>, CollaboratorError>;
}

/// Hydrates a listing reference into its fulfillment text sources, ordered
/// most authoritative first.
#[async_trait]
pub trait DetailFetch: Send + Sync {
    async fn fetch_detail(&self, listing_ref: &str) -> Result<Vec<TextSource>, CollaboratorError>;
}
