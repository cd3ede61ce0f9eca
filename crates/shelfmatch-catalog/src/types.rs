//! Wire shapes for the catalog's JSON endpoints.
//!
//! Listing objects are kept as raw [`serde_json::Value`]s: catalogs disagree on
//! where titles, codes, and seller text live, so field lookup happens by
//! dotted path in [`crate::normalize`] rather than through a fixed struct.

use serde::Deserialize;

/// Body of `GET {base}/search`.
///
/// Some catalogs name the array `results` or `items`; both are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSearchResponse {
    #[serde(default, alias = "results", alias = "items")]
    pub products: Vec<serde_json::Value>,
}
