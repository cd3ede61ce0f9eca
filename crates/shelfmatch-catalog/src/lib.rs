//! HTTP adapter for the target catalog: search and listing-detail endpoints
//! plus the JSON-to-domain normalization both share.

pub mod client;
pub mod error;
pub mod normalize;
mod rate_limit;
pub mod types;

pub use client::{CatalogClient, CatalogClientConfig};
pub use error::CatalogError;
pub use normalize::{
    candidate_from_listing, extract_price, reference_from_listing, text_sources_from_listing,
    FULFILLMENT_SOURCE_PATHS,
};
pub use types::CatalogSearchResponse;
