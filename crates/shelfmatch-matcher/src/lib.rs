//! Cross-marketplace listing correlation.
//!
//! Turns a reference product into a precision-ranked cascade of catalog
//! queries, validates what each query returns, and recovers seller/shipper
//! facts from free-form listing text. Network access stays behind the
//! [`collaborator`] traits.

pub mod collaborator;
pub mod confidence;
pub mod error;
pub mod fulfillment;
pub mod identifier;
pub mod listing;
pub mod orchestrator;
pub mod query;
pub mod relevance;
pub mod sanitize;
pub mod validate;

pub use collaborator::{CatalogSearch, DetailFetch};
pub use confidence::{assess_match, MatchAssessment, MatchConfidence};
pub use error::CollaboratorError;
pub use fulfillment::{clean_seller_name, extract_fulfillment};
pub use identifier::{normalize_identifier, normalize_identifiers, NormalizedIdentifier};
pub use listing::{search_listings, SearchReport};
pub use orchestrator::{search, SearchOutcome, StrategyAttempt, EXHAUSTED};
pub use query::build_strategies;
pub use validate::validate;
