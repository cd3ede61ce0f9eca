//! Domain types shared by the matcher, the catalog collaborator, and the CLI.
//!
//! ## Serialized result record
//!
//! [`ResultRecord`] is consumed verbatim by downstream reporting, so its JSON
//! shape is fixed:
//!
//! ```text
//! { "title", "identifier", "brand", "price", "fulfillment": { ... } | null }
//! ```
//!
//! Absent optional values serialize as `null`, never as omitted keys.

use serde::{Deserialize, Serialize};

/// The known-good product that drives a cross-marketplace search.
///
/// Immutable once constructed; fields are exposed through accessors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceProduct {
    title: String,
    #[serde(default)]
    brand: Option<String>,
    /// Raw product codes in caller-supplied order (UPC, EAN, GTIN, ...).
    #[serde(default)]
    identifier_candidates: Vec<String>,
}

impl ReferenceProduct {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        brand: Option<String>,
        identifier_candidates: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            brand,
            identifier_candidates,
        }
    }

    /// Trimmed title; may be empty.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.trim()
    }

    /// Trimmed brand, or `None` when absent or blank.
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }

    #[must_use]
    pub fn identifier_candidates(&self) -> &[String] {
        &self.identifier_candidates
    }
}

/// Named search tiers, declared in precision order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    Identifier,
    TitleBrand,
    BrandOnly,
    Fallback,
}

impl StrategyName {
    /// Lower ranks are attempted first.
    #[must_use]
    pub fn precision_rank(self) -> u8 {
        match self {
            StrategyName::Identifier => 1,
            StrategyName::TitleBrand => 2,
            StrategyName::BrandOnly => 3,
            StrategyName::Fallback => 4,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyName::Identifier => "identifier",
            StrategyName::TitleBrand => "title_brand",
            StrategyName::BrandOnly => "brand_only",
            StrategyName::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for StrategyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One precision-ranked query plan. Built fresh per search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStrategy {
    name: StrategyName,
    precision_rank: u8,
    query_text: String,
}

impl SearchStrategy {
    /// The rank is always derived from `name`, so it can never disagree with
    /// the tier ordering.
    #[must_use]
    pub fn new(name: StrategyName, query_text: impl Into<String>) -> Self {
        Self {
            name,
            precision_rank: name.precision_rank(),
            query_text: query_text.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> StrategyName {
        self.name
    }

    #[must_use]
    pub fn precision_rank(&self) -> u8 {
        self.precision_rank
    }

    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }
}

/// A named piece of raw listing text, e.g. `("fulfillment_text", "Sold by ...")`.
///
/// An ordered `Vec<TextSource>` is the text-source bag handed to the
/// fulfillment extractor; earlier entries are more authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSource {
    pub name: String,
    pub value: String,
}

impl TextSource {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single catalog listing returned by the catalog-search collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    /// Product code as reported by the catalog (not yet normalized).
    #[serde(default)]
    pub identifier: Option<String>,
    /// Display price, e.g. `"$24.99"`.
    #[serde(default)]
    pub price: Option<String>,
    /// Handle the detail-fetch collaborator accepts (listing id or URL).
    #[serde(default)]
    pub listing_ref: Option<String>,
    /// Fulfillment-relevant text carried by the search result itself.
    #[serde(default)]
    pub text_sources: Vec<TextSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The collaborator returned nothing (or failed).
    NoResults,
    /// Identifier search returned listings, none carrying the queried code.
    NoIdentifierMatch,
    /// No listing cleared the minimum relevance score.
    BelowRelevanceThreshold,
}

/// Per-strategy verdict from the result validator.
///
/// `rejection_reason` is present iff `accepted` is `false`; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    accepted: bool,
    accepted_results: Vec<CandidateResult>,
    rejection_reason: Option<RejectionReason>,
}

impl ValidationOutcome {
    #[must_use]
    pub fn accept(accepted_results: Vec<CandidateResult>) -> Self {
        Self {
            accepted: true,
            accepted_results,
            rejection_reason: None,
        }
    }

    #[must_use]
    pub fn reject(reason: RejectionReason) -> Self {
        Self {
            accepted: false,
            accepted_results: Vec::new(),
            rejection_reason: Some(reason),
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    #[must_use]
    pub fn accepted_results(&self) -> &[CandidateResult] {
        &self.accepted_results
    }

    #[must_use]
    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        self.rejection_reason
    }

    #[must_use]
    pub fn into_accepted_results(self) -> Vec<CandidateResult> {
        self.accepted_results
    }
}

/// Who physically ships a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentType {
    ShippedByAmazon,
    ShippedBySeller,
    #[default]
    Unknown,
}

impl ShipmentType {
    /// `ShippedByAmazon` iff the shipper mentions "amazon" (any case),
    /// `ShippedBySeller` for any other non-blank shipper, else `Unknown`.
    #[must_use]
    pub fn classify(shipped_by: Option<&str>) -> Self {
        match shipped_by.map(str::trim) {
            Some(s) if s.to_lowercase().contains("amazon") => ShipmentType::ShippedByAmazon,
            Some(s) if !s.is_empty() => ShipmentType::ShippedBySeller,
            _ => ShipmentType::Unknown,
        }
    }
}

/// Which fulfillment phrase produced a [`FulfillmentFact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedPattern {
    SoldByAndShippedBy,
    ShipsFromAndSoldBy,
    SoldBy,
    ShippedBy,
    ShipsFrom,
}

impl MatchedPattern {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatchedPattern::SoldByAndShippedBy => "sold_by_and_shipped_by",
            MatchedPattern::ShipsFromAndSoldBy => "ships_from_and_sold_by",
            MatchedPattern::SoldBy => "sold_by",
            MatchedPattern::ShippedBy => "shipped_by",
            MatchedPattern::ShipsFrom => "ships_from",
        }
    }
}

/// Structured seller/shipper record recovered from listing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentFact {
    pub seller_name: Option<String>,
    pub shipped_by: Option<String>,
    pub shipment_type: ShipmentType,
    /// The matched substring, kept for traceability.
    pub source_text: String,
    pub matched_pattern: MatchedPattern,
}

impl FulfillmentFact {
    /// Builds a fact and derives `shipment_type` from `shipped_by`.
    #[must_use]
    pub fn new(
        seller_name: Option<String>,
        shipped_by: Option<String>,
        source_text: impl Into<String>,
        matched_pattern: MatchedPattern,
    ) -> Self {
        let shipment_type = ShipmentType::classify(shipped_by.as_deref());
        Self {
            seller_name,
            shipped_by,
            shipment_type,
            source_text: source_text.into(),
            matched_pattern,
        }
    }
}

/// One output row of a search, optionally annotated with fulfillment facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub title: String,
    pub identifier: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub fulfillment: Option<FulfillmentFact>,
}

impl ResultRecord {
    #[must_use]
    pub fn from_candidate(candidate: &CandidateResult, fulfillment: Option<FulfillmentFact>) -> Self {
        Self {
            title: candidate.title.clone(),
            identifier: candidate.identifier.clone(),
            brand: candidate.brand.clone(),
            price: candidate.price.clone(),
            fulfillment,
        }
    }
}
