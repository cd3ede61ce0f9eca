//! Search plus fulfillment annotation: the end-to-end lookup used by callers.

use serde::Serialize;
use shelfmatch_core::{CandidateResult, FulfillmentFact, ReferenceProduct, ResultRecord};

use crate::collaborator::{CatalogSearch, DetailFetch};
use crate::confidence::{assess_match, MatchAssessment};
use crate::fulfillment::extract_fulfillment;
use crate::orchestrator::{search, StrategyAttempt};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    /// Winning strategy name, or `"exhausted"`.
    pub winning_strategy_name: String,
    pub results: Vec<ResultRecord>,
    /// One entry per record in `results`, same order.
    pub matches: Vec<MatchAssessment>,
    pub attempts: Vec<StrategyAttempt>,
}

/// Runs the strategy cascade, attaches a fulfillment fact to each accepted
/// result, and grades how closely each one matches `reference`.
///
/// A result's own text sources are tried first. When they carry nothing and a
/// detail fetcher is supplied, the listing's detail text is fetched (one
/// request at a time) and tried next. Detail failures leave `fulfillment`
/// empty.
pub async fn search_listings<C, D>(
    reference: &ReferenceProduct,
    fallback_term: &str,
    max_results: usize,
    catalog: &C,
    detail: Option<&D>,
) -> SearchReport
where
    C: CatalogSearch + ?Sized,
    D: DetailFetch + ?Sized,
{
    let outcome = search(reference, fallback_term, max_results, catalog).await;
    let winning_strategy_name = outcome.winning_strategy_name().to_string();

    let mut results = Vec::with_capacity(outcome.results.len());
    let mut matches = Vec::with_capacity(outcome.results.len());
    for candidate in &outcome.results {
        let fulfillment = annotate(candidate, detail).await;
        results.push(ResultRecord::from_candidate(candidate, fulfillment));
        matches.push(assess_match(reference, candidate));
    }

    SearchReport {
        winning_strategy_name,
        results,
        matches,
        attempts: outcome.attempts,
    }
}

async fn annotate<D>(candidate: &CandidateResult, detail: Option<&D>) -> Option<FulfillmentFact>
where
    D: DetailFetch + ?Sized,
{
    if let Some(fact) = extract_fulfillment(&candidate.text_sources) {
        return Some(fact);
    }

    let (detail, listing_ref) = match (detail, candidate.listing_ref.as_deref()) {
        (Some(detail), Some(listing_ref)) if !listing_ref.trim().is_empty() => (detail, listing_ref),
        _ => return None,
    };

    match detail.fetch_detail(listing_ref).await {
        Ok(sources) => extract_fulfillment(&sources),
        Err(e) => {
            tracing::warn!(listing_ref, error = %e, "detail fetch failed; fulfillment left empty");
            None
        }
    }
}
