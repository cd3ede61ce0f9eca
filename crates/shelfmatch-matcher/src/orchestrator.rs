//! Cascading search: tries strategies most-precise first and stops at the
//! first one whose results validate.

use std::collections::HashSet;

use serde::Serialize;
use shelfmatch_core::{CandidateResult, ReferenceProduct, RejectionReason, StrategyName};

use crate::collaborator::CatalogSearch;
use crate::identifier::normalize_identifier;
use crate::query::build_strategies;
use crate::validate::validate;

/// Strategy name reported when every tier was rejected.
pub const EXHAUSTED: &str = "exhausted";

/// Diagnostic record of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyAttempt {
    pub strategy: StrategyName,
    pub query_text: String,
    /// `false` when the query was blank and the catalog was never called.
    pub dispatched: bool,
    pub collaborator_failed: bool,
    pub result_count: usize,
    /// `None` when this attempt won.
    pub rejection_reason: Option<RejectionReason>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub results: Vec<CandidateResult>,
    pub winning_strategy: Option<StrategyName>,
    pub attempts: Vec<StrategyAttempt>,
}

impl SearchOutcome {
    /// Winning strategy name, or [`EXHAUSTED`].
    #[must_use]
    pub fn winning_strategy_name(&self) -> &'static str {
        self.winning_strategy.map_or(EXHAUSTED, StrategyName::as_str)
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.winning_strategy.is_none()
    }
}

/// Runs the strategy cascade for `reference` against `catalog`.
///
/// Never fails: catalog errors are logged and count as an empty result set
/// for that strategy, and running out of strategies yields an empty
/// [`SearchOutcome`] named [`EXHAUSTED`]. Strategies run strictly one at a
/// time; nothing after the winning strategy is dispatched.
pub async fn search<C>(
    reference: &ReferenceProduct,
    fallback_term: &str,
    max_results: usize,
    catalog: &C,
) -> SearchOutcome
where
    C: CatalogSearch + ?Sized,
{
    let strategies = build_strategies(reference, fallback_term);
    let mut attempts = Vec::with_capacity(strategies.len());

    for strategy in &strategies {
        let query = strategy.query_text().trim();
        let mut attempt = StrategyAttempt {
            strategy: strategy.name(),
            query_text: strategy.query_text().to_string(),
            dispatched: false,
            collaborator_failed: false,
            result_count: 0,
            rejection_reason: None,
        };

        let raw = if query.is_empty() {
            tracing::debug!(strategy = %strategy.name(), "skipping blank query");
            Vec::new()
        } else {
            attempt.dispatched = true;
            match catalog.search(query, max_results).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(
                        strategy = %strategy.name(),
                        query,
                        error = %e,
                        "catalog search failed; treating as empty"
                    );
                    attempt.collaborator_failed = true;
                    Vec::new()
                }
            }
        };
        attempt.result_count = raw.len();

        let outcome = validate(strategy, raw, reference);
        if outcome.is_accepted() {
            attempts.push(attempt);
            let results = dedupe_and_truncate(outcome.into_accepted_results(), max_results);
            tracing::info!(
                strategy = %strategy.name(),
                query,
                accepted = results.len(),
                "search strategy accepted"
            );
            return SearchOutcome {
                results,
                winning_strategy: Some(strategy.name()),
                attempts,
            };
        }

        attempt.rejection_reason = outcome.rejection_reason();
        tracing::debug!(
            strategy = %strategy.name(),
            query,
            reason = ?attempt.rejection_reason,
            "search strategy rejected"
        );
        attempts.push(attempt);
    }

    tracing::info!(attempted = attempts.len(), "all search strategies exhausted");
    SearchOutcome {
        results: Vec::new(),
        winning_strategy: None,
        attempts,
    }
}

/// Drops later listings sharing a normalized identifier (or, lacking one, a
/// listing ref) with an earlier listing, then caps the list.
fn dedupe_and_truncate(results: Vec<CandidateResult>, max_results: usize) -> Vec<CandidateResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|result| {
            let key = result
                .identifier
                .as_deref()
                .and_then(normalize_identifier)
                .map(|id| format!("id:{id}"))
                .or_else(|| result.listing_ref.as_ref().map(|r| format!("ref:{r}")));
            key.is_none_or(|k| seen.insert(k))
        })
        .take(max_results)
        .collect()
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
