//! Per-strategy acceptance rules for raw catalog results.

use shelfmatch_core::{
    CandidateResult, ReferenceProduct, RejectionReason, SearchStrategy, StrategyName,
    ValidationOutcome,
};

use crate::identifier::normalize_identifier;
use crate::relevance::{relevance_score, MIN_RELEVANCE_SCORE};

/// Judges whether `results` returned for `strategy` are trustworthy.
///
/// - empty results are rejected for every strategy
/// - `identifier` needs at least one result carrying the queried code
/// - `title_brand` / `brand_only` keep results at or above
///   [`MIN_RELEVANCE_SCORE`], best first
/// - `fallback` accepts whatever came back
#[must_use]
pub fn validate(
    strategy: &SearchStrategy,
    results: Vec<CandidateResult>,
    reference: &ReferenceProduct,
) -> ValidationOutcome {
    if results.is_empty() {
        return ValidationOutcome::reject(RejectionReason::NoResults);
    }

    match strategy.name() {
        StrategyName::Identifier => validate_identifier(strategy.query_text(), results, reference),
        StrategyName::TitleBrand | StrategyName::BrandOnly => {
            let ranked = rank_by_relevance(results, reference);
            if ranked.is_empty() {
                ValidationOutcome::reject(RejectionReason::BelowRelevanceThreshold)
            } else {
                ValidationOutcome::accept(ranked)
            }
        }
        StrategyName::Fallback => ValidationOutcome::accept(results),
    }
}

fn validate_identifier(
    queried: &str,
    results: Vec<CandidateResult>,
    reference: &ReferenceProduct,
) -> ValidationOutcome {
    let (matches, others): (Vec<_>, Vec<_>) = results.into_iter().partition(|result| {
        result
            .identifier
            .as_deref()
            .and_then(normalize_identifier)
            .is_some_and(|id| id.as_str() == queried)
    });

    if matches.is_empty() {
        tracing::debug!(
            identifier = queried,
            returned = others.len(),
            "identifier search returned no listing carrying the queried code"
        );
        return ValidationOutcome::reject(RejectionReason::NoIdentifierMatch);
    }

    let mut accepted = matches;
    accepted.extend(rank_by_relevance(others, reference));
    ValidationOutcome::accept(accepted)
}

/// Keeps results clearing the threshold, ordered by descending score.
/// Ties keep catalog order.
fn rank_by_relevance(
    results: Vec<CandidateResult>,
    reference: &ReferenceProduct,
) -> Vec<CandidateResult> {
    let mut scored: Vec<(f64, CandidateResult)> = results
        .into_iter()
        .map(|result| (relevance_score(reference, &result), result))
        .filter(|(score, result)| {
            let keep = *score >= MIN_RELEVANCE_SCORE;
            if !keep {
                tracing::debug!(title = %result.title, score, "filtered low-relevance result");
            }
            keep
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceProduct {
        ReferenceProduct::new(
            "Ergonomic Office Chair",
            Some("MilleLoom".to_string()),
            vec!["199414326476".to_string()],
        )
    }

    fn result(title: &str, brand: Option<&str>, identifier: Option<&str>) -> CandidateResult {
        CandidateResult {
            title: title.to_string(),
            brand: brand.map(str::to_string),
            identifier: identifier.map(str::to_string),
            ..CandidateResult::default()
        }
    }

    fn titles(outcome: &ValidationOutcome) -> Vec<&str> {
        outcome
            .accepted_results()
            .iter()
            .map(|r| r.title.as_str())
            .collect()
    }

    #[test]
    fn empty_results_rejected_for_every_strategy() {
        for name in [
            StrategyName::Identifier,
            StrategyName::TitleBrand,
            StrategyName::BrandOnly,
            StrategyName::Fallback,
        ] {
            let outcome = validate(&SearchStrategy::new(name, "q"), vec![], &reference());
            assert_eq!(outcome.rejection_reason(), Some(RejectionReason::NoResults), "{name}");
        }
    }

    #[test]
    fn identifier_match_accepted_after_normalization() {
        let strategy = SearchStrategy::new(StrategyName::Identifier, "199414326476");
        let outcome = validate(
            &strategy,
            vec![result("Something", None, Some("\u{200e}199-414-326-476"))],
            &reference(),
        );
        assert!(outcome.is_accepted());
    }

    #[test]
    fn identifier_mismatch_rejected() {
        let strategy = SearchStrategy::new(StrategyName::Identifier, "199414326476");
        let outcome = validate(
            &strategy,
            vec![
                result("Ergonomic Office Chair", Some("MilleLoom"), Some("000000000000")),
                result("No code", None, None),
            ],
            &reference(),
        );
        assert_eq!(
            outcome.rejection_reason(),
            Some(RejectionReason::NoIdentifierMatch)
        );
    }

    #[test]
    fn identifier_matches_lead_and_relevant_others_follow() {
        let strategy = SearchStrategy::new(StrategyName::Identifier, "199414326476");
        let outcome = validate(
            &strategy,
            vec![
                result("Water Bottle", None, None),
                result("MilleLoom Office Chair", Some("MilleLoom"), None),
                result("Exact Listing", None, Some("199414326476")),
            ],
            &reference(),
        );
        assert_eq!(titles(&outcome), vec!["Exact Listing", "MilleLoom Office Chair"]);
    }

    #[test]
    fn brand_only_keeps_relevant_results_best_first() {
        let strategy = SearchStrategy::new(StrategyName::BrandOnly, "MilleLoom");
        let outcome = validate(
            &strategy,
            vec![
                result("MilleLoom Throw Blanket", Some("MilleLoom"), None),
                result("Garden Hose", Some("Hoseco"), None),
                result("MilleLoom Ergonomic Office Chair", Some("MilleLoom"), None),
            ],
            &reference(),
        );
        assert_eq!(
            titles(&outcome),
            vec!["MilleLoom Ergonomic Office Chair", "MilleLoom Throw Blanket"]
        );
    }

    #[test]
    fn title_brand_rejects_when_nothing_clears_threshold() {
        let strategy = SearchStrategy::new(StrategyName::TitleBrand, "Ergonomic Office Chair MilleLoom");
        let outcome = validate(
            &strategy,
            vec![result("Garden Hose", Some("Hoseco"), None)],
            &reference(),
        );
        assert_eq!(
            outcome.rejection_reason(),
            Some(RejectionReason::BelowRelevanceThreshold)
        );
    }

    #[test]
    fn brand_only_rejects_listing_that_only_contains_brand_letters() {
        let reference = ReferenceProduct::new("Claw Hammer", Some("Ace".to_string()), vec![]);
        let strategy = SearchStrategy::new(StrategyName::BrandOnly, "Ace");
        let outcome = validate(
            &strategy,
            vec![result("Replacement Water Filter", Some("PureFlow"), None)],
            &reference,
        );
        assert_eq!(
            outcome.rejection_reason(),
            Some(RejectionReason::BelowRelevanceThreshold)
        );
    }

    #[test]
    fn short_brand_inside_unrelated_word_is_rejected() {
        let reference = ReferenceProduct::new("OLED Television", Some("LG".to_string()), vec![]);
        let strategy = SearchStrategy::new(StrategyName::BrandOnly, "LG");
        let outcome = validate(
            &strategy,
            vec![result("Bulgarian Rose Face Oil", None, None)],
            &reference,
        );
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn brand_named_in_title_without_other_overlap_is_rejected() {
        let reference = ReferenceProduct::new("Claw Hammer", Some("Ace".to_string()), vec![]);
        let strategy = SearchStrategy::new(StrategyName::BrandOnly, "Ace");
        let outcome = validate(
            &strategy,
            vec![
                result("Ace Garden Hose", None, None),
                result("Ace Claw Hammer 16oz", None, None),
            ],
            &reference,
        );
        assert_eq!(titles(&outcome), vec!["Ace Claw Hammer 16oz"]);
    }

    #[test]
    fn fallback_accepts_anything_non_empty() {
        let strategy = SearchStrategy::new(StrategyName::Fallback, "chair");
        let outcome = validate(
            &strategy,
            vec![result("Garden Hose", None, None)],
            &reference(),
        );
        assert_eq!(titles(&outcome), vec!["Garden Hose"]);
    }
}
