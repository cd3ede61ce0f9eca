//! Strategy planning: turns a [`ReferenceProduct`] into precision-ordered
//! catalog queries.
//!
//! Order of tiers:
//! 1. `identifier`: one per distinct normalized code
//! 2. `title_brand`: cleaned title plus missing brand words
//! 3. `brand_only`: trimmed brand
//! 4. `fallback`: caller-supplied term, verbatim

use std::collections::HashSet;

use shelfmatch_core::{ReferenceProduct, SearchStrategy, StrategyName};

use crate::identifier::normalize_identifiers;

/// Maximum number of title words carried into a `title_brand` query.
pub const MAX_TITLE_WORDS: usize = 8;

/// Stop words and listing filler that add nothing to a catalog query.
pub(crate) const NOISE_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "by", "for", "from", "in", "is", "it", "of", "on", "or",
    "the", "to", "with", "new", "brand", "official", "genuine", "authentic", "original", "latest",
    "best", "sale", "hot", "free", "shipping", "pack", "pcs", "piece", "pieces",
];

/// Builds the ordered strategy plan for one search call.
///
/// Ranks in the returned list never decrease. The `fallback` tier is always
/// present, even when `fallback_term` is blank; the orchestrator declines to
/// dispatch blank queries.
#[must_use]
pub fn build_strategies(reference: &ReferenceProduct, fallback_term: &str) -> Vec<SearchStrategy> {
    let mut strategies: Vec<SearchStrategy> = normalize_identifiers(reference.identifier_candidates())
        .into_iter()
        .map(|id| SearchStrategy::new(StrategyName::Identifier, id.into_string()))
        .collect();

    if let Some(brand) = reference.brand() {
        if let Some(query) = title_brand_query(reference.title(), brand) {
            strategies.push(SearchStrategy::new(StrategyName::TitleBrand, query));
        }
        strategies.push(SearchStrategy::new(StrategyName::BrandOnly, brand));
    }

    strategies.push(SearchStrategy::new(StrategyName::Fallback, fallback_term));
    strategies
}

/// Meaningful title words in original case: punctuation split, noise and
/// single-character tokens dropped, case-insensitive duplicates removed.
#[must_use]
pub fn title_keywords(title: &str) -> Vec<String> {
    let spaced: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut seen = HashSet::new();
    spaced
        .split_whitespace()
        .filter(|word| word.chars().count() >= 2)
        .filter(|word| !is_noise_word(word))
        .filter(|word| seen.insert(word.to_lowercase()))
        .map(str::to_string)
        .collect()
}

pub(crate) fn is_noise_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    NOISE_WORDS.contains(&lower.as_str())
}

fn title_brand_query(title: &str, brand: &str) -> Option<String> {
    let mut words = title_keywords(title);
    words.truncate(MAX_TITLE_WORDS);
    if words.is_empty() {
        return None;
    }

    let present: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    for brand_word in brand.split_whitespace() {
        let key: String = brand_word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if !key.is_empty() && !present.contains(&key) {
            words.push(brand_word.to_string());
        }
    }

    Some(words.join(" "))
}
