//! Relevance scoring for title/brand search results.
//!
//! Score = `0.50 * brand + 0.35 * token_overlap + 0.15 * product_type`,
//! each component in `[0, 1]`.

use std::collections::HashSet;

use shelfmatch_core::{CandidateResult, ReferenceProduct};

use crate::query::title_keywords;

/// Results scoring below this are discarded by the validator.
pub const MIN_RELEVANCE_SCORE: f64 = 0.30;

const BRAND_WEIGHT: f64 = 0.50;
const OVERLAP_WEIGHT: f64 = 0.35;
const PRODUCT_TYPE_WEIGHT: f64 = 0.15;

const BRAND_EXACT: f64 = 1.0;
const BRAND_VARIATION: f64 = 0.8;
/// Alone this stays under [`MIN_RELEVANCE_SCORE`]; a title mention needs
/// shared keywords or a shared product type to be accepted.
const BRAND_IN_TITLE: f64 = 0.5;

/// Canonical brand name followed by spellings that denote the same brand.
const BRAND_ALIASES: &[(&str, &[&str])] = &[
    ("amazon basics", &["amazonbasics", "amazon", "basics"]),
    ("apple", &["apple inc", "apple computer"]),
    ("samsung", &["samsung electronics", "samsung group"]),
    ("google", &["google llc", "alphabet"]),
    ("microsoft", &["microsoft corporation", "msft"]),
    ("sony", &["sony corporation", "sony group"]),
    ("lg", &["lg electronics", "lg corp"]),
    ("hp", &["hewlett-packard", "hewlett packard"]),
    ("dell", &["dell technologies", "dell inc"]),
    ("lenovo", &["lenovo group"]),
    ("best office", &["bestoffice"]),
    ("ikea", &["ikea group"]),
    ("wayfair", &["wayfair llc"]),
    ("nike", &["nike inc"]),
    ("adidas", &["adidas ag"]),
    ("under armour", &["underarmour"]),
    ("cuisinart", &["conair cuisinart"]),
    ("kitchenaid", &["kitchen aid"]),
    ("black decker", &["black & decker", "blackdecker"]),
];

/// Coarse product categories; two titles sharing one are the same kind of thing.
const PRODUCT_TYPES: &[&str] = &[
    "chair", "table", "desk", "bed", "sofa", "couch", "dresser", "shelf", "lamp", "mattress",
    "phone", "laptop", "computer", "tablet", "headphone", "earbud", "speaker", "monitor",
    "keyboard", "mouse", "kitchen", "appliance", "dishwasher", "microwave", "refrigerator",
    "blender", "toaster", "clothing", "shirt", "pants", "shoes", "boots", "jacket", "book",
    "game", "toy", "tool", "drill", "camera", "watch", "bottle",
];

/// Weighted relevance of `candidate` against `reference`, in `[0, 1]`.
#[must_use]
pub fn relevance_score(reference: &ReferenceProduct, candidate: &CandidateResult) -> f64 {
    let brand = reference
        .brand()
        .map_or(0.0, |b| brand_score(b, candidate.brand.as_deref(), &candidate.title));
    let overlap = token_overlap(reference.title(), &candidate.title);
    let product_type = if shares_product_type(reference.title(), &candidate.title) {
        1.0
    } else {
        0.0
    };

    BRAND_WEIGHT * brand + OVERLAP_WEIGHT * overlap + PRODUCT_TYPE_WEIGHT * product_type
}

fn brand_score(reference_brand: &str, result_brand: Option<&str>, result_title: &str) -> f64 {
    let result_brand = result_brand.map(str::trim).filter(|b| !b.is_empty());
    if let Some(result_brand) = result_brand {
        if result_brand.eq_ignore_ascii_case(reference_brand) {
            return BRAND_EXACT;
        }
        if brands_similar(reference_brand, result_brand) {
            return BRAND_VARIATION;
        }
    }
    if title_mentions(result_title, reference_brand) {
        return BRAND_IN_TITLE;
    }
    0.0
}

/// Known variations of one brand: alias table entries, one name's words
/// appearing as a run inside the other's (both longer than three
/// characters), or initials (`"Hewlett Packard"` / `"hp"`).
#[must_use]
pub fn brands_similar(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    if BRAND_ALIASES
        .iter()
        .any(|&(canonical, variations)| {
            alias_of(&a, canonical, variations) && alias_of(&b, canonical, variations)
        })
    {
        return true;
    }

    if a.chars().count() > 3 && b.chars().count() > 3 {
        let (a_words, b_words) = (word_tokens(&a), word_tokens(&b));
        if contains_run(&a_words, &b_words) || contains_run(&b_words, &a_words) {
            return true;
        }
    }

    is_initialism(&a, &b) || is_initialism(&b, &a)
}

fn alias_of(name: &str, canonical: &str, variations: &[&str]) -> bool {
    name == canonical || variations.contains(&name)
}

fn is_initialism(full: &str, short: &str) -> bool {
    let words: Vec<&str> = full.split_whitespace().collect();
    if words.len() < 2 || short.chars().count() > 4 {
        return false;
    }
    let initials: String = words.iter().filter_map(|w| w.chars().next()).collect();
    initials == short
}

/// Share of the reference title's keywords present in the result title.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn token_overlap(reference_title: &str, result_title: &str) -> f64 {
    let reference_words = lowercase_keywords(reference_title);
    if reference_words.is_empty() {
        return 0.0;
    }
    let result_words: HashSet<String> = lowercase_keywords(result_title).into_iter().collect();
    let shared = reference_words
        .iter()
        .filter(|w| result_words.contains(*w))
        .count();

    shared as f64 / reference_words.len() as f64
}

fn lowercase_keywords(title: &str) -> Vec<String> {
    title_keywords(title)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
}

/// Whole-word match: `"LG"` is mentioned by `"LG OLED TV"` but not by
/// `"Bulgarian Rose Oil"`.
fn title_mentions(title: &str, brand: &str) -> bool {
    contains_run(&word_tokens(title), &word_tokens(brand))
}

fn word_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when `needle` occurs as a contiguous run of words in `haystack`.
fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

pub(crate) fn shares_product_type(a: &str, b: &str) -> bool {
    let a_types = product_types(a);
    !a_types.is_empty() && product_types(b).intersection(&a_types).next().is_some()
}

fn product_types(title: &str) -> HashSet<&'static str> {
    let lower = title.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    PRODUCT_TYPES
        .iter()
        .copied()
        .filter(|kw| words.iter().any(|w| is_keyword_form(w, kw)))
        .collect()
}

fn is_keyword_form(word: &str, keyword: &str) -> bool {
    match word.strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest == "s" || rest == "es",
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(title: &str, brand: &str) -> ReferenceProduct {
        ReferenceProduct::new(title, Some(brand.to_string()), vec![])
    }

    fn candidate(title: &str, brand: Option<&str>) -> CandidateResult {
        CandidateResult {
            title: title.to_string(),
            brand: brand.map(str::to_string),
            ..CandidateResult::default()
        }
    }

    #[test]
    fn exact_brand_and_title_scores_one() {
        let r = reference("Ergonomic Office Chair", "MilleLoom");
        let c = candidate("MilleLoom Ergonomic Office Chair", Some("milleloom"));
        let score = relevance_score(&r, &c);
        assert!((score - 1.0).abs() < 1e-9, "score={score}");
    }

    #[test]
    fn unrelated_result_scores_zero() {
        let r = reference("Ergonomic Office Chair", "MilleLoom");
        let c = candidate("Stainless Steel Water Bottle", Some("Hydro"));
        assert!(relevance_score(&r, &c).abs() < 1e-9);
    }

    #[test]
    fn brand_alias_scores_as_variation() {
        let r = reference("Laptop", "HP");
        let c = candidate("Notebook", Some("Hewlett-Packard"));
        let score = relevance_score(&r, &c);
        assert!((score - 0.40).abs() < 1e-9, "score={score}");
    }

    #[test]
    fn brand_mentioned_only_in_title() {
        let r = reference("Cordless Drill", "Acme");
        let c = candidate("Acme Cordless Drill 20V", None);
        // 0.5*0.5 + 0.35*1.0 + 0.15*1.0
        let score = relevance_score(&r, &c);
        assert!((score - 0.75).abs() < 1e-9, "score={score}");
    }

    #[test]
    fn lone_title_mention_stays_below_threshold() {
        let r = reference("Claw Hammer", "Ace");
        let c = candidate("Ace Water Filter", Some("PureFlow"));
        assert!(relevance_score(&r, &c) < MIN_RELEVANCE_SCORE);
    }

    #[test]
    fn brand_inside_another_word_is_not_a_mention() {
        assert!(!title_mentions("Replacement Water Filter", "Ace"));
        assert!(!title_mentions("Bulgarian Rose Face Oil", "LG"));
        assert!(title_mentions("LG 55\" OLED TV", "lg"));
        assert!(title_mentions("Drill by Black & Decker", "Black+Decker"));
    }

    #[test]
    fn partial_overlap_is_proportional() {
        let r = reference("Walnut Standing Desk Frame", "Nobrand");
        let c = candidate("Standing Desk", None);
        // overlap 2/4, shared type "desk"
        let expected = 0.35 * 0.5 + 0.15;
        assert!((relevance_score(&r, &c) - expected).abs() < 1e-9);
    }

    #[test]
    fn brands_similar_containment_requires_length() {
        assert!(brands_similar("Cuisinart", "Conair Cuisinart"));
        assert!(!brands_similar("LG", "LGX"));
    }

    #[test]
    fn brands_similar_containment_is_word_based() {
        assert!(!brands_similar("apple", "Pineapple Co"));
        assert!(!brands_similar("Ford", "Stanford Goods"));
        assert!(brands_similar("Oakridge", "Oakridge Home Goods"));
    }

    #[test]
    fn brands_similar_initials() {
        assert!(brands_similar("Black Decker", "bd"));
        assert!(brands_similar("ge", "General Electric"));
    }

    #[test]
    fn brands_similar_rejects_blank() {
        assert!(!brands_similar("", ""));
        assert!(!brands_similar("Acme", "  "));
    }

    #[test]
    fn product_type_matches_plurals() {
        assert!(shares_product_type("Wireless Headphones", "Over-Ear Headphone"));
        assert!(shares_product_type("Dining Tables", "Oak table"));
        assert!(!shares_product_type("Watchful eye poster", "Smart watch"));
    }
}
