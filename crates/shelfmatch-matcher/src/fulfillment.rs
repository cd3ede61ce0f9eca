//! Seller/shipper extraction from free-form listing text.
//!
//! Sources are scanned in caller-supplied priority order; within a source the
//! five phrase patterns are tried in fixed precedence, most specific first:
//!
//! | precedence | phrase | fields |
//! |---|---|---|
//! | 1 | `Sold by <s> and Shipped by <h>` | seller + shipper |
//! | 2 | `Ships from and sold by <n>` | seller = shipper |
//! | 3 | `Sold by <s>` | seller |
//! | 4 | `Shipped by <h>` | shipper |
//! | 5 | `Ships from <h>` | shipper |
//!
//! A name ends at `, ; | < >`, a line break, a period followed by
//! whitespace, or end of text.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use shelfmatch_core::{FulfillmentFact, MatchedPattern, TextSource};

use crate::sanitize::{sanitize_text, trim_trailing_punctuation};

/// Cleaned names longer than this are page noise, not a seller.
pub const MAX_NAME_CHARS: usize = 80;

/// Values that mean "nothing here" in scraped records.
const PLACEHOLDERS: &[&str] = &["none", "null", "{}", "[]", "undefined", "\"\"", "''"];

/// Phrases that start a second clause inside a captured name.
const FOLLOW_ON_PHRASES: &[&str] = &[
    " and shipped by ",
    " and ships from ",
    " and fulfilled by ",
    " fulfilled by ",
    " shipped by ",
    " ships from ",
    " sold by ",
];

const NAME: &str = r"[^,;|<>\r\n]+?";
const END: &str = r"(?:\.\s|\.$|[,;|<>\r\n]|$)";

static SOLD_AND_SHIPPED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bsold\s+by\s*:?\s*(?P<seller>{NAME})\s+and\s+shipped\s+by\s*:?\s*(?P<shipper>{NAME}){END}"
    ))
    .expect("valid sold-and-shipped regex")
});
static SHIPS_FROM_AND_SOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bships\s+from\s+and\s+sold\s+by\s*:?\s*(?P<seller>{NAME}){END}"
    ))
    .expect("valid ships-from-and-sold regex")
});
static SOLD_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bsold\s+by\s*:?\s*(?P<seller>{NAME}){END}"))
        .expect("valid sold-by regex")
});
static SHIPPED_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bshipped\s+by\s*:?\s*(?P<shipper>{NAME}){END}"))
        .expect("valid shipped-by regex")
});
static SHIPS_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bships\s+from\s*:?\s*(?P<shipper>{NAME}){END}"))
        .expect("valid ships-from regex")
});
static TRAILING_PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("valid parenthetical regex"));

/// Patterns in precedence order.
fn patterns() -> [(MatchedPattern, &'static Regex); 5] {
    [
        (MatchedPattern::SoldByAndShippedBy, &*SOLD_AND_SHIPPED_RE),
        (MatchedPattern::ShipsFromAndSoldBy, &*SHIPS_FROM_AND_SOLD_RE),
        (MatchedPattern::SoldBy, &*SOLD_BY_RE),
        (MatchedPattern::ShippedBy, &*SHIPPED_BY_RE),
        (MatchedPattern::ShipsFrom, &*SHIPS_FROM_RE),
    ]
}

/// Extracts the first fulfillment fact found in `sources`.
///
/// Returns `None` when no source carries a recognizable phrase with a usable
/// name. Pure: the same input always produces the same output.
#[must_use]
pub fn extract_fulfillment(sources: &[TextSource]) -> Option<FulfillmentFact> {
    sources.iter().find_map(|source| {
        let text = sanitize_text(&source.value);
        if is_placeholder(&text) {
            return None;
        }
        let fact = extract_from_text(&text);
        if let Some(fact) = &fact {
            tracing::debug!(
                source = %source.name,
                pattern = fact.matched_pattern.as_str(),
                "fulfillment phrase matched"
            );
        }
        fact
    })
}

fn extract_from_text(text: &str) -> Option<FulfillmentFact> {
    patterns().into_iter().find_map(|(pattern, re)| {
        re.captures_iter(text)
            .find_map(|caps| fact_from_captures(text, pattern, &caps))
    })
}

fn fact_from_captures(text: &str, pattern: MatchedPattern, caps: &Captures<'_>) -> Option<FulfillmentFact> {
    let whole = caps.get(0)?;
    let seller_group = caps.name("seller");
    let shipper_group = caps.name("shipper");

    let seller = match seller_group {
        Some(m) => Some(valid_name(text, m.start(), m.end())?),
        None => None,
    };
    let shipper = match shipper_group {
        Some(m) => Some(valid_name(text, m.start(), m.end())?),
        None => None,
    };

    let (seller_name, shipped_by) = match pattern {
        MatchedPattern::ShipsFromAndSoldBy => (seller.clone(), seller),
        _ => (seller, shipper),
    };

    let last_end = [seller_group, shipper_group]
        .into_iter()
        .flatten()
        .map(|m| m.end())
        .max()
        .unwrap_or(whole.end());
    let source_text = text[whole.start()..last_end].trim().to_string();

    Some(FulfillmentFact::new(seller_name, shipped_by, source_text, pattern))
}

/// Cleans the captured span, re-attaching a period the terminator consumed
/// so abbreviations like `Inc.` survive.
fn valid_name(text: &str, start: usize, end: usize) -> Option<String> {
    let end = if text[end..].starts_with('.') { end + 1 } else { end };
    let name = clean_seller_name(&text[start..end]);
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        None
    } else {
        Some(name)
    }
}

/// Normalizes a captured seller/shipper name.
///
/// Strips markup and invisible characters, cuts at a follow-on clause
/// (`"Acme fulfilled by Amazon"` -> `"Acme"`), drops a trailing parenthetical,
/// and trims surrounding quotes and trailing punctuation. A trailing corporate
/// abbreviation keeps its period.
#[must_use]
pub fn clean_seller_name(raw: &str) -> String {
    let mut name = sanitize_text(raw);

    let lower = name.to_ascii_lowercase();
    if let Some(cut) = FOLLOW_ON_PHRASES
        .iter()
        .filter_map(|phrase| lower.find(phrase))
        .min()
    {
        name.truncate(cut);
    }

    let name = TRAILING_PARENTHETICAL_RE.replace(&name, "");
    let name = name.trim().trim_matches(is_quote);
    trim_trailing_punctuation(name)
        .trim_matches(is_quote)
        .trim()
        .to_string()
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '\u{201c}' | '\u{201d}' | '\u{2018}' | '\u{2019}')
}

fn is_placeholder(text: &str) -> bool {
    text.is_empty() || PLACEHOLDERS.iter().any(|p| text.eq_ignore_ascii_case(p))
}

#[cfg(test)]
#[path = "fulfillment_test.rs"]
mod tests;
