//! Conversion from raw catalog listing JSON to domain types.
//!
//! Every field is located by probing an ordered list of dotted paths; the
//! first non-empty value wins. Listings missing optional fields still
//! normalize, only a missing title drops a listing.

use serde_json::Value;
use shelfmatch_core::{CandidateResult, ReferenceProduct, TextSource};
use shelfmatch_matcher::normalize_identifier;

/// Where product codes live, most specific first.
pub const IDENTIFIER_PATHS: &[&str] = &[
    "specifications.UPC",
    "specifications.GTIN",
    "specifications.EAN",
    "specifications.Global Trade Identification Number",
    "specifications.European Article Number",
    "matching_data.barcode",
    "barcode",
    "gtin",
    "upc",
    "basic_info.upc",
];

pub const BRAND_PATHS: &[&str] = &["brand", "specifications.Brand Name", "basic_info.brand"];

pub const TITLE_PATHS: &[&str] = &["title", "basic_info.name", "name"];

pub const LISTING_REF_PATHS: &[&str] = &["tcin", "asin", "id", "url"];

pub const PRICE_PATHS: &[&str] = &[
    "pricing.formatted_current_price",
    "pricing.current_price",
    "basic_info.price",
    "price.current",
    "price",
    "formatted_price",
    "current_price",
];

/// Fulfillment text locations in priority order.
pub const FULFILLMENT_SOURCE_PATHS: &[&str] = &[
    "fulfillment_text",
    "seller_info",
    "shipping_info",
    "delivery_info",
    "marketplace_info",
    "pricing.seller_info",
    "pricing.fulfillment_text",
    "details.seller_info",
    "specifications.seller_info",
    "raw_html",
    "description",
];

/// Builds the reference side of a search from an already-fetched product
/// record. Every identifier path that holds a value contributes a candidate,
/// in path order.
#[must_use]
pub fn reference_from_listing(listing: &Value) -> ReferenceProduct {
    let title = first_string(listing, TITLE_PATHS).unwrap_or_default();
    let brand = first_string(listing, BRAND_PATHS);
    let identifiers = IDENTIFIER_PATHS
        .iter()
        .filter_map(|path| string_at(listing, path))
        .collect();
    ReferenceProduct::new(title, brand, identifiers)
}

/// Converts one search-result listing into a [`CandidateResult`], or `None`
/// when the listing has no title.
#[must_use]
pub fn candidate_from_listing(listing: &Value) -> Option<CandidateResult> {
    let title = first_string(listing, TITLE_PATHS)?;

    let raw_identifiers: Vec<String> = IDENTIFIER_PATHS
        .iter()
        .filter_map(|path| string_at(listing, path))
        .collect();
    let identifier = raw_identifiers
        .iter()
        .find(|raw| normalize_identifier(raw).is_some())
        .or_else(|| raw_identifiers.first())
        .cloned();

    Some(CandidateResult {
        title,
        brand: first_string(listing, BRAND_PATHS),
        identifier,
        price: extract_price(listing),
        listing_ref: first_string(listing, LISTING_REF_PATHS),
        text_sources: text_sources_from_listing(listing, FULFILLMENT_SOURCE_PATHS),
    })
}

/// Collects the text found at `paths` as named sources, preserving order.
///
/// Strings are taken as-is; objects and arrays contribute their string
/// leaves joined by `" | "`. Empty values are skipped.
#[must_use]
pub fn text_sources_from_listing(listing: &Value, paths: &[&str]) -> Vec<TextSource> {
    paths
        .iter()
        .filter_map(|path| {
            let value = value_at(listing, path)?;
            let text = match value {
                Value::String(s) => s.trim().to_owned(),
                Value::Object(_) | Value::Array(_) => {
                    let mut leaves = Vec::new();
                    collect_string_leaves(value, &mut leaves);
                    leaves.join(" | ")
                }
                _ => return None,
            };
            (!text.is_empty()).then(|| TextSource::new(*path, text))
        })
        .collect()
}

/// First usable display price. Bare numbers gain a `$` prefix; `"0"` and
/// `"none"` count as missing.
#[must_use]
pub fn extract_price(listing: &Value) -> Option<String> {
    PRICE_PATHS.iter().find_map(|path| {
        let raw = string_at(listing, path)?;
        if raw == "0" || raw.eq_ignore_ascii_case("none") {
            return None;
        }
        if raw.parse::<f64>().is_ok() {
            Some(format!("${raw}"))
        } else {
            Some(raw)
        }
    })
}

fn value_at<'a>(listing: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(listing, |node, key| node.as_object()?.get(key))
}

/// Scalar at `path` as a trimmed, non-empty string. Numbers are rendered;
/// objects, arrays, booleans, and null are not scalars here.
fn string_at(listing: &Value, path: &str) -> Option<String> {
    let text = match value_at(listing, path)? {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn first_string(listing: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| string_at(listing, path))
}

fn collect_string_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_owned()),
        Value::Array(items) => items.iter().for_each(|v| collect_string_leaves(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_string_leaves(v, out)),
        _ => {}
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
