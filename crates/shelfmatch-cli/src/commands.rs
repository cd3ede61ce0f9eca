//! Command handlers. Each reads its JSON input, runs the matcher, and prints
//! pretty JSON to stdout.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use shelfmatch_catalog::{
    reference_from_listing, text_sources_from_listing, CatalogClient, CatalogClientConfig,
    FULFILLMENT_SOURCE_PATHS,
};
use shelfmatch_core::{AppConfig, ReferenceProduct};
use shelfmatch_matcher::{build_strategies, extract_fulfillment, search_listings};

/// Prints the strategy plan for a reference record. No network access.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON.
pub(crate) fn run_strategies(reference_path: &Path, fallback: Option<&str>) -> anyhow::Result<()> {
    let reference = load_reference(reference_path)?;
    let fallback_term = resolve_fallback(&reference, fallback);
    let plan = build_strategies(&reference, &fallback_term);
    print_json(&plan)
}

/// Runs the full cascade against the configured catalog and prints the
/// resulting report.
///
/// # Errors
///
/// Returns an error if the reference file is unreadable, `max_results` is
/// zero, or the catalog client cannot be built. Catalog failures during the
/// search itself are logged, not returned.
pub(crate) async fn run_search(
    config: &AppConfig,
    reference_path: &Path,
    fallback: Option<&str>,
    max_results: Option<usize>,
    no_details: bool,
) -> anyhow::Result<()> {
    let reference = load_reference(reference_path)?;
    let fallback_term = resolve_fallback(&reference, fallback);
    let max_results = resolve_max_results(max_results, config.default_max_results)?;

    let client = CatalogClient::new(&CatalogClientConfig::from(config))
        .context("failed to build catalog client")?;
    let detail = (!no_details).then_some(&client);

    let report = search_listings(&reference, &fallback_term, max_results, &client, detail).await;
    tracing::info!(
        strategy = %report.winning_strategy_name,
        results = report.results.len(),
        "search finished"
    );
    print_json(&report)
}

/// Prints the fulfillment fact found in a listing record, or `null`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON.
pub(crate) fn run_extract(listing_path: &Path) -> anyhow::Result<()> {
    let listing = read_json(listing_path)?;
    let sources = text_sources_from_listing(&listing, FULFILLMENT_SOURCE_PATHS);
    if sources.is_empty() {
        tracing::warn!(path = %listing_path.display(), "listing carries no fulfillment text");
    }
    print_json(&extract_fulfillment(&sources))
}

fn load_reference(path: &Path) -> anyhow::Result<ReferenceProduct> {
    let record = read_json(path)?;
    let reference = reference_from_listing(&record);
    if reference.title().is_empty() && reference.identifier_candidates().is_empty() {
        tracing::warn!(
            path = %path.display(),
            "reference record has neither a title nor identifiers"
        );
    }
    Ok(reference)
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// An explicit fallback term wins; otherwise the reference title is used.
pub(crate) fn resolve_fallback(reference: &ReferenceProduct, fallback: Option<&str>) -> String {
    fallback.map_or_else(|| reference.title().to_owned(), str::to_owned)
}

pub(crate) fn resolve_max_results(requested: Option<usize>, default: usize) -> anyhow::Result<usize> {
    match requested {
        Some(0) => anyhow::bail!("--max-results must be at least 1"),
        Some(n) => Ok(n),
        None => Ok(default),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
