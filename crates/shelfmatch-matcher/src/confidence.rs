//! Per-result match confidence.
//!
//! Each accepted listing earns points for evidence that it is the reference
//! product itself rather than something merely related:
//!
//! | evidence | points |
//! |---|---|
//! | identifier equal to one of the reference's | 100 |
//! | brand equal / known variation | 40 / 32 |
//! | title keyword overlap >= 75% / 50% / 25% / 10% | 70 / 50 / 30 / 15 |
//! | shared product type | 15 |
//!
//! The total maps onto a [`MatchConfidence`] band.

use serde::Serialize;
use shelfmatch_core::{CandidateResult, ReferenceProduct};

use crate::identifier::{normalize_identifier, normalize_identifiers};
use crate::relevance::{brands_similar, relevance_score, shares_product_type, token_overlap};

const IDENTIFIER_POINTS: u32 = 100;
const BRAND_EXACT_POINTS: u32 = 40;
const BRAND_VARIATION_POINTS: u32 = 32;
const PRODUCT_TYPE_POINTS: u32 = 15;

/// Minimum overlap ratio and the points it earns, best first.
const TITLE_OVERLAP_TIERS: &[(f64, u32)] = &[(0.75, 70), (0.50, 50), (0.25, 30), (0.10, 15)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    NoMatch,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl MatchConfidence {
    /// `VeryHigh` from 120 points, `High` from 80, `Medium` from 50,
    /// `Low` from 25, `VeryLow` from 10.
    #[must_use]
    pub fn from_points(points: u32) -> Self {
        match points {
            120.. => MatchConfidence::VeryHigh,
            80..=119 => MatchConfidence::High,
            50..=79 => MatchConfidence::Medium,
            25..=49 => MatchConfidence::Low,
            10..=24 => MatchConfidence::VeryLow,
            _ => MatchConfidence::NoMatch,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MatchConfidence::VeryHigh => "Very High",
            MatchConfidence::High => "High",
            MatchConfidence::Medium => "Medium",
            MatchConfidence::Low => "Low",
            MatchConfidence::VeryLow => "Very Low",
            MatchConfidence::NoMatch => "No Match",
        }
    }
}

impl std::fmt::Display for MatchConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How well one accepted result matches the reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchAssessment {
    /// Validator relevance score in `[0, 1]`.
    pub relevance: f64,
    pub match_points: u32,
    pub confidence: MatchConfidence,
}

#[must_use]
pub fn assess_match(reference: &ReferenceProduct, candidate: &CandidateResult) -> MatchAssessment {
    let match_points = identifier_points(reference, candidate)
        + brand_points(reference, candidate)
        + title_points(reference, candidate)
        + if shares_product_type(reference.title(), &candidate.title) {
            PRODUCT_TYPE_POINTS
        } else {
            0
        };

    MatchAssessment {
        relevance: relevance_score(reference, candidate),
        match_points,
        confidence: MatchConfidence::from_points(match_points),
    }
}

fn identifier_points(reference: &ReferenceProduct, candidate: &CandidateResult) -> u32 {
    let Some(id) = candidate.identifier.as_deref().and_then(normalize_identifier) else {
        return 0;
    };
    if normalize_identifiers(reference.identifier_candidates()).contains(&id) {
        IDENTIFIER_POINTS
    } else {
        0
    }
}

/// Both sides must name a brand; a brand only seen in the result title earns
/// nothing here.
fn brand_points(reference: &ReferenceProduct, candidate: &CandidateResult) -> u32 {
    let (Some(wanted), Some(found)) = (
        reference.brand().map(str::trim).filter(|b| !b.is_empty()),
        candidate.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()),
    ) else {
        return 0;
    };

    if wanted.eq_ignore_ascii_case(found) {
        BRAND_EXACT_POINTS
    } else if brands_similar(wanted, found) {
        BRAND_VARIATION_POINTS
    } else {
        0
    }
}

fn title_points(reference: &ReferenceProduct, candidate: &CandidateResult) -> u32 {
    let overlap = token_overlap(reference.title(), &candidate.title);
    TITLE_OVERLAP_TIERS
        .iter()
        .find(|(min, _)| overlap >= *min)
        .map_or(0, |&(_, points)| points)
}
