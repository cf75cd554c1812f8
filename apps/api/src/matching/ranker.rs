use std::fmt;

use serde::Serialize;

use crate::matching::scorer::PairScore;
use crate::models::item::{FoundItem, LostItem};

/// Name similarity must exceed this to be called out as a reason.
pub const SIMILAR_NAME_THRESHOLD: f64 = 0.6;
/// Location similarity must exceed this to be called out as a reason.
pub const NEARBY_LOCATION_THRESHOLD: f64 = 0.5;

const FALLBACK_REASON: &str = "potential match";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchReason {
    #[serde(rename = "similar name")]
    SimilarName,
    #[serde(rename = "same category")]
    SameCategory,
    #[serde(rename = "nearby location")]
    NearbyLocation,
}

impl MatchReason {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchReason::SimilarName => "similar name",
            MatchReason::SameCategory => "same category",
            MatchReason::NearbyLocation => "nearby location",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative tags for a scored pair, in fixed name → category → location order.
pub fn reasons_for(score: &PairScore) -> Vec<MatchReason> {
    let mut reasons = Vec::new();
    if score.name.is_some_and(|s| s > SIMILAR_NAME_THRESHOLD) {
        reasons.push(MatchReason::SimilarName);
    }
    if score.category.is_some_and(|s| s >= 1.0) {
        reasons.push(MatchReason::SameCategory);
    }
    if score.location.is_some_and(|s| s > NEARBY_LOCATION_THRESHOLD) {
        reasons.push(MatchReason::NearbyLocation);
    }
    reasons
}

/// A scored, explained pairing of one lost item with one found item.
/// Built fresh for every request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub lost_item: LostItem,
    pub found_item: FoundItem,
    pub score: f64,
    pub reasons: Vec<MatchReason>,
}

impl MatchCandidate {
    pub fn new(lost_item: LostItem, found_item: FoundItem, pair: &PairScore) -> Self {
        Self {
            lost_item,
            found_item,
            score: pair.composite,
            reasons: reasons_for(pair),
        }
    }

    /// Reasons joined with `" + "`, or `"potential match"` when none qualify.
    pub fn reason(&self) -> String {
        if self.reasons.is_empty() {
            return FALLBACK_REASON.to_string();
        }
        self.reasons
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Score as a whole percentage, the way the matches screen shows it.
    pub fn match_percent(&self) -> u32 {
        (self.score * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Orders candidates by descending score. Equal scores keep input order.
pub fn rank(mut candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
    // `sort_by` is stable.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}
