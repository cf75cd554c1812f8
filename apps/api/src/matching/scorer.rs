use thiserror::Error;

use crate::matching::similarity::{location_similarity, name_similarity};
use crate::models::item::{FoundItem, LostItem};

/// Composite scores within this distance of the threshold count as on it.
const SCORE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub name: f64,
    pub category: f64,
    pub location: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            name: 0.4,
            category: 0.3,
            location: 0.3,
        }
    }
}

/// Tunables for one match computation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub weights: MatchWeights,
    /// Exclusive lower bound: a pair survives only if `score > threshold`.
    pub threshold: f64,
    /// Shortest name token allowed to produce a containment hit.
    pub min_name_token_len: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            threshold: 0.3,
            min_name_token_len: 1,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MatchConfigError {
    #[error("match weight '{0}' must be a finite, non-negative number")]
    InvalidWeight(&'static str),

    #[error("at least one match weight must be positive")]
    AllWeightsZero,

    #[error("match threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), MatchConfigError> {
        let w = &self.weights;
        for (label, value) in [("name", w.name), ("category", w.category), ("location", w.location)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchConfigError::InvalidWeight(label));
            }
        }
        if w.name + w.category + w.location <= 0.0 {
            return Err(MatchConfigError::AllWeightsZero);
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchConfigError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }
}

/// Per-factor breakdown of one (lost, found) comparison.
///
/// `None` means the factor was not applicable and is left out of both the
/// weighted sum and the normalizing weight total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub name: Option<f64>,
    pub category: Option<f64>,
    pub location: Option<f64>,
    /// Weighted average over the applicable factors, in [0, 1].
    pub composite: f64,
}

impl PairScore {
    /// Strictly above `threshold`, with sums that land on it by float
    /// rounding treated as equal.
    pub fn clears(&self, threshold: f64) -> bool {
        self.composite - threshold > SCORE_EPSILON
    }
}

/// Scores one pair. Pure and deterministic.
pub fn score_pair(lost: &LostItem, found: &FoundItem, config: &MatchConfig) -> PairScore {
    let name = name_similarity(&lost.name, &found.name, config.min_name_token_len);
    // Both sides always carry a category once past the collector.
    let category = Some(if lost.category == found.category { 1.0 } else { 0.0 });
    let location =
        location_similarity(lost.last_seen_location.as_deref(), found.location.as_deref());

    let w = &config.weights;
    let mut weighted = 0.0_f64;
    let mut total_weight = 0.0_f64;
    for (sub_score, weight) in [(name, w.name), (category, w.category), (location, w.location)] {
        if let Some(s) = sub_score {
            weighted += weight * s;
            total_weight += weight;
        }
    }

    let composite = if total_weight > 0.0 {
        (weighted / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    PairScore {
        name,
        category,
        location,
        composite,
    }
}
