//! Match engine: pairs a user's lost items with found items reported by others.
//!
//! Pipeline per request: collect (async, storage I/O) → score every
//! (lost, found) pair → drop pairs at or below the threshold → rank.
//! Scoring and ranking are pure and never suspend; the engine keeps no state
//! between requests, so concurrent requests share nothing mutable.
//!
//! `AppState` holds a `Matcher` wrapping the configured `Arc<dyn ItemStore>`.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::matching::collector::collect_candidates;
use crate::matching::ranker::{rank, MatchCandidate};
use crate::matching::scorer::{score_pair, MatchConfig};
use crate::models::item::{FoundItem, LostItem};
use crate::storage::{ItemStore, StoreError};

#[derive(Debug, Error)]
pub enum MatchError {
    /// Matches are temporarily unavailable, which is not the same as "no matches".
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StoreError> for MatchError {
    fn from(e: StoreError) -> Self {
        MatchError::StorageUnavailable(e.to_string())
    }
}

#[derive(Clone)]
pub struct Matcher {
    store: Arc<dyn ItemStore>,
    config: MatchConfig,
}

impl Matcher {
    pub fn new(store: Arc<dyn ItemStore>, config: MatchConfig) -> Self {
        Self { store, config }
    }

    /// Ranked matches for `user_id`'s lost items. All-or-nothing: a storage
    /// failure yields an error, never a partial list.
    pub async fn find_matches(&self, user_id: &str) -> Result<Vec<MatchCandidate>, MatchError> {
        info!("Finding potential matches for user {user_id}");

        let candidates = collect_candidates(self.store.as_ref(), user_id)
            .await
            .map_err(|e| {
                error!("Match fetch failed for user {user_id}: {e}");
                MatchError::from(e)
            })?;

        if candidates.lost.is_empty() {
            info!("No lost items to match for user {user_id}");
            return Ok(Vec::new());
        }
        info!(
            "Scoring {} lost items against {} found items from other users",
            candidates.lost.len(),
            candidates.found.len()
        );

        let matches = match_pool(&candidates.lost, &candidates.found, &self.config);
        info!("Found {} potential matches for user {user_id}", matches.len());
        Ok(matches)
    }

    /// Number of matches `find_matches` would return.
    pub async fn count_matches(&self, user_id: &str) -> Result<usize, MatchError> {
        Ok(self.find_matches(user_id).await?.len())
    }
}

/// Scores the full cross product, keeps pairs strictly above the threshold,
/// and ranks them. Lost-major iteration order breaks score ties.
pub fn match_pool(
    lost: &[LostItem],
    found: &[FoundItem],
    config: &MatchConfig,
) -> Vec<MatchCandidate> {
    let mut candidates = Vec::new();
    for lost_item in lost {
        for found_item in found {
            let pair = score_pair(lost_item, found_item, config);
            if pair.clears(config.threshold) {
                candidates.push(MatchCandidate::new(
                    lost_item.clone(),
                    found_item.clone(),
                    &pair,
                ));
            }
        }
    }
    rank(candidates)
}
