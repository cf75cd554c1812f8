use tracing::debug;

use crate::models::item::{FoundItem, LostItem};
use crate::storage::{ItemStore, StoreError};

/// Inputs for one match computation: the requester's lost items and the
/// found items other users reported.
#[derive(Debug, Default)]
pub struct Candidates {
    pub lost: Vec<LostItem>,
    pub found: Vec<FoundItem>,
}

/// Gathers the requester's lost items and everyone else's found items.
///
/// Short-circuits without touching the found-item collection when the user
/// id is blank or the user has no valid lost items. Records missing a name
/// or a known category are dropped, as are found items the requester owns.
pub async fn collect_candidates(
    store: &dyn ItemStore,
    user_id: &str,
) -> Result<Candidates, StoreError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Ok(Candidates::default());
    }

    let lost_records = store.fetch_lost_items(user_id).await?;
    let fetched = lost_records.len();
    let lost: Vec<LostItem> = lost_records
        .into_iter()
        .filter(|r| r.owner_id == user_id)
        .filter_map(LostItem::from_record)
        .collect();
    if lost.len() < fetched {
        debug!("Excluded {} malformed lost items for user {user_id}", fetched - lost.len());
    }
    if lost.is_empty() {
        return Ok(Candidates::default());
    }

    let found_records = store.fetch_found_items(user_id).await?;
    let fetched = found_records.len();
    let found: Vec<FoundItem> = found_records
        .into_iter()
        .filter(|r| r.owner_id != user_id)
        .filter_map(FoundItem::from_record)
        .collect();
    if found.len() < fetched {
        debug!(
            "Excluded {} found items (malformed or owned by {user_id})",
            fetched - found.len()
        );
    }

    Ok(Candidates { lost, found })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_support::{found_record, lost_record, CountingStore};

    #[tokio::test]
    async fn test_no_lost_items_skips_found_fetch() {
        let store = CountingStore::new(
            vec![lost_record("bob", "umbrella", "accessories", None)],
            vec![found_record("carol", "umbrella", "accessories", None)],
        );

        let candidates = collect_candidates(&store, "alice").await.unwrap();
        assert!(candidates.lost.is_empty());
        assert!(candidates.found.is_empty());
        assert_eq!(store.lost_calls(), 1);
        assert_eq!(store.found_calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_user_fetches_nothing() {
        let store = CountingStore::default();
        let candidates = collect_candidates(&store, "   ").await.unwrap();
        assert!(candidates.lost.is_empty() && candidates.found.is_empty());
        assert_eq!(store.lost_calls(), 0);
        assert_eq!(store.found_calls(), 0);
    }

    #[tokio::test]
    async fn test_only_malformed_lost_items_short_circuits() {
        let mut blank = lost_record("alice", "  ", "personal", None);
        blank.category = None;
        let store = CountingStore::new(
            vec![blank, lost_record("alice", "wallet", "gadgets", None)],
            vec![found_record("bob", "wallet", "personal", None)],
        );

        let candidates = collect_candidates(&store, "alice").await.unwrap();
        assert!(candidates.lost.is_empty());
        assert_eq!(store.found_calls(), 0);
    }

    #[tokio::test]
    async fn test_own_and_malformed_found_items_dropped() {
        let store = CountingStore::new(
            vec![lost_record("alice", "wallet", "personal", Some("Main Street"))],
            vec![
                found_record("alice", "wallet", "personal", Some("Main Street")),
                found_record("bob", "", "personal", None),
                found_record("carol", "wallet", "personal", None),
            ],
        );

        let candidates = collect_candidates(&store, "alice").await.unwrap();
        assert_eq!(candidates.lost.len(), 1);
        assert_eq!(candidates.found.len(), 1);
        assert_eq!(candidates.found[0].owner_id, "carol");
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let store = CountingStore {
            lost: vec![lost_record("alice", "wallet", "personal", None)],
            fail_found: true,
            ..Default::default()
        };
        let err = collect_candidates(&store, "alice").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
