//! Item builders shared by the matching tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::item::{
    Category, FoundItem, FoundItemRecord, ItemKind, LostItem, LostItemRecord, ValidatedReport,
};
use crate::storage::{ItemStore, StoreError};

pub fn lost(name: &str, category: Category, place: Option<&str>) -> LostItem {
    LostItem {
        id: Uuid::new_v4(),
        owner_id: "alice".to_string(),
        name: name.to_string(),
        description: None,
        last_seen_location: place.map(str::to_string),
        category,
        date: "Oct 16, 2026".to_string(),
        image_uri: None,
        location_coords: None,
    }
}

pub fn found(name: &str, category: Category, place: Option<&str>) -> FoundItem {
    FoundItem {
        id: Uuid::new_v4(),
        owner_id: "bob".to_string(),
        name: name.to_string(),
        description: None,
        location: place.map(str::to_string),
        category,
        date: "Oct 16, 2026".to_string(),
        image_uri: None,
        location_coords: None,
    }
}

pub fn lost_record(owner: &str, name: &str, category: &str, place: Option<&str>) -> LostItemRecord {
    LostItemRecord {
        id: Uuid::new_v4(),
        owner_id: owner.to_string(),
        name: name.to_string(),
        description: None,
        last_seen_location: place.map(str::to_string),
        category: Some(category.to_string()),
        date: "Oct 16, 2026".to_string(),
        image_uri: None,
        latitude: None,
        longitude: None,
        created_at: Utc::now(),
    }
}

pub fn found_record(owner: &str, name: &str, category: &str, place: Option<&str>) -> FoundItemRecord {
    FoundItemRecord {
        id: Uuid::new_v4(),
        owner_id: owner.to_string(),
        name: name.to_string(),
        description: None,
        location: place.map(str::to_string),
        category: Some(category.to_string()),
        date: "Oct 16, 2026".to_string(),
        image_uri: None,
        latitude: None,
        longitude: None,
        created_at: Utc::now(),
    }
}

/// Read-only store that counts fetches and returns its found records
/// verbatim, ignoring the owner exclusion, so callers must filter themselves.
#[derive(Default)]
pub struct CountingStore {
    pub lost: Vec<LostItemRecord>,
    pub found: Vec<FoundItemRecord>,
    pub fail_lost: bool,
    pub fail_found: bool,
    pub lost_calls: AtomicUsize,
    pub found_calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(lost: Vec<LostItemRecord>, found: Vec<FoundItemRecord>) -> Self {
        Self {
            lost,
            found,
            ..Default::default()
        }
    }

    pub fn lost_calls(&self) -> usize {
        self.lost_calls.load(Ordering::SeqCst)
    }

    pub fn found_calls(&self) -> usize {
        self.found_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemStore for CountingStore {
    async fn fetch_lost_items(&self, owner_id: &str) -> Result<Vec<LostItemRecord>, StoreError> {
        self.lost_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lost {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(self
            .lost
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn fetch_found_items(
        &self,
        _excluding_owner_id: &str,
    ) -> Result<Vec<FoundItemRecord>, StoreError> {
        self.found_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_found {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        Ok(self.found.clone())
    }

    async fn fetch_owned_found_items(
        &self,
        owner_id: &str,
    ) -> Result<Vec<FoundItemRecord>, StoreError> {
        Ok(self
            .found
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert_item(
        &self,
        _kind: ItemKind,
        _owner_id: &str,
        _report: &ValidatedReport,
    ) -> Result<Uuid, StoreError> {
        Err(StoreError::Unavailable("read-only store".to_string()))
    }

    async fn delete_item(
        &self,
        _kind: ItemKind,
        _item_id: Uuid,
        _owner_id: &str,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read-only store".to_string()))
    }
}
