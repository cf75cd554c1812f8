use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::item::{FoundItemRecord, ItemKind, LostItemRecord, ValidatedReport};
use crate::storage::{ItemStore, StoreError};

#[derive(Default)]
struct Collections {
    lost: Vec<LostItemRecord>,
    found: Vec<FoundItemRecord>,
}

/// Process-local item store. Reads clone a snapshot so no lock outlives a fetch.
#[derive(Default)]
pub struct InMemoryItemStore {
    inner: RwLock<Collections>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn fetch_lost_items(&self, owner_id: &str) -> Result<Vec<LostItemRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .lost
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn fetch_found_items(
        &self,
        excluding_owner_id: &str,
    ) -> Result<Vec<FoundItemRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .found
            .iter()
            .filter(|r| r.owner_id != excluding_owner_id)
            .cloned()
            .collect())
    }

    async fn fetch_owned_found_items(
        &self,
        owner_id: &str,
    ) -> Result<Vec<FoundItemRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .found
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert_item(
        &self,
        kind: ItemKind,
        owner_id: &str,
        report: &ValidatedReport,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let latitude = report.location_coords.map(|c| c.latitude);
        let longitude = report.location_coords.map(|c| c.longitude);
        let mut inner = self.inner.write().await;

        match kind {
            ItemKind::Lost => inner.lost.push(LostItemRecord {
                id,
                owner_id: owner_id.to_string(),
                name: report.name.clone(),
                description: report.description.clone(),
                last_seen_location: report.place.clone(),
                category: Some(report.category.as_str().to_string()),
                date: report.date.clone(),
                image_uri: report.image_uri.clone(),
                latitude,
                longitude,
                created_at,
            }),
            ItemKind::Found => inner.found.push(FoundItemRecord {
                id,
                owner_id: owner_id.to_string(),
                name: report.name.clone(),
                description: report.description.clone(),
                location: report.place.clone(),
                category: Some(report.category.as_str().to_string()),
                date: report.date.clone(),
                image_uri: report.image_uri.clone(),
                latitude,
                longitude,
                created_at,
            }),
        }
        Ok(id)
    }

    async fn delete_item(
        &self,
        kind: ItemKind,
        item_id: Uuid,
        owner_id: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        let owner = match kind {
            ItemKind::Lost => inner.lost.iter().find(|r| r.id == item_id).map(|r| r.owner_id.clone()),
            ItemKind::Found => inner.found.iter().find(|r| r.id == item_id).map(|r| r.owner_id.clone()),
        };
        match owner {
            None => return Err(StoreError::NotFound(item_id)),
            Some(o) if o != owner_id => return Err(StoreError::NotOwner(item_id)),
            Some(_) => {}
        }

        match kind {
            ItemKind::Lost => inner.lost.retain(|r| r.id != item_id),
            ItemKind::Found => inner.found.retain(|r| r.id != item_id),
        }
        Ok(())
    }
}
