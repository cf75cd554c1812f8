//! Item storage: the collaborator the matcher reads lost and found items from.
//!
//! `AppState` holds an `Arc<dyn ItemStore>`, picked at startup via `ITEM_STORE`.
//! Reads return stored records as-is (no ordering guarantee callers may rely
//! on); validation into domain items happens in the match collector.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::item::{FoundItemRecord, ItemKind, LostItemRecord, ValidatedReport};

pub use memory::InMemoryItemStore;
pub use postgres::PgItemStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item storage unavailable: {0}")]
    Unavailable(String),

    #[error("item {0} not found")]
    NotFound(Uuid),

    #[error("item {0} belongs to another user")]
    NotOwner(Uuid),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All lost-item records owned by `owner_id`.
    async fn fetch_lost_items(&self, owner_id: &str) -> Result<Vec<LostItemRecord>, StoreError>;

    /// All found-item records NOT owned by `excluding_owner_id`.
    async fn fetch_found_items(
        &self,
        excluding_owner_id: &str,
    ) -> Result<Vec<FoundItemRecord>, StoreError>;

    /// Found-item records reported by `owner_id` themselves.
    async fn fetch_owned_found_items(
        &self,
        owner_id: &str,
    ) -> Result<Vec<FoundItemRecord>, StoreError>;

    async fn insert_item(
        &self,
        kind: ItemKind,
        owner_id: &str,
        report: &ValidatedReport,
    ) -> Result<Uuid, StoreError>;

    /// Deletes an item; only its owner may do so.
    async fn delete_item(
        &self,
        kind: ItemKind,
        item_id: Uuid,
        owner_id: &str,
    ) -> Result<(), StoreError>;
}
