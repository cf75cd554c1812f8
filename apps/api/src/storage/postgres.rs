use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::item::{FoundItemRecord, ItemKind, LostItemRecord, ValidatedReport};
use crate::storage::{ItemStore, StoreError};

/// Postgres-backed item store over the `lost_items` / `found_items` tables.
#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn fetch_lost_items(&self, owner_id: &str) -> Result<Vec<LostItemRecord>, StoreError> {
        let rows: Vec<LostItemRecord> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, description, last_seen_location, category,
                   date, image_uri, latitude, longitude, created_at
            FROM lost_items
            WHERE owner_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn fetch_found_items(
        &self,
        excluding_owner_id: &str,
    ) -> Result<Vec<FoundItemRecord>, StoreError> {
        let rows: Vec<FoundItemRecord> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, description, location, category,
                   date, image_uri, latitude, longitude, created_at
            FROM found_items
            WHERE owner_id <> $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(excluding_owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn fetch_owned_found_items(
        &self,
        owner_id: &str,
    ) -> Result<Vec<FoundItemRecord>, StoreError> {
        let rows: Vec<FoundItemRecord> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, description, location, category,
                   date, image_uri, latitude, longitude, created_at
            FROM found_items
            WHERE owner_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_item(
        &self,
        kind: ItemKind,
        owner_id: &str,
        report: &ValidatedReport,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        // Lost items keep the place in `last_seen_location`, found items in `location`.
        let place_column = match kind {
            ItemKind::Lost => "last_seen_location",
            ItemKind::Found => "location",
        };
        let sql = format!(
            "INSERT INTO {} (id, owner_id, name, description, {place_column}, category, \
             date, image_uri, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            kind.table()
        );

        sqlx::query(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(&report.name)
            .bind(&report.description)
            .bind(&report.place)
            .bind(report.category.as_str())
            .bind(&report.date)
            .bind(&report.image_uri)
            .bind(report.location_coords.map(|c| c.latitude))
            .bind(report.location_coords.map(|c| c.longitude))
            .execute(&self.pool)
            .await?;

        info!("Inserted {kind:?} item {id} for user {owner_id}");
        Ok(id)
    }

    async fn delete_item(
        &self,
        kind: ItemKind,
        item_id: Uuid,
        owner_id: &str,
    ) -> Result<(), StoreError> {
        let owner: Option<String> =
            sqlx::query_scalar(&format!("SELECT owner_id FROM {} WHERE id = $1", kind.table()))
                .bind(item_id)
                .fetch_optional(&self.pool)
                .await?;

        match owner {
            None => return Err(StoreError::NotFound(item_id)),
            Some(o) if o != owner_id => return Err(StoreError::NotOwner(item_id)),
            Some(_) => {}
        }

        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1 AND owner_id = $2",
            kind.table()
        ))
        .bind(item_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        ensure_deleted(result.rows_affected(), item_id)?;

        info!("Deleted {kind:?} item {item_id} for user {owner_id}");
        Ok(())
    }
}

/// A concurrent delete can remove the row between the owner check and the
/// DELETE; report that as not found rather than success.
fn ensure_deleted(rows_affected: u64, item_id: Uuid) -> Result<(), StoreError> {
    if rows_affected == 0 {
        return Err(StoreError::NotFound(item_id));
    }
    Ok(())
}
