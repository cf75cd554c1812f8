use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::matching::handlers::UserIdQuery;
use crate::models::item::{
    Category, FoundItemRecord, ItemKind, LostItemRecord, NewFoundItem, NewLostItem,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReportLostRequest {
    pub user_id: String,
    pub item: NewLostItem,
}

#[derive(Deserialize)]
pub struct ReportFoundRequest {
    pub user_id: String,
    pub item: NewFoundItem,
}

#[derive(Deserialize)]
pub struct FoundItemsQuery {
    pub user_id: String,
    /// Case-insensitive search over name, location and category label.
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Serialize)]
pub struct UserStatsResponse {
    pub lost_count: usize,
    pub found_count: usize,
    pub match_count: usize,
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: Category,
    pub label: &'static str,
}

fn require_user(user_id: &str) -> Result<&str, AppError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::Validation("user_id is required".to_string()));
    }
    Ok(user_id)
}

/// POST /api/v1/items/lost
pub async fn handle_report_lost(
    State(state): State<AppState>,
    AppJson(req): AppJson<ReportLostRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let user_id = require_user(&req.user_id)?;
    let report = req.item.validate(Utc::now()).map_err(AppError::Validation)?;
    let id = state.store.insert_item(ItemKind::Lost, user_id, &report).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// POST /api/v1/items/found
pub async fn handle_report_found(
    State(state): State<AppState>,
    AppJson(req): AppJson<ReportFoundRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let user_id = require_user(&req.user_id)?;
    let report = req.item.validate(Utc::now()).map_err(AppError::Validation)?;
    let id = state.store.insert_item(ItemKind::Found, user_id, &report).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/v1/items/lost
pub async fn handle_list_lost(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<Vec<LostItemRecord>>, AppError> {
    let user_id = require_user(&params.user_id)?;
    Ok(Json(state.store.fetch_lost_items(user_id).await?))
}

fn matches_search(record: &FoundItemRecord, needle: &str) -> bool {
    let category = record
        .category
        .as_deref()
        .and_then(|c| c.parse::<Category>().ok())
        .map_or("Unknown", Category::label);

    record.name.to_lowercase().contains(needle)
        || record
            .location
            .as_deref()
            .is_some_and(|l| l.to_lowercase().contains(needle))
        || category.to_lowercase().contains(needle)
}

/// GET /api/v1/items/found
pub async fn handle_list_found(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<FoundItemsQuery>,
) -> Result<Json<Vec<FoundItemRecord>>, AppError> {
    let user_id = require_user(&params.user_id)?;
    let mut records = state.store.fetch_owned_found_items(user_id).await?;

    if let Some(needle) = params
        .q
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
    {
        records.retain(|r| matches_search(r, &needle));
    }
    Ok(Json(records))
}

/// DELETE /api/v1/items/:kind/:id
pub async fn handle_delete_item(
    State(state): State<AppState>,
    AppPath((kind, id)): AppPath<(ItemKind, Uuid)>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let user_id = require_user(&params.user_id)?;
    state.store.delete_item(kind, id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/stats
pub async fn handle_user_stats(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<UserStatsResponse>, AppError> {
    let user_id = require_user(&params.user_id)?;

    let lost = async { Ok::<_, AppError>(state.store.fetch_lost_items(user_id).await?.len()) };
    let found =
        async { Ok::<_, AppError>(state.store.fetch_owned_found_items(user_id).await?.len()) };
    let matches = async { Ok::<_, AppError>(state.matcher.count_matches(user_id).await?) };

    let (lost_count, found_count, match_count) = tokio::try_join!(lost, found, matches)?;
    Ok(Json(UserStatsResponse {
        lost_count,
        found_count,
        match_count,
    }))
}

/// GET /api/v1/categories
pub async fn handle_list_categories() -> Json<Vec<CategoryResponse>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|id| CategoryResponse {
                id,
                label: id.label(),
            })
            .collect(),
    )
}
