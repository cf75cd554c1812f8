pub mod health;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::items::handlers as items;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/matches", get(matching::handle_find_matches))
        .route("/api/v1/matches/count", get(matching::handle_count_matches))
        // Item API
        .route(
            "/api/v1/items/lost",
            get(items::handle_list_lost).post(items::handle_report_lost),
        )
        .route(
            "/api/v1/items/found",
            get(items::handle_list_found).post(items::handle_report_found),
        )
        .route("/api/v1/items/:kind/:id", delete(items::handle_delete_item))
        .route("/api/v1/users/stats", get(items::handle_user_stats))
        .route("/api/v1/categories", get(items::handle_list_categories))
        .with_state(state)
}
