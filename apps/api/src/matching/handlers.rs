use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::matching::ranker::{MatchCandidate, MatchReason};
use crate::models::item::{FoundItem, LostItem};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

/// One ranked match as returned to clients. Carries no finder contact data.
#[derive(Serialize)]
pub struct MatchResponse {
    pub lost_item: LostItem,
    pub found_item: FoundItem,
    pub score: f64,
    pub match_percent: u32,
    pub reasons: Vec<MatchReason>,
    pub reason: String,
}

impl From<MatchCandidate> for MatchResponse {
    fn from(candidate: MatchCandidate) -> Self {
        let match_percent = candidate.match_percent();
        let reason = candidate.reason();
        Self {
            lost_item: candidate.lost_item,
            found_item: candidate.found_item,
            score: candidate.score,
            match_percent,
            reasons: candidate.reasons,
            reason,
        }
    }
}

#[derive(Serialize)]
pub struct MatchCountResponse {
    pub count: usize,
}

/// GET /api/v1/matches
pub async fn handle_find_matches(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<Vec<MatchResponse>>, AppError> {
    let matches = state.matcher.find_matches(&params.user_id).await?;
    Ok(Json(matches.into_iter().map(MatchResponse::from).collect()))
}

/// GET /api/v1/matches/count
pub async fn handle_count_matches(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<MatchCountResponse>, AppError> {
    let count = state.matcher.count_matches(&params.user_id).await?;
    Ok(Json(MatchCountResponse { count }))
}
