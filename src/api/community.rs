//! Community ratings widget endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::models::{CommunityGame, VoteRequest};
use crate::AppState;

/// GET /api/community/games - List the games open for voting.
pub async fn list_games(State(state): State<AppState>) -> ApiResult<Vec<CommunityGame>> {
    let revision_id = state.repo.get_revision_id().await;
    success(state.repo.list_games().await, revision_id)
}

/// POST /api/community/games/:id/vote - Cast a star vote.
pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VoteRequest>,
) -> ApiResult<CommunityGame> {
    let revision_id = state.repo.get_revision_id().await;

    match state.repo.cast_vote(&id, request.stars).await {
        Ok(game) => {
            tracing::debug!("Vote of {} stars on game {}", request.stars, id);
            success(game, revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}
