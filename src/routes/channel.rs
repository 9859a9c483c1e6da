use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::services::game_service;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/highscore", get(get_highscore))
        .route("/channel/:channel", get(get_channel_state))
        .with_state(state)
}

async fn get_highscore(State(state): State<AppState>) -> impl IntoResponse {
    Json(game_service::get_highscore(&state))
}

async fn get_channel_state(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> impl IntoResponse {
    Json(game_service::get_snapshot(&state, &channel).await)
}
