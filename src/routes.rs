use crate::state::AppState;
use axum::Router;

mod channel;
mod ws;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .nest("/api", channel::routes(state.clone()))
        .nest("/ws", ws::routes(state.clone()))
}
