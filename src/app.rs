use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/history", get(handlers::history))
        .route("/champions", get(handlers::champions))
        .route("/managers", get(handlers::managers))
        .route("/manager/:name", get(handlers::manager))
        .route("/tidbits", get(handlers::tidbits))
        .route("/records", get(handlers::records))
        .route("/matchups", get(handlers::matchups))
        .route("/legacy/dst/:team", get(handlers::legacy_dst))
        .route("/health", get(handlers::health))
        .with_state(state)
}
