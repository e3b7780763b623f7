use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::season::{get_events, get_seasons, get_sessions},
    utils::state::AppState,
};

pub fn season_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_seasons))
        .route("/{year}/events", get(get_events))
        .route("/{year}/events/{event}/sessions", get(get_sessions))
}
