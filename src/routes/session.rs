use crate::{handlers::session::get_session_results, utils::state::AppState};
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new().route("/results", get(get_session_results))
}
