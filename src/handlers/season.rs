use std::sync::Arc;

use crate::{
    models::{error::Error, race::EventSummary},
    utils::{
        selector::{find_event, resolve_events, session_summaries, supported_seasons},
        state::AppState,
    },
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use http::StatusCode;
use serde_json::json;
use tracing::debug;

pub async fn get_seasons(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let seasons = supported_seasons(&state.config);
    (StatusCode::OK, Json(json!({ "seasons": seasons }))).into_response()
}

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let events = resolve_events(state.provider.as_ref(), &state.config, year).await?;
    debug!(year, events = events.len(), "season resolved");
    let events: Vec<EventSummary> = events.iter().map(EventSummary::from).collect();
    Ok((StatusCode::OK, Json(json!({ "events": events }))))
}

pub async fn get_sessions(
    State(state): State<Arc<AppState>>,
    Path((year, event_name)): Path<(i32, String)>,
) -> Result<impl IntoResponse, Error> {
    let events = resolve_events(state.provider.as_ref(), &state.config, year).await?;
    let event = find_event(&events, year, &event_name)?;
    let sessions = session_summaries(event);
    Ok((
        StatusCode::OK,
        Json(json!({ "format": event.format, "sessions": sessions })),
    ))
}
