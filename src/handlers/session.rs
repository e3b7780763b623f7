use std::sync::Arc;

use crate::{
    models::{error::Error, session::SessionLabel},
    utils::{presenter::present_session, state::AppState},
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub season: i32,
    pub event: String,
    pub session: SessionLabel,
}

pub async fn get_session_results(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResultsQuery>,
) -> Result<impl IntoResponse, Error> {
    let view = present_session(
        state.provider.as_ref(),
        &state.config,
        params.season,
        &params.event,
        params.session,
    )
    .await?;
    Ok((StatusCode::OK, Json(view)))
}
