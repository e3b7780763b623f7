use tracing::{info, instrument};

use crate::{
    models::{display::SessionView, error::PresenterError, session::{SessionLabel, SessionRef}},
    provider::ResultsProvider,
    utils::{
        config::Config,
        projection::{project, session_note},
        selector::{find_event, resolve_events, resolve_scheduled_time},
    },
};

pub const SCHEDULE_FORMAT: &str = "%a %-d %b %Y %H:%M:%S, %Z";

/// Runs selector resolution, retrieval and projection for one selection.
#[instrument(level = "info", skip(provider, config))]
pub async fn present_session(
    provider: &dyn ResultsProvider,
    config: &Config,
    year: i32,
    event_name: &str,
    label: SessionLabel,
) -> Result<SessionView, PresenterError> {
    let events = resolve_events(provider, config, year).await?;
    let event = find_event(&events, year, event_name)?;

    let session = SessionRef::new(year, event.name.clone(), label);
    let rows = provider.session_results(event, &session).await?;
    let scheduled_at = resolve_scheduled_time(event, label)?;

    let table = project(&rows, label);
    info!(rows = table.rows.len(), columns = table.columns.len(), "session projected");

    Ok(SessionView {
        heading: format!("{label} results for the {year} {}", event.name),
        scheduled_at: scheduled_at.format(SCHEDULE_FORMAT).to_string(),
        note: session_note(label),
        table,
    })
}
