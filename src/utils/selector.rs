//! Season → event → session resolution.

use chrono::{DateTime, Utc};

use crate::{
    models::{
        error::PresenterError,
        race::{Event, SessionSummary},
        session::SessionLabel,
    },
    provider::ResultsProvider,
    utils::config::Config,
};

pub fn supported_seasons(config: &Config) -> &[i32] {
    &config.seasons
}

pub fn ensure_supported(config: &Config, year: i32) -> Result<(), PresenterError> {
    if supported_seasons(config).contains(&year) {
        Ok(())
    } else {
        Err(PresenterError::UnsupportedSeason { year })
    }
}

pub async fn resolve_events(
    provider: &dyn ResultsProvider,
    config: &Config,
    year: i32,
) -> Result<Vec<Event>, PresenterError> {
    ensure_supported(config, year)?;
    Ok(provider.season_schedule(year).await?)
}

pub fn find_event<'a>(events: &'a [Event], year: i32, name: &str) -> Result<&'a Event, PresenterError> {
    events
        .iter()
        .find(|event| event.name == name)
        .ok_or_else(|| PresenterError::UnknownEvent {
            year,
            name: name.to_string(),
        })
}

pub fn session_summaries(event: &Event) -> Vec<SessionSummary> {
    event
        .session_labels()
        .into_iter()
        .zip(event.session_times())
        .map(|(label, scheduled_at)| SessionSummary {
            label,
            scheduled_at,
        })
        .collect()
}

/// Pairs `label` with its scheduled time through the event format's fixed
/// slot order.
pub fn resolve_scheduled_time(
    event: &Event,
    label: SessionLabel,
) -> Result<DateTime<Utc>, PresenterError> {
    let index = event
        .format
        .slot_order()
        .iter()
        .position(|slot| *slot == label)
        .ok_or_else(|| PresenterError::MalformedSelection {
            reason: format!("{label} has no slot in a {:?} weekend", event.format),
        })?;
    event
        .session_times()
        .get(index)
        .copied()
        .ok_or_else(|| PresenterError::MalformedSelection {
            reason: format!("{} has no time for slot {index} ({label})", event.name),
        })
}
