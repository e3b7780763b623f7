//! OpenF1 client: session keys, driver photos, and classifications of the
//! sessions Ergast does not publish (practice, sprint shootout).

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    models::{classification::ClassificationRow, session::SessionLabel},
    provider::{fetch_json, ProviderError},
    utils::{race_utils::map_session_name, rate_limiter::RateLimiter},
};

#[derive(Debug, Clone, Deserialize)]
pub struct OpenF1Session {
    pub session_key: i64,
    pub session_name: String,
    pub date_start: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenF1Driver {
    pub driver_number: u32,
    pub full_name: Option<String>,
    pub name_acronym: Option<String>,
    pub team_name: Option<String>,
    pub headshot_url: Option<String>,
}

/// Qualifying-style sessions report one duration per segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SessionDuration {
    Segments(Vec<Option<f64>>),
    Single(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenF1Result {
    pub position: Option<u32>,
    pub driver_number: u32,
    #[serde(default)]
    pub dnf: bool,
    #[serde(default)]
    pub dns: bool,
    #[serde(default)]
    pub dsq: bool,
    pub duration: Option<SessionDuration>,
}

pub struct OpenF1Client {
    http_client: Client,
    base_url: String,
    limiter: RateLimiter,
}

impl OpenF1Client {
    pub fn new(http_client: Client, base_url: &str) -> Self {
        OpenF1Client {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(1, 350),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn find_session_key(
        &self,
        year: i32,
        label: SessionLabel,
        scheduled_at: DateTime<Utc>,
    ) -> Result<i64, ProviderError> {
        let url = format!("{}/sessions", self.base_url);
        let query = [
            ("year", year.to_string()),
            ("session_name", label.as_str().to_string()),
        ];
        let sessions: Vec<OpenF1Session> =
            fetch_json(&self.http_client, &self.limiter, url, &query).await?;
        match_session(&sessions, label, scheduled_at)
            .ok_or_else(|| ProviderError::lookup_miss("SessionKey"))
    }

    pub async fn drivers(&self, session_key: i64) -> Result<Vec<OpenF1Driver>, ProviderError> {
        let url = format!("{}/drivers", self.base_url);
        let query = [("session_key", session_key.to_string())];
        fetch_json(&self.http_client, &self.limiter, url, &query).await
    }

    /// Driver number → photo URL.
    pub async fn headshots(&self, session_key: i64) -> Result<HashMap<String, String>, ProviderError> {
        let drivers = self.drivers(session_key).await?;
        Ok(drivers
            .into_iter()
            .filter_map(|driver| Some((driver.driver_number.to_string(), driver.headshot_url?)))
            .collect())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn session_results(
        &self,
        session_key: i64,
    ) -> Result<Vec<ClassificationRow>, ProviderError> {
        let url = format!("{}/session_result", self.base_url);
        let query = [("session_key", session_key.to_string())];
        let results: Vec<OpenF1Result> =
            fetch_json(&self.http_client, &self.limiter, url, &query).await?;
        if results.is_empty() {
            return Err(ProviderError::lookup_miss("session_result"));
        }
        let drivers = self.drivers(session_key).await?;
        debug!(results = results.len(), drivers = drivers.len(), "joining OpenF1 classification");
        Ok(classification_rows(results, &drivers))
    }
}

/// Picks the session of the right kind held on the scheduled day.
pub fn match_session(
    sessions: &[OpenF1Session],
    label: SessionLabel,
    scheduled_at: DateTime<Utc>,
) -> Option<i64> {
    sessions
        .iter()
        .filter(|session| map_session_name(&session.session_name) == Some(label))
        .find(|session| session.date_start.date_naive() == scheduled_at.date_naive())
        .map(|session| session.session_key)
}

fn seconds(value: Option<f64>) -> Option<TimeDelta> {
    TimeDelta::try_milliseconds((value? * 1000.0).round() as i64)
}

/// Joins results with the driver list; rows come out in classified order,
/// unclassified drivers last.
pub fn classification_rows(
    mut results: Vec<OpenF1Result>,
    drivers: &[OpenF1Driver],
) -> Vec<ClassificationRow> {
    results.sort_by_key(|result| (result.position.is_none(), result.position));
    let by_number: HashMap<u32, &OpenF1Driver> = drivers
        .iter()
        .map(|driver| (driver.driver_number, driver))
        .collect();

    results
        .into_iter()
        .map(|result| {
            let driver = by_number.get(&result.driver_number).copied();
            let (q1, q2, q3) = match &result.duration {
                Some(SessionDuration::Segments(segments)) => (
                    seconds(segments.first().copied().flatten()),
                    seconds(segments.get(1).copied().flatten()),
                    seconds(segments.get(2).copied().flatten()),
                ),
                _ => (None, None, None),
            };
            let status = if result.dsq {
                Some("Disqualified".to_string())
            } else if result.dns {
                Some("Did not start".to_string())
            } else if result.dnf {
                Some("Retired".to_string())
            } else {
                None
            };
            ClassificationRow {
                classified_position: result
                    .position
                    .map(|position| position.to_string())
                    .unwrap_or_default(),
                headshot_url: driver.and_then(|driver| driver.headshot_url.clone()),
                full_name: driver
                    .and_then(|driver| driver.full_name.clone())
                    .unwrap_or_default(),
                abbreviation: driver
                    .and_then(|driver| driver.name_acronym.clone())
                    .unwrap_or_default(),
                driver_number: result.driver_number.to_string(),
                team_name: driver
                    .and_then(|driver| driver.team_name.clone())
                    .unwrap_or_default(),
                grid_position: None,
                q1,
                q2,
                q3,
                time: None,
                status,
                points: None,
            }
        })
        .collect()
}
