//! External motorsport data providers.
//!
//! [`LiveProvider`] answers schedule and classification lookups from the
//! Jolpica (Ergast-compatible) API, and falls back to OpenF1 for sessions
//! Ergast does not classify and for driver photos.

pub mod jolpica;
pub mod openf1;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde::de::DeserializeOwned;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, instrument, warn};

use crate::{
    models::{
        classification::ClassificationRow,
        race::Event,
        session::{SessionLabel, SessionRef},
    },
    utils::{config::Config, rate_limiter::RateLimiter},
};

use self::{jolpica::JolpicaClient, openf1::OpenF1Client};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    #[snafu(display("Field not found: {field}"))]
    LookupMiss { field: String },
    #[snafu(display("Request to {url} failed"))]
    Request { url: String, source: reqwest::Error },
    #[snafu(display("Could not decode response from {url}"))]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl ProviderError {
    pub fn lookup_miss(field: impl Into<String>) -> Self {
        ProviderError::LookupMiss {
            field: field.into(),
        }
    }
}

#[async_trait]
pub trait ResultsProvider: Send + Sync {
    /// Ordered event calendar of a season.
    async fn season_schedule(&self, year: i32) -> Result<Vec<Event>, ProviderError>;

    /// Classification of one session, in session order. `event` is the
    /// calendar entry already resolved for `session`.
    async fn session_results(
        &self,
        event: &Event,
        session: &SessionRef,
    ) -> Result<Vec<ClassificationRow>, ProviderError>;
}

pub struct LiveProvider {
    jolpica: JolpicaClient,
    openf1: OpenF1Client,
}

impl LiveProvider {
    pub fn new(config: &Config, http_client: Client) -> Self {
        Self {
            jolpica: JolpicaClient::new(http_client.clone(), &config.jolpica_base_url),
            openf1: OpenF1Client::new(http_client, &config.openf1_base_url),
        }
    }
}

#[async_trait]
impl ResultsProvider for LiveProvider {
    async fn season_schedule(&self, year: i32) -> Result<Vec<Event>, ProviderError> {
        self.jolpica.season_schedule(year).await
    }

    #[instrument(
        level = "info",
        skip(self, event, session),
        fields(year = session.year, event = %session.event_name, label = %session.label)
    )]
    async fn session_results(
        &self,
        event: &Event,
        session: &SessionRef,
    ) -> Result<Vec<ClassificationRow>, ProviderError> {
        let scheduled_at = event
            .slot_for(session.label)
            .and_then(|slot| slot.scheduled_at)
            .ok_or_else(|| ProviderError::lookup_miss(format!("{}Date", session.label)))?;

        let mut rows = match session.label {
            SessionLabel::Race => self.jolpica.race_results(session.year, event.round).await?,
            SessionLabel::Sprint => {
                self.jolpica
                    .sprint_results(session.year, event.round)
                    .await?
            }
            SessionLabel::Qualifying => {
                self.jolpica
                    .qualifying_results(session.year, event.round)
                    .await?
            }
            SessionLabel::Practice1
            | SessionLabel::Practice2
            | SessionLabel::Practice3
            | SessionLabel::SprintShootout
            | SessionLabel::SprintQualifying => {
                let session_key = self
                    .openf1
                    .find_session_key(session.year, session.label, scheduled_at)
                    .await?;
                return self.openf1.session_results(session_key).await;
            }
        };

        // Photos are optional for Ergast classifications; OpenF1 does not
        // cover every season.
        let headshots = match self
            .openf1
            .find_session_key(session.year, session.label, scheduled_at)
            .await
        {
            Ok(session_key) => self.openf1.headshots(session_key).await,
            Err(err) => Err(err),
        };
        match headshots {
            Ok(headshots) => {
                for row in rows.iter_mut() {
                    row.headshot_url = headshots.get(&row.driver_number).cloned();
                }
            }
            Err(err) => warn!(error = %err, "driver photos unavailable"),
        }

        info!(rows = rows.len(), "session classification loaded");
        Ok(rows)
    }
}

/// GET `url` with `query` through `limiter` and decode the JSON body. A 404
/// from the provider means the requested data does not exist yet.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    limiter: &RateLimiter,
    url: String,
    query: &[(&str, String)],
) -> Result<T, ProviderError> {
    let _permit = limiter.acquire().await;
    debug!(%url, ?query, "provider request");
    let res = client
        .get(&url)
        .query(query)
        .send()
        .await
        .context(RequestSnafu { url: &url })?;
    if res.status() == StatusCode::NOT_FOUND {
        return Err(ProviderError::lookup_miss(url));
    }
    let body = res
        .error_for_status()
        .context(RequestSnafu { url: &url })?
        .text()
        .await
        .context(RequestSnafu { url: &url })?;
    serde_json::from_str(&body).context(DecodeSnafu { url })
}
