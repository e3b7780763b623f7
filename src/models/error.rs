use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;
use snafu::Snafu;
use tracing::{error, warn};

use crate::provider::ProviderError;

pub const NOT_AVAILABLE: &str = "Information is not available yet or does not exist.";

#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Value>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(json!({"message": message})),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.body.0["message"].as_str()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

/// Failures of the selector → retrieval → projection pipeline.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PresenterError {
    #[snafu(display("Season {year} is not supported"))]
    UnsupportedSeason { year: i32 },
    #[snafu(display("No event named {name:?} in season {year}"))]
    UnknownEvent { year: i32, name: String },
    #[snafu(display("Malformed selection: {reason}"))]
    MalformedSelection { reason: String },
    #[snafu(display("Provider failure"))]
    Provider { source: ProviderError },
}

impl From<ProviderError> for PresenterError {
    fn from(source: ProviderError) -> Self {
        PresenterError::Provider { source }
    }
}

impl From<PresenterError> for Error {
    fn from(err: PresenterError) -> Self {
        match &err {
            PresenterError::UnsupportedSeason { year } => {
                warn!(year, "rejected unsupported season");
                Self::new(StatusCode::BAD_REQUEST, "Unsupported season")
            }
            PresenterError::UnknownEvent { .. } => {
                warn!(error = %err, "event lookup missed");
                Self::new(StatusCode::NOT_FOUND, NOT_AVAILABLE)
            }
            PresenterError::MalformedSelection { reason } => {
                warn!(%reason, "malformed session selection");
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, NOT_AVAILABLE)
            }
            PresenterError::Provider { source } => match source {
                ProviderError::LookupMiss { field } => {
                    warn!(%field, "provider lookup missed");
                    Self::new(StatusCode::NOT_FOUND, NOT_AVAILABLE)
                }
                other => {
                    error!(error = ?other, "provider request failed");
                    Self::new(StatusCode::BAD_GATEWAY, NOT_AVAILABLE)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_miss_becomes_not_available_banner() {
        let err: Error = PresenterError::from(ProviderError::LookupMiss {
            field: "Results".to_string(),
        })
        .into();
        assert_eq!(err.code, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), Some(NOT_AVAILABLE));
    }

    #[test]
    fn malformed_selection_shares_the_banner() {
        let err: Error = PresenterError::MalformedSelection {
            reason: "no slot".to_string(),
        }
        .into();
        assert_eq!(err.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message(), Some(NOT_AVAILABLE));
    }

    #[test]
    fn unsupported_season_is_a_bad_request() {
        let err: Error = PresenterError::UnsupportedSeason { year: 1999 }.into();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), Some("Unsupported season"));
    }
}
