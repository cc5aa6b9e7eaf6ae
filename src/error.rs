//! Error type shared by the API clients, the recommender and the HTTP layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Result alias for every fallible podcast operation.
pub type Result<T> = std::result::Result<T, PodcastError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PodcastError {
    /// Listen Notes or Spotify could not be reached or answered with an error.
    #[error("upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The candidate pool was empty after looking up every followed show.
    #[error("no podcast recommendation available")]
    NoRecommendation,

    /// A podcast without a catalog id reached the detail lookup.
    #[error("podcast '{0}' has no catalog id")]
    UnknownCatalogId(String),

    /// No valid session or access token.
    #[error("authentication required")]
    Unauthenticated,

    #[error("configuration error: {0}")]
    Config(String),
}

impl PodcastError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PodcastError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            PodcastError::NoRecommendation => StatusCode::NOT_FOUND,
            PodcastError::Unauthenticated => StatusCode::UNAUTHORIZED,
            PodcastError::UnknownCatalogId(_) | PodcastError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for PodcastError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(StatusCode::UNAUTHORIZED) => PodcastError::Unauthenticated,
            _ => PodcastError::UpstreamUnavailable(err.to_string()),
        }
    }
}

impl IntoResponse for PodcastError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
