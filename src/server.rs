use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};

use crate::{
    api,
    config::Settings,
    error::{PodcastError, Result},
    listennotes::{CachedCatalog, ListenNotesClient},
    management::SessionStore,
    recommend::Recommender,
    spotify::{CachedLibrary, SpotifyAuth, SpotifyClient},
    success,
};

/// Shared state of every request handler.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub sessions: SessionStore,
    pub auth: SpotifyAuth,
    pub profiles: SpotifyClient,
}

impl AppState {
    /// Wires the real Listen Notes and Spotify clients, each behind its
    /// result cache.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = settings.http_client()?;

        let catalog = ListenNotesClient::new(
            http.clone(),
            &settings.catalog.api_url,
            &settings.catalog.api_key,
        );
        let profiles = SpotifyClient::new(http.clone(), &settings.spotify.api_url);

        let recommender = Recommender::new(
            Arc::new(CachedCatalog::new(Arc::new(catalog))),
            Arc::new(CachedLibrary::new(Arc::new(profiles.clone()))),
            settings.recommend.clone(),
        );

        Ok(AppState {
            recommender: Arc::new(recommender),
            sessions: SessionStore::with_idle_timeout(settings.session_idle_timeout),
            auth: SpotifyAuth::new(http, settings.spotify.clone()),
            profiles,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::login))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route(api::HOME_PATH, get(api::home))
        .route("/health", get(api::health))
        .route("/api/me", get(api::me))
        .route("/api/logout", get(api::logout))
        .route("/api/recommend_podcast", get(api::recommend_podcast))
        .route("/api/random_podcast", get(api::random_podcast))
        .layer(Extension(state))
}

pub async fn start_api_server(settings: Settings) -> Result<()> {
    let addr = SocketAddr::from_str(&settings.server_address).map_err(|e| {
        PodcastError::Config(format!(
            "invalid SERVER_ADDRESS '{}': {}",
            settings.server_address, e
        ))
    })?;

    let app = router(AppState::from_settings(&settings)?);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PodcastError::Config(format!("cannot bind {}: {}", addr, e)))?;
    success!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| PodcastError::Config(format!("server stopped: {}", e)))
}
