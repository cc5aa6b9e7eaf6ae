//! Configuration management for the podcast sampler.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including the Listen Notes API key, Spotify OAuth credentials,
//! server settings, and the fixed genre used by the non-personalized variant.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{
    error::{PodcastError, Result},
    management::session::DEFAULT_SESSION_IDLE_SECS,
    utils::DEFAULT_MIN_TAIL_SECS,
};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_LISTENNOTES_API_URL: &str = "https://listen-api.listennotes.com/api/v2";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_SCOPE: &str = "user-library-read user-read-private";
pub const DEFAULT_GENRE_ID: u32 = 68;
pub const DEFAULT_REGION: &str = "gb";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `podsampler/.env`. This allows users to store
/// the API key and OAuth credentials without hardcoding them.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/podsampler/.env`
/// - macOS: `~/Library/Application Support/podsampler/.env`
/// - Windows: `%LOCALAPPDATA%/podsampler/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file cannot be read or parsed
///
/// Variables already present in the process environment are never overwritten.
pub async fn load_env() -> std::result::Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("podsampler/.env");
    path
}

/// Listen Notes API settings.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub api_url: String,
    pub api_key: String,
}

/// Spotify OAuth and Web API settings.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
}

/// Settings of the genre based variant and of the preview calculation.
#[derive(Debug, Clone)]
pub struct RecommendSettings {
    pub genre_id: u32,
    pub region: String,
    pub min_tail_secs: u32,
}

/// All runtime configuration of the server.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_address: String,
    pub http_timeout: Duration,
    pub session_idle_timeout: Duration,
    pub catalog: CatalogSettings,
    pub spotify: SpotifySettings,
    pub recommend: RecommendSettings,
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// # Variables
    ///
    /// | Variable | Required | Default |
    /// |---|---|---|
    /// | `SERVER_ADDRESS` | no | `127.0.0.1:8080` |
    /// | `HTTP_TIMEOUT_SECS` | no | `10` |
    /// | `SESSION_IDLE_TIMEOUT_SECS` | no | `1800` |
    /// | `LISTENNOTES_API_KEY` | yes | |
    /// | `LISTENNOTES_API_URL` | no | Listen Notes v2 |
    /// | `SPOTIFY_API_AUTH_CLIENT_ID` | yes | |
    /// | `SPOTIFY_API_AUTH_CLIENT_SECRET` | no | |
    /// | `SPOTIFY_API_REDIRECT_URI` | yes | |
    /// | `SPOTIFY_API_AUTH_SCOPE` | no | `user-library-read user-read-private` |
    /// | `SPOTIFY_API_AUTH_URL` | no | Spotify accounts |
    /// | `SPOTIFY_API_TOKEN_URL` | no | Spotify accounts |
    /// | `SPOTIFY_API_URL` | no | Spotify Web API v1 |
    /// | `PODCAST_GENRE_ID` | no | `68` |
    /// | `PODCAST_REGION` | no | `gb` |
    /// | `PREVIEW_MIN_TAIL_SECS` | no | `45` |
    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            server_address: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            http_timeout: http_timeout_from_env()?,
            session_idle_timeout: Duration::from_secs(parsed(
                "SESSION_IDLE_TIMEOUT_SECS",
                DEFAULT_SESSION_IDLE_SECS,
            )?),
            catalog: CatalogSettings::from_env()?,
            spotify: SpotifySettings::from_env()?,
            recommend: RecommendSettings::from_env()?,
        })
    }

    /// Builds the HTTP client shared by the Listen Notes and Spotify clients.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        http_client(self.http_timeout)
    }
}

impl CatalogSettings {
    pub fn from_env() -> Result<Self> {
        Ok(CatalogSettings {
            api_url: optional("LISTENNOTES_API_URL", DEFAULT_LISTENNOTES_API_URL),
            api_key: required("LISTENNOTES_API_KEY")?,
        })
    }
}

impl SpotifySettings {
    pub fn from_env() -> Result<Self> {
        Ok(SpotifySettings {
            api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: env::var("SPOTIFY_API_AUTH_CLIENT_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE),
        })
    }
}

impl RecommendSettings {
    pub fn from_env() -> Result<Self> {
        Ok(RecommendSettings {
            genre_id: parsed("PODCAST_GENRE_ID", DEFAULT_GENRE_ID)?,
            region: optional("PODCAST_REGION", DEFAULT_REGION),
            min_tail_secs: parsed("PREVIEW_MIN_TAIL_SECS", DEFAULT_MIN_TAIL_SECS)?,
        })
    }
}

impl Default for RecommendSettings {
    fn default() -> Self {
        RecommendSettings {
            genre_id: DEFAULT_GENRE_ID,
            region: DEFAULT_REGION.to_string(),
            min_tail_secs: DEFAULT_MIN_TAIL_SECS,
        }
    }
}

pub fn http_timeout_from_env() -> Result<Duration> {
    Ok(Duration::from_secs(parsed(
        "HTTP_TIMEOUT_SECS",
        DEFAULT_HTTP_TIMEOUT_SECS,
    )?))
}

/// Builds a reqwest client with an explicit request timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PodcastError::Config(format!("cannot build HTTP client: {}", e)))
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(PodcastError::Config(format!("{} must be set", name))),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| PodcastError::Config(format!("{} has an invalid value '{}'", name, value))),
        _ => Ok(default),
    }
}

