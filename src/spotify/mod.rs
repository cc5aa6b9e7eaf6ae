//! # Spotify Integration Module
//!
//! This module is the integration layer between the podcast sampler and
//! Spotify. It covers the two things the recommender needs from Spotify:
//! signing a user in, and reading the shows that user follows.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers (login, callback, recommend)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code + PKCE, refresh)
//!     └── Library (saved shows, current profile)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts service / Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - builds the authorize URL, exchanges the callback code for a
//!   token and refreshes expiring tokens.
//! - [`shows`] - lists the saved shows of the signed-in user and returns the
//!   user's profile for `/api/me`.
//!
//! ## Library Seam
//!
//! The recommender never talks to [`shows::SpotifyClient`] directly. It depends
//! on the [`Library`] trait so that tests can plug in a stub and so that
//! [`CachedLibrary`] can sit in front of the real client.
//!
//! ## API Coverage
//!
//! - `GET /me/shows` - saved shows, paginated through `next`
//! - `GET /me` - current user's profile
//! - `POST /api/token` - code exchange and refresh
//!
//! ## Error Types
//!
//! Every function returns [`crate::error::Result`]. A `401` from Spotify maps
//! to [`crate::error::PodcastError::Unauthenticated`]; every other failure maps
//! to [`crate::error::PodcastError::UpstreamUnavailable`]. Nothing is retried.

pub mod auth;
pub mod shows;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{error::Result, management::ResultCache, types::Show};

pub use auth::SpotifyAuth;
pub use shows::SpotifyClient;

/// Source of the shows a listener follows.
#[async_trait]
pub trait Library: Send + Sync {
    async fn followed_shows(&self, access_token: &str) -> Result<Vec<Show>>;
}

/// [`Library`] decorator caching the followed shows per access token.
pub struct CachedLibrary {
    inner: Arc<dyn Library>,
    shows: ResultCache<Vec<Show>>,
}

impl CachedLibrary {
    pub fn new(inner: Arc<dyn Library>) -> Self {
        Self {
            inner,
            shows: ResultCache::new("spotify-shows"),
        }
    }
}

#[async_trait]
impl Library for CachedLibrary {
    async fn followed_shows(&self, access_token: &str) -> Result<Vec<Show>> {
        self.shows
            .get_or_try_insert_with(access_token, || self.inner.followed_shows(access_token))
            .await
    }
}
