//! # API Module
//!
//! HTTP endpoints of the podcast sampler server.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /` and `GET /login`, redirects to the Spotify authorize
//!   page using the authorization code flow with PKCE.
//! - [`callback`] - `GET /callback`, exchanges the code for a token, opens a
//!   session and redirects to `/home`.
//! - [`me`] - `GET /api/me`, the signed-in user, `401` without session.
//! - [`logout`] - `GET /api/logout`, ends the session, always `204`.
//!
//! ### Recommendations
//!
//! - [`recommend_podcast`] - `GET /api/recommend_podcast`, personal
//!   recommendation, `401` without session.
//! - [`random_podcast`] - `GET /api/random_podcast`, best-of-genre
//!   recommendation, open to everyone.
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, status and version.
//! - [`home`] - `GET /home`, landing page after login.
//!
//! ## Errors
//!
//! Handlers return [`crate::error::PodcastError`] which renders as
//! `{"error": "..."}` with the matching status code.
//!
//! ## Sessions
//!
//! Sessions are identified by the `SESSION` cookie and kept in
//! [`crate::management::SessionStore`].

mod callback;
mod health;
mod podcast;
mod session;

pub use callback::{HOME_PATH, callback, login};
pub use health::{health, home};
pub use podcast::{random_podcast, recommend_podcast};
pub use session::{SESSION_COOKIE, logout, me, session_cookie, session_id};
