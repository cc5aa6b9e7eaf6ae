use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    config::SpotifySettings,
    error::{PodcastError, Result},
    types::{Token, TokenResponse},
};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Spotify accounts service: authorization URL, code exchange and refresh.
#[derive(Clone)]
pub struct SpotifyAuth {
    http: Client,
    settings: SpotifySettings,
}

impl SpotifyAuth {
    pub fn new(http: Client, settings: SpotifySettings) -> Self {
        Self { http, settings }
    }

    /// Builds the URL the browser is redirected to when a login starts.
    ///
    /// Uses the authorization code flow with a PKCE S256 challenge. `state`
    /// comes back untouched on the callback and identifies the login attempt.
    pub fn authorize_url(&self, state: &str, code_challenge: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &self.settings.auth_url,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("code_challenge", code_challenge),
                ("code_challenge_method", "S256"),
                ("scope", self.settings.scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| PodcastError::Config(format!("invalid SPOTIFY_API_AUTH_URL: {}", e)))?;

        Ok(url.into())
    }

    /// Exchanges the authorization code received on the callback for a token.
    pub async fn exchange_code(&self, code: &str, verifier: &str) -> Result<Token> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.settings.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
        ];
        if let Some(secret) = &self.settings.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let res = self
            .http
            .post(&self.settings.token_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| match e.status() {
                Some(status) if status.is_client_error() => PodcastError::Unauthenticated,
                _ => PodcastError::from(e),
            })?;

        let token: TokenResponse = res.json().await?;
        Ok(into_token(token, None))
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// Spotify may omit the refresh token in the answer, in which case the
    /// previous one stays valid and is carried over.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token> {
        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.settings.client_id.as_str()),
        ];
        if let Some(secret) = &self.settings.client_secret {
            form.push(("client_secret", secret.as_str()));
        }

        let res = self
            .http
            .post(&self.settings.token_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| match e.status() {
                Some(status) if status.is_client_error() => PodcastError::Unauthenticated,
                _ => PodcastError::from(e),
            })?;

        let token: TokenResponse = res.json().await?;
        Ok(into_token(token, Some(refresh_token)))
    }
}

/// Tells whether `token` should be refreshed before use.
pub fn is_expired(token: &Token) -> bool {
    let now = Utc::now().timestamp() as u64;
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}

fn into_token(res: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token: res
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: res.scope,
        expires_in: res.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
