use axum::{
    Extension,
    extract::Query,
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    api::session::session_cookie,
    error::{PodcastError, Result},
    server::AppState,
    success, utils, warning,
};

/// Where the browser lands after a successful login.
pub const HOME_PATH: &str = "/home";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Starts a login: remembers a PKCE verifier under a fresh `state` and sends
/// the browser to the Spotify authorize page.
pub async fn login(Extension(app): Extension<AppState>) -> Result<Redirect> {
    let (state, verifier) = app.sessions.begin_login();
    let challenge = utils::generate_code_challenge(&verifier);
    let url = app.auth.authorize_url(&state, &challenge)?;

    Ok(Redirect::to(&url))
}

/// Completes a login started by [`login`].
///
/// The code is exchanged for a token, the user's profile is fetched and a
/// session cookie is set before redirecting to [`HOME_PATH`].
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(app): Extension<AppState>,
) -> Result<Response> {
    if let Some(error) = params.error {
        warning!("Login refused by provider: {}", error);
        return Err(PodcastError::Unauthenticated);
    }

    let (Some(code), Some(state)) = (params.code, params.state) else {
        return Err(PodcastError::Unauthenticated);
    };

    let Some(pending) = app.sessions.complete_login(&state) else {
        warning!("Callback with unknown or expired login state");
        return Err(PodcastError::Unauthenticated);
    };

    let token = match app.auth.exchange_code(&code, &pending.code_verifier).await {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Err(e);
        }
    };

    let principal = app.profiles.current_user(&token.access_token).await?;
    success!("Signed in {}", principal.id);

    let session_id = app.sessions.create(token, principal);
    Ok((
        [(header::SET_COOKIE, session_cookie(&session_id))],
        Redirect::to(HOME_PATH),
    )
        .into_response())
}
