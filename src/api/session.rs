use axum::{
    Extension, Json,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    error::{PodcastError, Result},
    server::AppState,
    types::Principal,
};

pub const SESSION_COOKIE: &str = "SESSION";

pub fn session_cookie(session_id: &str) -> String {
    format!(
        "{name}={value}; Path=/; HttpOnly; SameSite=Lax",
        name = SESSION_COOKIE,
        value = session_id
    )
}

fn expired_session_cookie() -> String {
    format!(
        "{name}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        name = SESSION_COOKIE
    )
}

/// Reads the session id from the `Cookie` headers of a request.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Returns the signed-in user.
pub async fn me(
    headers: HeaderMap,
    Extension(app): Extension<AppState>,
) -> Result<Json<Principal>> {
    let session = session_id(&headers)
        .and_then(|id| app.sessions.get(&id))
        .ok_or(PodcastError::Unauthenticated)?;

    Ok(Json(session.principal))
}

/// Ends the current session, if any, and clears the cookie.
pub async fn logout(headers: HeaderMap, Extension(app): Extension<AppState>) -> Response {
    if let Some(id) = session_id(&headers) {
        app.sessions.remove(&id);
    }

    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, expired_session_cookie())],
    )
        .into_response()
}
