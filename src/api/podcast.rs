use axum::{Extension, Json, http::HeaderMap};

use crate::{
    api::session::session_id,
    error::{PodcastError, Result},
    info,
    server::AppState,
    types::Podcast,
    warning,
};

/// Recommends a podcast based on the shows the signed-in user follows.
pub async fn recommend_podcast(
    headers: HeaderMap,
    Extension(app): Extension<AppState>,
) -> Result<Json<Podcast>> {
    let id = session_id(&headers).ok_or(PodcastError::Unauthenticated)?;
    let access_token = app.sessions.valid_access_token(&id, &app.auth).await?;

    match app.recommender.recommend_for_listener(&access_token).await {
        Ok(podcast) => {
            info!("Recommending '{}'", podcast.title);
            Ok(Json(podcast))
        }
        Err(e) => {
            warning!("Personal recommendation failed: {}", e);
            Err(e)
        }
    }
}

/// Recommends one of the best podcasts of the configured genre. No session
/// needed.
pub async fn random_podcast(Extension(app): Extension<AppState>) -> Result<Json<Podcast>> {
    match app.recommender.recommend_from_genre().await {
        Ok(podcast) => Ok(Json(podcast)),
        Err(e) => {
            warning!("Genre recommendation failed: {}", e);
            Err(e)
        }
    }
}
