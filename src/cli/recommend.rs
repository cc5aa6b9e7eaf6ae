use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::{self, CatalogSettings, RecommendSettings},
    error, info,
    listennotes::ListenNotesClient,
    recommend::Recommender,
    types::{Podcast, PodcastTableRow},
};

/// Prints one recommendation from the best podcasts of a genre.
///
/// Uses the configured genre and region unless overridden. No Spotify login
/// is involved.
pub async fn recommend(genre_id: Option<u32>, region: Option<String>) {
    let (catalog, settings, timeout) = match (
        CatalogSettings::from_env(),
        RecommendSettings::from_env(),
        config::http_timeout_from_env(),
    ) {
        (Ok(c), Ok(r), Ok(t)) => (c, r, t),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            error!("Cannot read configuration. Err: {}", e)
        }
    };

    let http = match config::http_client(timeout) {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let recommender = Recommender::genre_only(
        Arc::new(ListenNotesClient::new(
            http,
            &catalog.api_url,
            &catalog.api_key,
        )),
        settings.clone(),
    );

    let genre_id = genre_id.unwrap_or(settings.genre_id);
    let region = region.unwrap_or_else(|| settings.region.clone());

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Picking a podcast from genre {}...", genre_id));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = recommender.recommend_from(genre_id, &region).await;
    pb.finish_and_clear();

    match result {
        Ok(podcast) => {
            info!("Recommended podcast:");
            println!("{}", Table::new(table_rows(&podcast)));
        }
        Err(e) => error!("No recommendation. Err: {}", e),
    }
}

pub fn table_rows(podcast: &Podcast) -> Vec<PodcastTableRow> {
    let mut rows = vec![
        row("Title", &podcast.title),
        row("Thumbnail", podcast.thumbnail.as_deref().unwrap_or("-")),
    ];

    match &podcast.preview_episode {
        Some(episode) => {
            rows.push(row("Episode", &episode.title));
            rows.push(row("Audio", &episode.audio_url));
            rows.push(row("Length", &format_seconds(episode.audio_length_sec)));
            rows.push(row(
                "Preview from",
                &format_seconds(episode.preview_starting_time_sec),
            ));
        }
        None => rows.push(row("Episode", "-")),
    }

    rows
}

fn row(field: &str, value: &str) -> PodcastTableRow {
    PodcastTableRow {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Formats a duration as `h:mm:ss` or `m:ss`.
pub fn format_seconds(total: u32) -> String {
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
