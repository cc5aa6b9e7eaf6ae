use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Login attempt waiting for the provider callback.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub code_verifier: String,
    pub started_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub display_name: Option<String>,
}

/// Podcast returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub preview_episode: Option<Episode>,
    pub catalog_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub title: String,
    pub description: String,
    pub audio_url: String,
    pub audio_length_sec: u32,
    pub preview_starting_time_sec: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Show {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedShowsResponse {
    pub items: Vec<SavedShow>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedShow {
    pub show: Show,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogPodcast {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub episodes: Vec<CatalogEpisode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEpisode {
    pub id: String,
    pub title: String,
    pub description: String,
    pub audio: String,
    pub audio_length_sec: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPodcastResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title_original: String,
    pub description_original: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<CatalogPodcast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestPodcastsResponse {
    pub podcasts: Vec<CatalogPodcast>,
}

#[derive(Tabled)]
pub struct PodcastTableRow {
    pub field: String,
    pub value: String,
}

impl From<SearchResult> for Podcast {
    fn from(result: SearchResult) -> Self {
        Podcast {
            title: result.title_original,
            description: result.description_original,
            thumbnail: result.thumbnail,
            preview_episode: None,
            catalog_id: Some(result.id),
        }
    }
}

impl From<CatalogPodcast> for Podcast {
    fn from(podcast: CatalogPodcast) -> Self {
        Podcast {
            title: podcast.title,
            description: podcast.description,
            thumbnail: podcast.thumbnail,
            preview_episode: None,
            catalog_id: Some(podcast.id),
        }
    }
}
