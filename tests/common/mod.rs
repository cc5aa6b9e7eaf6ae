#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::Barrier;
use podsampler::{
    config::RecommendSettings,
    error::{PodcastError, Result},
    listennotes::Catalog,
    recommend::Recommender,
    spotify::Library,
    types::{CatalogEpisode, CatalogPodcast, Podcast, Show},
    utils::Randomness,
};

/// Random source returning fixed draws.
pub struct FixedRandom {
    pub index: usize,
    pub gaussian: f64,
}

impl FixedRandom {
    pub fn new(index: usize, gaussian: f64) -> Self {
        Self { index, gaussian }
    }
}

impl Randomness for FixedRandom {
    fn index(&mut self, len: usize) -> usize {
        self.index.min(len - 1)
    }

    fn gaussian(&mut self) -> f64 {
        self.gaussian
    }
}

pub fn show(name: &str) -> Show {
    Show {
        name: name.to_string(),
        description: format!("{} description", name),
    }
}

pub fn podcast(id: &str) -> Podcast {
    Podcast {
        title: format!("Podcast {}", id),
        description: format!("About {}", id),
        thumbnail: Some(format!("https://img.example/{}.jpg", id)),
        preview_episode: None,
        catalog_id: Some(id.to_string()),
    }
}

pub fn episode(id: &str, audio_length_sec: u32) -> CatalogEpisode {
    CatalogEpisode {
        id: id.to_string(),
        title: format!("Episode {}", id),
        description: format!("Episode {} notes", id),
        audio: format!("https://audio.example/{}.mp3", id),
        audio_length_sec,
    }
}

pub fn catalog_podcast(id: &str, episodes: Vec<CatalogEpisode>) -> CatalogPodcast {
    CatalogPodcast {
        id: id.to_string(),
        title: format!("Podcast {}", id),
        description: format!("About {}", id),
        thumbnail: Some(format!("https://img.example/{}.jpg", id)),
        episodes,
    }
}

/// In-memory catalog counting the calls it receives.
#[derive(Default)]
pub struct StubCatalog {
    pub search_results: HashMap<String, Podcast>,
    pub failing_searches: Vec<String>,
    pub recommendations: HashMap<String, Vec<Podcast>>,
    pub details: HashMap<String, CatalogPodcast>,
    pub genre_listing: Vec<CatalogPodcast>,
    pub searches: AtomicUsize,
    pub recommendation_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub searched_names: Mutex<Vec<String>>,
    /// Every search waits here before answering when set.
    pub search_barrier: Option<Arc<Barrier>>,
    /// Every recommendation lookup waits here before answering when set.
    pub recommendation_barrier: Option<Arc<Barrier>>,
}

#[async_trait]
impl Catalog for StubCatalog {
    async fn find_podcast_by_name(&self, name: &str) -> Result<Option<Podcast>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut names) = self.searched_names.lock() {
            names.push(name.to_string());
        }
        tokio::task::yield_now().await;
        if let Some(barrier) = &self.search_barrier {
            barrier.wait().await;
        }

        if self.failing_searches.iter().any(|n| n == name) {
            return Err(PodcastError::UpstreamUnavailable(format!(
                "search for '{}' failed",
                name
            )));
        }
        Ok(self.search_results.get(name).cloned())
    }

    async fn recommendations(&self, podcast_id: &str) -> Result<Vec<Podcast>> {
        self.recommendation_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.recommendation_barrier {
            barrier.wait().await;
        }
        Ok(self
            .recommendations
            .get(podcast_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn podcast_by_id(&self, podcast_id: &str) -> Result<CatalogPodcast> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details.get(podcast_id).cloned().ok_or_else(|| {
            PodcastError::UpstreamUnavailable(format!("no podcast {}", podcast_id))
        })
    }

    async fn best_podcasts(
        &self,
        _genre_id: u32,
        _page: u32,
        _region: &str,
    ) -> Result<Vec<CatalogPodcast>> {
        Ok(self.genre_listing.clone())
    }
}

/// Library returning the same shows for every token.
#[derive(Default)]
pub struct StubLibrary {
    pub shows: Vec<Show>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl Library for StubLibrary {
    async fn followed_shows(&self, _access_token: &str) -> Result<Vec<Show>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.shows.clone())
    }
}

pub fn recommender(
    catalog: Arc<StubCatalog>,
    library: Arc<StubLibrary>,
    random: FixedRandom,
) -> Recommender {
    Recommender::new(catalog, library, RecommendSettings::default()).with_random(Box::new(random))
}
