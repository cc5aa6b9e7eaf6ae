//! # Listen Notes Catalog Module
//!
//! Podcast search, detail, recommendation and genre listings come from the
//! Listen Notes API. The recommender only sees the [`Catalog`] trait;
//! [`ListenNotesClient`] is the HTTP implementation and [`CachedCatalog`]
//! keeps the results of every lookup for the lifetime of the process.
//!
//! ## Endpoints
//!
//! - `GET /search` - first title match for a followed show
//! - `GET /podcasts/{id}/recommendations` - related podcasts
//! - `GET /podcasts/{id}` - podcast detail with its latest episodes
//! - `GET /best_podcasts` - best podcasts of a genre in a region

mod client;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Result,
    management::ResultCache,
    types::{CatalogPodcast, Podcast},
};

pub use client::ListenNotesClient;

#[async_trait]
pub trait Catalog: Send + Sync {
    /// First podcast whose title matches `name`, if any.
    ///
    /// Matching is whatever the catalog does for a title-only English search.
    async fn find_podcast_by_name(&self, name: &str) -> Result<Option<Podcast>>;

    async fn recommendations(&self, podcast_id: &str) -> Result<Vec<Podcast>>;

    async fn podcast_by_id(&self, podcast_id: &str) -> Result<CatalogPodcast>;

    async fn best_podcasts(&self, genre_id: u32, page: u32, region: &str)
    -> Result<Vec<CatalogPodcast>>;
}

/// [`Catalog`] decorator with one cache per operation.
///
/// The genre listing is not cached so the genre variant keeps picking from a
/// fresh page.
pub struct CachedCatalog {
    inner: Arc<dyn Catalog>,
    searches: ResultCache<Option<Podcast>>,
    recommendations: ResultCache<Vec<Podcast>>,
    podcasts: ResultCache<CatalogPodcast>,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn Catalog>) -> Self {
        Self {
            inner,
            searches: ResultCache::new("findPodcast"),
            recommendations: ResultCache::new("podcastRecommendations"),
            podcasts: ResultCache::new("completePodcast"),
        }
    }
}

#[async_trait]
impl Catalog for CachedCatalog {
    async fn find_podcast_by_name(&self, name: &str) -> Result<Option<Podcast>> {
        self.searches
            .get_or_try_insert_with(name, || self.inner.find_podcast_by_name(name))
            .await
    }

    async fn recommendations(&self, podcast_id: &str) -> Result<Vec<Podcast>> {
        self.recommendations
            .get_or_try_insert_with(podcast_id, || self.inner.recommendations(podcast_id))
            .await
    }

    async fn podcast_by_id(&self, podcast_id: &str) -> Result<CatalogPodcast> {
        self.podcasts
            .get_or_try_insert_with(podcast_id, || self.inner.podcast_by_id(podcast_id))
            .await
    }

    async fn best_podcasts(
        &self,
        genre_id: u32,
        page: u32,
        region: &str,
    ) -> Result<Vec<CatalogPodcast>> {
        self.inner.best_podcasts(genre_id, page, region).await
    }
}
