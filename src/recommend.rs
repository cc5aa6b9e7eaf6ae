//! Recommendation orchestration.
//!
//! Two flavours share the same tail: pick a podcast, fetch its detail, pick
//! one of its episodes and place a preview clip inside it.
//!
//! - [`Recommender::recommend_for_listener`] starts from the shows the
//!   listener follows on Spotify, looks each of them up in the catalog and
//!   pools the catalog's recommendations for every match.
//! - [`Recommender::recommend_from_genre`] starts from the best podcasts of
//!   the configured genre.

use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use futures::future::join_all;

use crate::{
    config::RecommendSettings,
    error::{PodcastError, Result},
    listennotes::Catalog,
    management::ResultCache,
    spotify::Library,
    types::{CatalogEpisode, Episode, Podcast, Show},
    utils::{self, Randomness, SeededRandom},
};

/// Page of the genre listing the genre variant picks from.
const GENRE_PAGE: u32 = 1;

pub struct Recommender {
    catalog: Arc<dyn Catalog>,
    library: Arc<dyn Library>,
    random: Mutex<Box<dyn Randomness>>,
    candidates: ResultCache<Vec<Podcast>>,
    settings: RecommendSettings,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        library: Arc<dyn Library>,
        settings: RecommendSettings,
    ) -> Self {
        Self {
            catalog,
            library,
            random: Mutex::new(Box::new(SeededRandom::from_os())),
            candidates: ResultCache::new("userRecommendations"),
            settings,
        }
    }

    /// Builds a recommender serving only the genre variant. It holds no
    /// listener library, so [`Self::recommend_for_listener`] always fails with
    /// [`PodcastError::NoRecommendation`].
    pub fn genre_only(catalog: Arc<dyn Catalog>, settings: RecommendSettings) -> Self {
        Self::new(catalog, Arc::new(NoLibrary), settings)
    }

    /// Replaces the random source.
    pub fn with_random(mut self, random: Box<dyn Randomness>) -> Self {
        self.random = Mutex::new(random);
        self
    }

    /// Recommends a podcast related to the shows the owner of `access_token`
    /// follows.
    ///
    /// Fails with [`PodcastError::NoRecommendation`] when none of the followed
    /// shows leads to a recommendation.
    pub async fn recommend_for_listener(&self, access_token: &str) -> Result<Podcast> {
        let candidates = self
            .candidates
            .get_or_try_insert_with(access_token, || self.candidate_pool(access_token))
            .await?;

        let chosen = self
            .pick(&candidates)
            .ok_or(PodcastError::NoRecommendation)?;

        let podcast_id = chosen
            .catalog_id
            .ok_or(PodcastError::UnknownCatalogId(chosen.title))?;

        self.with_preview_episode(&podcast_id).await
    }

    /// Collects the catalog recommendations of every followed show that has a
    /// match in the catalog.
    ///
    /// Searches run concurrently, then recommendation lookups run
    /// concurrently. Each batch is awaited in full; any failure in a batch
    /// fails the whole pool.
    pub async fn candidate_pool(&self, access_token: &str) -> Result<Vec<Podcast>> {
        let shows = self.library.followed_shows(access_token).await?;

        let matches: Vec<Podcast> = fan_out(
            shows
                .iter()
                .map(|show| self.catalog.find_podcast_by_name(&show.name)),
        )
        .await?
        .into_iter()
        .flatten()
        .collect();

        let recommendations = fan_out(
            matches
                .iter()
                .filter_map(|podcast| podcast.catalog_id.as_deref())
                .map(|id| self.catalog.recommendations(id)),
        )
        .await?;

        Ok(recommendations.into_iter().flatten().collect())
    }

    /// Recommends one of the best podcasts of the configured genre.
    pub async fn recommend_from_genre(&self) -> Result<Podcast> {
        self.recommend_from(self.settings.genre_id, &self.settings.region)
            .await
    }

    /// Recommends one of the best podcasts of `genre_id` in `region`.
    pub async fn recommend_from(&self, genre_id: u32, region: &str) -> Result<Podcast> {
        let listing = self
            .catalog
            .best_podcasts(genre_id, GENRE_PAGE, region)
            .await?;

        let chosen = self.pick(&listing).ok_or(PodcastError::NoRecommendation)?;

        self.with_preview_episode(&chosen.id).await
    }

    /// Fetches the detail of a podcast and attaches a preview of one of its
    /// episodes picked at random. A podcast without episodes comes back
    /// without preview.
    pub async fn with_preview_episode(&self, podcast_id: &str) -> Result<Podcast> {
        let detail = self.catalog.podcast_by_id(podcast_id).await?;

        let preview_episode = {
            let mut random = self.random.lock().unwrap_or_else(|e| e.into_inner());
            utils::pick_random(&detail.episodes, &mut **random).map(|episode| {
                preview_of(episode, self.settings.min_tail_secs, &mut **random)
            })
        };

        Ok(Podcast {
            title: detail.title,
            description: detail.description,
            thumbnail: detail.thumbnail,
            preview_episode,
            catalog_id: Some(detail.id),
        })
    }

    fn pick<T: Clone>(&self, items: &[T]) -> Option<T> {
        let mut random = self.random.lock().unwrap_or_else(|e| e.into_inner());
        utils::pick_random(items, &mut **random).cloned()
    }
}

struct NoLibrary;

#[async_trait]
impl Library for NoLibrary {
    async fn followed_shows(&self, _access_token: &str) -> Result<Vec<Show>> {
        Ok(Vec::new())
    }
}

fn preview_of(
    episode: &CatalogEpisode,
    min_tail_secs: u32,
    random: &mut dyn Randomness,
) -> Episode {
    Episode {
        title: episode.title.clone(),
        description: episode.description.clone(),
        audio_url: episode.audio.clone(),
        audio_length_sec: episode.audio_length_sec,
        preview_starting_time_sec: utils::compute_preview_start(
            episode.audio_length_sec,
            min_tail_secs,
            random,
        ),
    }
}

/// Runs every call concurrently and waits for all of them.
///
/// Results keep the order of `calls`. The first error, in that order, is
/// returned once the whole batch has completed.
pub async fn fan_out<I, F, T>(calls: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>>,
{
    join_all(calls).await.into_iter().collect()
}
