use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{
    error::Result,
    listennotes::Catalog,
    types::{
        BestPodcastsResponse, CatalogPodcast, Podcast, RecommendationsResponse,
        SearchPodcastResponse,
    },
};

const API_KEY_HEADER: &str = "X-ListenAPI-Key";

/// Client for the Listen Notes podcast API (v2).
#[derive(Clone)]
pub struct ListenNotesClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl ListenNotesClient {
    pub fn new(http: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{uri}{path}", uri = self.api_url))
            .header(API_KEY_HEADER, &self.api_key)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let res = request.send().await?.error_for_status()?;
        Ok(res.json::<T>().await?)
    }
}

#[async_trait]
impl Catalog for ListenNotesClient {
    async fn find_podcast_by_name(&self, name: &str) -> Result<Option<Podcast>> {
        let request = self.get("/search").query(&[
            ("type", "podcast"),
            ("only_in", "title"),
            ("language", "English"),
            ("q", name),
        ]);
        let res: SearchPodcastResponse = self.fetch(request).await?;

        Ok(res.results.into_iter().next().map(Podcast::from))
    }

    async fn recommendations(&self, podcast_id: &str) -> Result<Vec<Podcast>> {
        let request = self.get(&format!("/podcasts/{}/recommendations", podcast_id));
        let res: RecommendationsResponse = self.fetch(request).await?;

        Ok(res.recommendations.into_iter().map(Podcast::from).collect())
    }

    async fn podcast_by_id(&self, podcast_id: &str) -> Result<CatalogPodcast> {
        let request = self.get(&format!("/podcasts/{}", podcast_id));
        self.fetch(request).await
    }

    async fn best_podcasts(
        &self,
        genre_id: u32,
        page: u32,
        region: &str,
    ) -> Result<Vec<CatalogPodcast>> {
        let request = self.get("/best_podcasts").query(&[
            ("genre_id", genre_id.to_string()),
            ("page", page.to_string()),
            ("region", region.to_string()),
        ]);
        let res: BestPodcastsResponse = self.fetch(request).await?;

        Ok(res.podcasts)
    }
}
