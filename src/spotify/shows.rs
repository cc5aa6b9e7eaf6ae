use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::Result,
    spotify::Library,
    types::{CurrentUserResponse, Principal, SavedShowsResponse, Show},
};

/// Page size used when listing saved shows.
const SHOWS_PAGE_LIMIT: u32 = 50;

/// Client for the parts of the Spotify Web API that expose the listener's
/// library.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Retrieves every show saved in the user's library.
    ///
    /// Follows the `next` links of the paginated `/me/shows` endpoint until
    /// the last page.
    pub async fn saved_shows(&self, token: &str) -> Result<Vec<Show>> {
        let mut shows = Vec::new();
        let mut next = Some(format!(
            "{uri}/me/shows?limit={limit}",
            uri = self.api_url,
            limit = SHOWS_PAGE_LIMIT
        ));

        while let Some(url) = next {
            let page = self
                .http
                .get(&url)
                .bearer_auth(token)
                .send()
                .await?
                .error_for_status()?
                .json::<SavedShowsResponse>()
                .await?;

            shows.extend(page.items.into_iter().map(|item| item.show));
            next = page.next;
        }

        Ok(shows)
    }

    /// Retrieves the profile of the user owning `token`.
    pub async fn current_user(&self, token: &str) -> Result<Principal> {
        let me = self
            .http
            .get(format!("{uri}/me", uri = self.api_url))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json::<CurrentUserResponse>()
            .await?;

        Ok(Principal {
            id: me.id,
            display_name: me.display_name,
        })
    }
}

#[async_trait]
impl Library for SpotifyClient {
    async fn followed_shows(&self, access_token: &str) -> Result<Vec<Show>> {
        self.saved_shows(access_token).await
    }
}
