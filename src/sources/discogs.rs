use serde::Deserialize;
use std::time::Duration;

use crate::models::{ArtistCredit, ReleaseSummary};
use crate::suggestion::{Result, SuggestionError};

pub const DEFAULT_DISCOGS_URL: &str = "https://api.discogs.com";

#[derive(Debug, Deserialize)]
struct Pagination {
    // Kept loose: anything that is not a non-negative integer counts as absent
    #[serde(default)]
    items: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CollectionRelease {
    basic_information: Option<BasicInformation>,
}

#[derive(Debug, Deserialize)]
struct BasicInformation {
    title: Option<String>,
    #[serde(default)]
    artists: Vec<Artist>,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: Option<String>,
}

/// One response from the collection listing endpoint.
///
/// Releases are kept as raw JSON and only the one that gets picked is
/// decoded, so an odd entry elsewhere on the page does not fail the request.
#[derive(Debug, Deserialize)]
pub struct CollectionPage {
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    releases: Option<Vec<serde_json::Value>>,
}

impl CollectionPage {
    /// Total number of items in the collection as reported by the API.
    pub fn total_items(&self) -> Option<u64> {
        self.pagination
            .as_ref()
            .and_then(|p| p.items.as_ref())
            .and_then(|items| items.as_u64())
    }

    pub fn release_count(&self) -> usize {
        self.releases.as_ref().map_or(0, Vec::len)
    }

    /// Decode the release at a 0-based offset on this page.
    pub fn release_at(&self, offset: usize) -> Result<ReleaseSummary> {
        let raw = self
            .releases
            .as_ref()
            .and_then(|releases| releases.get(offset))
            .ok_or(SuggestionError::OutOfRange)?;

        let release: CollectionRelease = serde_json::from_value(raw.clone()).map_err(|e| {
            SuggestionError::ParsingFailure(format!("Unexpected release shape: {}", e))
        })?;

        let missing =
            || SuggestionError::ParsingFailure("Missing release or artist information".to_string());

        let info = release.basic_information.ok_or_else(missing)?;
        let title = info.title.ok_or_else(missing)?;

        // Only the first credit has to carry a name
        if info.artists.first().and_then(|a| a.name.as_ref()).is_none() {
            return Err(missing());
        }

        let artists = info
            .artists
            .into_iter()
            .filter_map(|artist| artist.name)
            .map(|name| ArtistCredit { name })
            .collect();

        Ok(ReleaseSummary { title, artists })
    }
}

#[derive(Clone)]
pub struct DiscogsClient {
    base_url: String,
    client: reqwest::Client,
}

impl DiscogsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .user_agent(super::USER_AGENT)
                .timeout(timeout)
                .build()?,
        })
    }

    fn releases_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/collection/folders/0/releases",
            self.base_url,
            urlencoding::encode(username)
        )
    }

    /// Fetch the unparameterized first page, used to learn the collection size.
    pub async fn fetch_first_page(&self, username: &str) -> Result<CollectionPage> {
        self.get_page(&self.releases_url(username)).await
    }

    pub async fn fetch_page(
        &self,
        username: &str,
        page: u64,
        per_page: usize,
    ) -> Result<CollectionPage> {
        let url = format!(
            "{}?page={}&per_page={}",
            self.releases_url(username),
            page,
            per_page
        );
        self.get_page(&url).await
    }

    async fn get_page(&self, url: &str) -> Result<CollectionPage> {
        tracing::debug!("Fetching Discogs collection {}", url);

        let response = self.client.get(url).send().await?;

        // Error bodies are still JSON objects; an unknown user ends up as NoItems
        if !response.status().is_success() {
            tracing::warn!("Discogs returned {} for {}", response.status(), url);
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            SuggestionError::ParsingFailure(format!("Failed to parse collection page: {}", e))
        })
    }
}
