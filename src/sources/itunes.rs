use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ITUNES_URL: &str = "https://itunes.apple.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
    #[serde(rename = "collectionViewUrl")]
    collection_view_url: Option<String>,
}

/// First album hit from a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatch {
    pub artwork_url: Option<String>,
    pub collection_url: Option<String>,
}

#[derive(Clone)]
pub struct ItunesClient {
    base_url: String,
    client: reqwest::Client,
}

impl ItunesClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .user_agent(super::USER_AGENT)
                .timeout(timeout)
                .build()?,
        })
    }

    pub async fn search_album(&self, term: &str) -> Result<Option<CatalogMatch>> {
        let search_url = format!(
            "{}/search?term={}&entity=album",
            self.base_url,
            urlencoding::encode(term)
        );

        let response = self
            .client
            .get(&search_url)
            .send()
            .await?
            .json::<SearchResponse>()
            .await?;

        Ok(response.results.into_iter().next().map(|hit| CatalogMatch {
            artwork_url: hit.artwork_url_100,
            collection_url: hit.collection_view_url,
        }))
    }
}
