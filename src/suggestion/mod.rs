mod error;
mod normalize;
mod pick;


use std::sync::Arc;

use crate::config::Config;
use crate::models::AlbumSuggestion;
use crate::sources::{CatalogMatch, DiscogsClient, ItunesClient};

pub use error::{Result, SuggestionError};
pub use normalize::{search_term, strip_disambiguation_suffix, upgrade_artwork};
pub use pick::{random_index, PagePosition, PER_PAGE};

/// Picks a 1-based index given the collection size.
pub type IndexPicker = Arc<dyn Fn(u64) -> u64 + Send + Sync>;

/// Outcome of the catalog lookup for an already identified album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    /// The search term was blank, so no request was made.
    Skipped,
    NotFound,
    Found(CatalogMatch),
    Failed(String),
}

impl Enrichment {
    pub fn apply(self, suggestion: AlbumSuggestion) -> AlbumSuggestion {
        let Enrichment::Found(found) = self else {
            return suggestion;
        };

        let mut suggestion = suggestion;
        if let Some(artwork) = found.artwork_url {
            suggestion = suggestion.with_cover_url(upgrade_artwork(&artwork));
        }
        if let Some(music_url) = found.collection_url {
            suggestion = suggestion.with_music_url(music_url);
        }
        suggestion
    }
}

/// Picks a random release from a Discogs collection and looks it up in the
/// iTunes catalog. Holds no per-request state; clones share HTTP clients.
#[derive(Clone)]
pub struct SuggestionService {
    discogs: DiscogsClient,
    itunes: ItunesClient,
    picker: IndexPicker,
}

impl SuggestionService {
    pub fn new(discogs: DiscogsClient, itunes: ItunesClient) -> Self {
        Self {
            discogs,
            itunes,
            picker: Arc::new(|total| random_index(total, &mut rand::thread_rng())),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            DiscogsClient::new(&config.discogs_api_url, config.http_timeout)?,
            ItunesClient::new(&config.itunes_api_url, config.http_timeout)?,
        ))
    }

    /// Replace the random draw, e.g. to make selection deterministic.
    pub fn with_index_picker<F>(mut self, picker: F) -> Self
    where
        F: Fn(u64) -> u64 + Send + Sync + 'static,
    {
        self.picker = Arc::new(picker);
        self
    }

    pub async fn suggest_random_album(&self, username: &str) -> Result<AlbumSuggestion> {
        if username.is_empty() {
            return Err(SuggestionError::InvalidUsername);
        }

        // 1. Learn the collection size
        let first_page = self.discogs.fetch_first_page(username).await?;
        let total = match first_page.total_items() {
            Some(total) if total > 0 => total,
            _ => return Err(SuggestionError::NoItems),
        };

        // 2. Pick an item and work out where it lives
        let index = (self.picker)(total);
        let position = PagePosition::from_index(index)
            .filter(|_| index <= total)
            .ok_or(SuggestionError::OutOfRange)?;

        tracing::debug!(
            "Picked item {} of {} for {} (page {}, offset {})",
            index,
            total,
            username,
            position.page,
            position.offset
        );

        // 3. Fetch that page. The collection may have shrunk since step 1.
        let page = self
            .discogs
            .fetch_page(username, position.page, PER_PAGE)
            .await?;
        let release = page.release_at(position.offset)?;

        let title = strip_disambiguation_suffix(&release.title);
        let artist = release.primary_artist().ok_or_else(|| {
            SuggestionError::ParsingFailure("Missing release or artist information".to_string())
        })?;
        let artist = strip_disambiguation_suffix(artist);
        let suggestion = AlbumSuggestion::new(title, artist);

        // 4. Best effort artwork and store link
        let enrichment = self.enrich(&suggestion).await;
        if let Enrichment::Failed(reason) = &enrichment {
            tracing::warn!(
                "Catalog lookup failed for '{}' by {}: {}",
                suggestion.title,
                suggestion.artist,
                reason
            );
        }

        let suggestion = enrichment.apply(suggestion);
        tracing::info!(
            "Suggesting '{}' by {} for {}",
            suggestion.title,
            suggestion.artist,
            username
        );

        Ok(suggestion)
    }

    async fn enrich(&self, suggestion: &AlbumSuggestion) -> Enrichment {
        let term = search_term(&suggestion.artist, &suggestion.title);
        if term.trim().is_empty() {
            return Enrichment::Skipped;
        }

        match self.itunes.search_album(&term).await {
            Ok(Some(found)) => Enrichment::Found(found),
            Ok(None) => Enrichment::NotFound,
            Err(e) => Enrichment::Failed(e.to_string()),
        }
    }
}
