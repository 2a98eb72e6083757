//! Trait definition and types for remote catalog sources.
//!
//! The catalog core never talks HTTP itself. It asks a [`CatalogSource`] for
//! records by key and leaves authentication, pagination and response parsing
//! to the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tvindex_common::{Language, Result, ShowId};

use crate::catalog::Record;

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// A single candidate returned from a show-name search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesCandidate {
    /// Catalog identifier of the show.
    pub id: ShowId,
    /// Display name of the show.
    #[serde(default)]
    pub series_name: Option<String>,
    /// Premiere date as delivered (usually `YYYY-MM-DD`).
    #[serde(default)]
    pub first_aired: Option<String>,
    /// Broadcasting network.
    #[serde(default)]
    pub network: Option<String>,
    /// Short synopsis.
    #[serde(default)]
    pub overview: Option<String>,
    /// Numeric catalog language id the search ran under.
    #[serde(default, rename = "lid")]
    pub language_id: Option<u32>,
}

impl SeriesCandidate {
    pub fn new(id: ShowId, series_name: impl Into<String>) -> Self {
        Self {
            id,
            series_name: Some(series_name.into()),
            first_aired: None,
            network: None,
            overview: None,
            language_id: None,
        }
    }

    /// Name to show a human; falls back to the id.
    pub fn display_name(&self) -> String {
        self.series_name
            .clone()
            .unwrap_or_else(|| format!("series {}", self.id))
    }
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Async trait that every remote catalog backend implements.
///
/// Implementations must return a flat sequence for list endpoints; following
/// page links is their job. Sources are shared behind an `Arc` across tasks.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short, lowercase identifier for this source (e.g. `"tvdb"`).
    fn name(&self) -> &'static str;

    /// Search shows by name. An empty list means no match; it is not an
    /// error.
    async fn search_by_name(&self, name: &str, language: Language) -> Result<Vec<SeriesCandidate>>;

    /// Fetch the show's metadata document. Unknown ids raise
    /// `ShowNotFound`.
    async fn fetch_metadata(&self, id: ShowId, language: Language) -> Result<Record>;

    /// Fetch every episode item of the show, all pages concatenated.
    async fn fetch_episodes(&self, id: ShowId, language: Language) -> Result<Vec<Record>>;

    /// Fetch raw banner infos across every banner key type.
    async fn fetch_banners(&self, id: ShowId) -> Result<Vec<Record>>;

    /// Fetch the show's actor list.
    async fn fetch_actors(&self, id: ShowId) -> Result<Vec<Record>>;
}
