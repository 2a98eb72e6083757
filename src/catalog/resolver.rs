//! Show-name to identifier resolution.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use tvindex_common::{Error, Language, Result, ShowId};

use super::gate::KeyedGates;
use crate::provider::{CatalogSource, SeriesSelector};

/// Outcome of resolving a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub id: ShowId,
    /// `true` when the name was searched now rather than taken from the
    /// correction map.
    pub fresh: bool,
}

/// Maps show names to identifiers, remembering every answer.
///
/// The correction map is never evicted; a name costs at most one successful
/// search per resolver, even when several callers resolve it at once.
pub struct Resolver {
    source: Arc<dyn CatalogSource>,
    selector: Arc<dyn SeriesSelector>,
    corrections: Mutex<HashMap<String, ShowId>>,
    searches: KeyedGates<String>,
}

impl Resolver {
    pub fn new(source: Arc<dyn CatalogSource>, selector: Arc<dyn SeriesSelector>) -> Self {
        Self {
            source,
            selector,
            corrections: Mutex::new(HashMap::new()),
            searches: KeyedGates::new(),
        }
    }

    /// Previously resolved identifier for `name`, if any.
    pub fn correction(&self, name: &str) -> Option<ShowId> {
        self.corrections.lock().get(name).copied()
    }

    /// Pin `name` to `id` without searching.
    pub fn insert_correction(&self, name: impl Into<String>, id: ShowId) {
        self.corrections.lock().insert(name.into(), id);
    }

    pub async fn resolve(&self, name: &str, language: Language) -> Result<Resolution> {
        if let Some(id) = self.correction(name) {
            debug!(name, %id, "Correcting show name to id");
            return Ok(Resolution { id, fresh: false });
        }

        let _pass = self.searches.acquire(name.to_string()).await;
        if let Some(id) = self.correction(name) {
            debug!(name, %id, "Show resolved while waiting");
            return Ok(Resolution { id, fresh: false });
        }

        debug!(name, "Getting show");
        let candidates = self.source.search_by_name(name, language).await?;
        if candidates.is_empty() {
            return Err(Error::show_not_found(format!(
                "show-name search for {name:?} returned zero results"
            )));
        }

        let selected = self.selector.select(candidates)?;
        debug!(id = %selected.id, name = %selected.display_name(), "Got show");
        self.corrections.lock().insert(name.to_string(), selected.id);

        Ok(Resolution {
            id: selected.id,
            fresh: true,
        })
    }
}
