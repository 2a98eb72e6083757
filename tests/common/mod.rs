//! Shared test harness for integration tests.
//!
//! Provides [`ScriptedSource`], an in-memory [`CatalogSource`] that serves
//! canned shows and counts every call, and [`catalog`] to build a session on
//! top of it with a [`ManualClock`].

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use tvindex::catalog::Record;
use tvindex::clock::ManualClock;
use tvindex::provider::{CatalogSource, SeriesCandidate};
use tvindex::session::{Catalog, CatalogBuilder};
use tvindex_common::{Error, Language, Result, ShowId};

#[derive(Debug, Clone, Default)]
pub struct ScriptedShow {
    pub metadata: Value,
    pub episodes: Vec<Value>,
    pub banners: Vec<Value>,
    pub actors: Vec<Value>,
}

/// Per-endpoint call counters.
#[derive(Debug, Default)]
pub struct Calls {
    pub searches: AtomicUsize,
    pub metadata: AtomicUsize,
    pub episodes: AtomicUsize,
    pub banners: AtomicUsize,
    pub actors: AtomicUsize,
}

impl Calls {
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn metadata(&self) -> usize {
        self.metadata.load(Ordering::SeqCst)
    }

    pub fn episodes(&self) -> usize {
        self.episodes.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct ScriptedSource {
    shows: HashMap<ShowId, ScriptedShow>,
    searches: HashMap<String, Vec<SeriesCandidate>>,
    pub calls: Calls,
    /// Delay before answering a metadata fetch.
    pub latency: Option<Duration>,
    /// Fail episode fetches with a transport-style error.
    pub fail_episodes: bool,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a show answering to `name` with `(season, episode, title)`
    /// episodes in aired order.
    pub fn with_show(mut self, id: u64, name: &str, episodes: &[(u32, u32, &str)]) -> Self {
        let episodes = episodes
            .iter()
            .map(|(season, number, title)| {
                json!({
                    "airedSeason": season,
                    "airedEpisodeNumber": number,
                    "episodeName": title,
                    "firstAired": format!("2001-{:02}-{:02}", season, number),
                })
            })
            .collect();
        self.shows.insert(
            ShowId::new(id),
            ScriptedShow {
                metadata: json!({"id": id, "seriesName": name, "banner": format!("graphical/{id}-g.jpg")}),
                episodes,
                ..ScriptedShow::default()
            },
        );
        self.searches
            .entry(name.to_lowercase())
            .or_default()
            .push(SeriesCandidate::new(ShowId::new(id), name));
        self
    }

    pub fn with_raw_show(mut self, id: u64, show: ScriptedShow) -> Self {
        self.shows.insert(ShowId::new(id), show);
        self
    }

    /// Make `name` answer with extra candidates after the registered ones.
    pub fn with_candidate(mut self, name: &str, id: u64, series_name: &str) -> Self {
        self.searches
            .entry(name.to_lowercase())
            .or_default()
            .push(SeriesCandidate::new(ShowId::new(id), series_name));
        self
    }

    fn show(&self, id: ShowId) -> Result<&ScriptedShow> {
        self.shows
            .get(&id)
            .ok_or_else(|| Error::show_not_found(format!("no series with id {id}")))
    }
}

fn records(items: &[Value]) -> Result<Vec<Record>> {
    items.iter().cloned().map(Record::from_json).collect()
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn search_by_name(&self, name: &str, language: Language) -> Result<Vec<SeriesCandidate>> {
        self.calls.searches.fetch_add(1, Ordering::SeqCst);
        let mut candidates = self
            .searches
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_default();
        for candidate in &mut candidates {
            candidate.language_id = Some(language.tvdb_id());
        }
        Ok(candidates)
    }

    async fn fetch_metadata(&self, id: ShowId, _language: Language) -> Result<Record> {
        self.calls.metadata.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Record::from_json(self.show(id)?.metadata.clone())
    }

    async fn fetch_episodes(&self, id: ShowId, _language: Language) -> Result<Vec<Record>> {
        self.calls.episodes.fetch_add(1, Ordering::SeqCst);
        if self.fail_episodes {
            return Err(Error::fetch("episodes", "connection reset by peer"));
        }
        records(&self.show(id)?.episodes)
    }

    async fn fetch_banners(&self, id: ShowId) -> Result<Vec<Record>> {
        self.calls.banners.fetch_add(1, Ordering::SeqCst);
        records(&self.show(id)?.banners)
    }

    async fn fetch_actors(&self, id: ShowId) -> Result<Vec<Record>> {
        self.calls.actors.fetch_add(1, Ordering::SeqCst);
        records(&self.show(id)?.actors)
    }
}

/// Scrubs, with enough episodes to exercise search and ordering.
pub fn scrubs() -> ScriptedSource {
    ScriptedSource::new().with_show(
        76156,
        "Scrubs",
        &[
            (1, 1, "My First Day"),
            (1, 2, "My Mentor"),
            (1, 24, "My Last Day"),
            (2, 1, "My Overkill"),
        ],
    )
}

/// A builder over `source` with a manual clock the test can advance.
pub fn catalog(source: Arc<ScriptedSource>) -> (CatalogBuilder, Arc<ManualClock>) {
    let clock = ManualClock::shared();
    let builder = Catalog::builder(source).clock(clock.clone());
    (builder, clock)
}
