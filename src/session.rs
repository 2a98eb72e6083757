//! Consumer-facing lookup session.
//!
//! A [`Catalog`] owns one [`IndexedCollection`], one correction map and a
//! source. Lookups by id populate on first use; lookups by name resolve
//! first. Every lookup hands back a snapshot of the resident show.
//!
//! The collection lock is a `parking_lot` mutex and is never held across a
//! fetch. Concurrent lookups of the same id share one population run: each
//! id gets an async gate, and whoever waited on the gate re-checks the cache
//! before fetching. Gates are dropped once no lookup holds or waits on them.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;
use tvindex_common::{Error, Language, Result, ShowId, ShowKey};

use crate::catalog::{
    CachePolicy, EpisodeOrder, IndexedCollection, KeyedGates, PopulateOptions, PopulationEngine,
    Resolver, Show,
};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::provider::{
    ArtworkUrls, CatalogSource, FirstResult, SeriesSelector, TimeoutBreaker, TvdbClient,
};

pub struct Catalog {
    collection: Mutex<IndexedCollection>,
    resolver: Resolver,
    engine: PopulationEngine,
    language: Language,
    gates: KeyedGates<ShowId>,
}

impl Catalog {
    pub fn builder(source: Arc<dyn CatalogSource>) -> CatalogBuilder {
        CatalogBuilder::new(source)
    }

    /// Build a session against TheTVDB from loaded configuration.
    ///
    /// `breaker` is shared by every session of one owner; it is consulted
    /// here and fed by the client's transport failures.
    pub fn from_config(config: &Config, breaker: Arc<TimeoutBreaker>) -> Result<Self> {
        let client = TvdbClient::new(&config.api, breaker.clone())?;
        Self::builder(Arc::new(client))
            .language(config.catalog.language)
            .episode_order(config.catalog.episode_order)
            .banners(config.catalog.banners)
            .actors(config.catalog.actors)
            .force_connect(config.catalog.force_connect)
            .artwork(ArtworkUrls::new(config.api.artwork_url.clone()))
            .cache_policy(config.cache.policy())
            .breaker(breaker)
            .build()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn options(&self) -> PopulateOptions {
        self.engine.options()
    }

    /// Number of shows currently resident.
    pub fn resident(&self) -> usize {
        self.collection.lock().len()
    }

    /// Whether `id` is resident right now.
    pub fn contains(&self, id: ShowId) -> bool {
        self.collection.lock().contains(id)
    }

    /// Ids with a population run in flight or waited on.
    pub fn pending_populations(&self) -> usize {
        self.gates.len()
    }

    /// The cached identifier for `name`, if it was resolved before.
    pub fn correction(&self, name: &str) -> Option<ShowId> {
        self.resolver.correction(name)
    }

    /// Look up a show by id or name.
    ///
    /// Raises `ShowNotFound` when a name search has no candidates or the
    /// source knows no such id.
    pub async fn lookup(&self, key: impl Into<ShowKey>) -> Result<Show> {
        match key.into() {
            ShowKey::Id(id) => self.ensure_populated(id).await,
            ShowKey::Name(name) => {
                let resolution = self.resolver.resolve(&name, self.language).await?;
                self.ensure_populated(resolution.id).await
            }
        }
    }

    /// Resolve a name to its identifier, populating a freshly found show.
    pub async fn resolve(&self, name: &str) -> Result<ShowId> {
        let resolution = self.resolver.resolve(name, self.language).await?;
        if resolution.fresh {
            self.ensure_populated(resolution.id).await?;
        }
        Ok(resolution.id)
    }

    fn snapshot(&self, id: ShowId) -> Option<Show> {
        self.collection.lock().show(id).ok().cloned()
    }

    async fn ensure_populated(&self, id: ShowId) -> Result<Show> {
        if let Some(show) = self.snapshot(id) {
            return Ok(show);
        }

        let _pass = self.gates.acquire(id).await;
        if let Some(show) = self.snapshot(id) {
            debug!(%id, "Show populated while waiting");
            return Ok(show);
        }

        self.engine.populate(&self.collection, id, self.language).await?;
        self.snapshot(id)
            .ok_or_else(|| Error::show_not_found(format!("show {id} was evicted during lookup")))
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("language", &self.language)
            .field("options", &self.engine.options())
            .field("resident", &self.resident())
            .finish()
    }
}

/// Options for a [`Catalog`].
pub struct CatalogBuilder {
    source: Arc<dyn CatalogSource>,
    language: Language,
    options: PopulateOptions,
    selector: Arc<dyn SeriesSelector>,
    clock: Arc<dyn Clock>,
    breaker: Option<Arc<TimeoutBreaker>>,
    force_connect: bool,
    policy: CachePolicy,
    artwork: ArtworkUrls,
}

impl CatalogBuilder {
    fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            language: Language::default(),
            options: PopulateOptions::default(),
            selector: Arc::new(FirstResult),
            clock: Arc::new(SystemClock),
            breaker: None,
            force_connect: false,
            policy: CachePolicy::default(),
            artwork: ArtworkUrls::default(),
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn episode_order(mut self, order: EpisodeOrder) -> Self {
        self.options.order = order;
        self
    }

    pub fn banners(mut self, enabled: bool) -> Self {
        self.options.banners = enabled;
        self
    }

    pub fn actors(mut self, enabled: bool) -> Self {
        self.options.actors = enabled;
        self
    }

    pub fn selector(mut self, selector: Arc<dyn SeriesSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn breaker(mut self, breaker: Arc<TimeoutBreaker>) -> Self {
        self.breaker = Some(breaker);
        self
    }

    pub fn force_connect(mut self, force: bool) -> Self {
        self.force_connect = force;
        self
    }

    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.policy.capacity = capacity;
        self
    }

    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.policy.sweep_interval = interval;
        self
    }

    pub fn artwork(mut self, artwork: ArtworkUrls) -> Self {
        self.artwork = artwork;
        self
    }

    /// Fails with `RecentTimeout` when the breaker saw a transport failure
    /// inside its cool-down and `force_connect` is off.
    pub fn build(self) -> Result<Catalog> {
        if let Some(breaker) = &self.breaker {
            breaker.check(self.force_connect)?;
        }

        Ok(Catalog {
            collection: Mutex::new(IndexedCollection::new(self.policy, self.clock)),
            resolver: Resolver::new(self.source.clone(), self.selector),
            engine: PopulationEngine::new(self.source, self.artwork, self.options),
            language: self.language,
            gates: KeyedGates::new(),
        })
    }
}
