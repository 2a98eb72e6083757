//! Three-level index over resident shows: show, season, episode.
//!
//! Reads (`show`, `season`, `episode`, `field`) never create nodes and fail
//! with the typed not-found errors. Writes go through the `ensure_*` family,
//! which creates any missing intermediate node and otherwise returns the
//! existing one untouched. Only population writes.

use std::sync::Arc;

use tvindex_common::{Error, Result, ShowId};

use super::cache::{BoundedCache, CachePolicy};
use super::episode::Episode;
use super::record::FieldValue;
use super::season::Season;
use super::show::Show;
use crate::clock::Clock;

#[derive(Debug)]
pub struct IndexedCollection {
    shows: BoundedCache<ShowId, Show>,
}

impl IndexedCollection {
    pub fn new(policy: CachePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            shows: BoundedCache::new(policy, clock),
        }
    }

    pub fn contains(&self, id: ShowId) -> bool {
        self.shows.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    pub fn show(&self, id: ShowId) -> Result<&Show> {
        self.shows
            .get(&id)
            .ok_or_else(|| Error::show_not_found(format!("no resident show with id {id}")))
    }

    pub fn season(&self, id: ShowId, season: u32) -> Result<&Season> {
        self.show(id)?.season(season)
    }

    pub fn episode(&self, id: ShowId, season: u32, episode: u32) -> Result<&Episode> {
        self.season(id, season)?.episode(episode)
    }

    pub fn field(&self, id: ShowId, season: u32, episode: u32, name: &str) -> Result<&FieldValue> {
        self.episode(id, season, episode)?.get(name)
    }

    /// Write access to a resident show; never creates one.
    pub fn show_mut(&mut self, id: ShowId) -> Option<&mut Show> {
        self.shows.get_mut(&id)
    }

    pub fn ensure_show(&mut self, id: ShowId) -> &mut Show {
        self.shows.get_or_insert_with(id, || Show::new(id))
    }

    pub fn ensure_season(&mut self, id: ShowId, season: u32) -> &mut Season {
        self.ensure_show(id).ensure_season(season)
    }

    pub fn ensure_episode(&mut self, id: ShowId, season: u32, episode: u32) -> &mut Episode {
        self.ensure_season(id, season).ensure_episode(episode)
    }
}
