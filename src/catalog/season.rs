use std::collections::BTreeMap;
use std::fmt;

use tvindex_common::{Error, Result, ShowId};

use super::episode::Episode;

/// A season: episodes keyed by episode number.
///
/// `show` names the owning entry for diagnostics only; the season is owned
/// by that show's season map.
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    number: u32,
    show: ShowId,
    episodes: BTreeMap<u32, Episode>,
}

impl Season {
    pub fn new(show: ShowId, number: u32) -> Self {
        Self {
            number,
            show,
            episodes: BTreeMap::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn show_id(&self) -> ShowId {
        self.show
    }

    /// Read path: raises `EpisodeNotFound` on a miss, never creates.
    pub fn episode(&self, number: u32) -> Result<&Episode> {
        self.episodes
            .get(&number)
            .ok_or_else(|| Error::episode_not_found(number))
    }

    /// Write path: returns the existing episode or creates an empty one.
    pub(crate) fn ensure_episode(&mut self, number: u32) -> &mut Episode {
        let season = self.number;
        self.episodes
            .entry(number)
            .or_insert_with(|| Episode::new(season, number))
    }

    /// Episodes in ascending episode-number order.
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.values()
    }

    pub fn episode_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.episodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Season {} of show {} (containing {} episodes)>",
            self.number,
            self.show,
            self.episodes.len()
        )
    }
}
