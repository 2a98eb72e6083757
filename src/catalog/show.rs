use std::collections::BTreeMap;
use std::fmt;

use tvindex_common::{Error, Result, ShowId};

use super::record::{Actor, FieldValue, Record};
use super::season::Season;

/// Metadata key holding the processed banner index.
pub const BANNERS_KEY: &str = "_banners";
/// Metadata key holding the processed actor list.
pub const ACTORS_KEY: &str = "_actors";

/// A catalog entry: show metadata plus seasons keyed by season number.
///
/// Metadata and seasons live in separate namespaces. [`Show::lookup`] exposes
/// both through one key space: digit keys address seasons, everything else
/// addresses metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    id: ShowId,
    data: Record,
    seasons: BTreeMap<u32, Season>,
}

/// Result of a combined [`Show::lookup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowEntry<'a> {
    Field(&'a FieldValue),
    Season(&'a Season),
}

impl<'a> ShowEntry<'a> {
    pub fn as_field(self) -> Option<&'a FieldValue> {
        match self {
            ShowEntry::Field(value) => Some(value),
            ShowEntry::Season(_) => None,
        }
    }

    pub fn as_season(self) -> Option<&'a Season> {
        match self {
            ShowEntry::Season(season) => Some(season),
            ShowEntry::Field(_) => None,
        }
    }
}

impl Show {
    pub fn new(id: ShowId) -> Self {
        Self {
            id,
            data: Record::new(),
            seasons: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ShowId {
        self.id
    }

    /// Combined lookup over both namespaces.
    ///
    /// An integer-like key raises `SeasonNotFound` when the season is
    /// absent; any other key is a metadata field and raises
    /// `AttributeNotFound` when absent.
    pub fn lookup(&self, key: &str) -> Result<ShowEntry<'_>> {
        if let Some(number) = parse_season_key(key) {
            return self.season(number).map(ShowEntry::Season);
        }
        if is_integer_like(key) {
            return Err(Error::season_not_found(key));
        }
        self.get(key).map(ShowEntry::Field)
    }

    /// Read a metadata field.
    pub fn get(&self, name: &str) -> Result<&FieldValue> {
        self.data.get(name)
    }

    /// Read a season; raises `SeasonNotFound` on a miss.
    pub fn season(&self, number: u32) -> Result<&Season> {
        self.seasons
            .get(&number)
            .ok_or_else(|| Error::season_not_found(number))
    }

    pub fn seasons(&self) -> impl Iterator<Item = &Season> {
        self.seasons.values()
    }

    pub fn season_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.seasons.keys().copied()
    }

    pub fn data(&self) -> &Record {
        &self.data
    }

    pub fn series_name(&self) -> Option<&str> {
        self.data.text("seriesName")
    }

    /// The `_banners` index, when banner augmentation was enabled.
    pub fn banners(&self) -> Option<&FieldValue> {
        self.data.get(BANNERS_KEY).ok()
    }

    /// The `_actors` list; empty when actor augmentation was disabled.
    pub fn actors(&self) -> Vec<Actor> {
        match self.data.get(ACTORS_KEY) {
            Ok(FieldValue::Records(records)) => records.iter().cloned().map(Actor::new).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of episodes across all seasons.
    pub fn episode_count(&self) -> usize {
        self.seasons.values().map(Season::len).sum()
    }

    pub(crate) fn set_data(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.data.set(name, value);
    }

    pub(crate) fn ensure_season(&mut self, number: u32) -> &mut Season {
        let show = self.id;
        self.seasons
            .entry(number)
            .or_insert_with(|| Season::new(show, number))
    }
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Show {:?} (containing {} seasons)>",
            self.series_name().unwrap_or("instance"),
            self.seasons.len()
        )
    }
}

fn is_integer_like(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

fn parse_season_key(key: &str) -> Option<u32> {
    if is_integer_like(key) {
        key.parse().ok()
    } else {
        None
    }
}
