use std::fmt;

use tvindex_common::Result;

use super::record::{FieldValue, Record};

/// One episode: its position under the active ordering policy plus the raw
/// fields delivered by the catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Episode {
    season_number: u32,
    episode_number: u32,
    record: Record,
}

impl Episode {
    pub fn new(season_number: u32, episode_number: u32) -> Self {
        Self {
            season_number,
            episode_number,
            record: Record::new(),
        }
    }

    pub fn season_number(&self) -> u32 {
        self.season_number
    }

    pub fn episode_number(&self) -> u32 {
        self.episode_number
    }

    /// Look up a field, raising `AttributeNotFound` when absent.
    pub fn get(&self, name: &str) -> Result<&FieldValue> {
        self.record.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.record.set(name, value);
    }

    pub fn episode_name(&self) -> Option<&str> {
        self.record.text("episodeName")
    }

    pub fn first_aired(&self) -> Option<&str> {
        self.record.text("firstAired")
    }

    pub fn overview(&self) -> Option<&str> {
        self.record.text("overview")
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.episode_name() {
            Some(name) => write!(
                f,
                "<Episode {:02}x{:02} - {:?}>",
                self.season_number, self.episode_number, name
            ),
            None => write!(
                f,
                "<Episode {:02}x{:02}>",
                self.season_number, self.episode_number
            ),
        }
    }
}
