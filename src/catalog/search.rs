//! Substring search over populated shows.
//!
//! Matching is case-insensitive and linear. An episode contributes at most
//! once no matter how many of its fields match, and results come back in
//! season order, then episode order.

use std::fmt::Display;

use tvindex_common::{Error, Result};

use super::episode::Episode;
use super::season::Season;
use super::show::Show;

fn needle(term: &str) -> Result<String> {
    if term.is_empty() {
        return Err(Error::MissingSearchTerm);
    }
    Ok(term.to_lowercase())
}

impl Episode {
    /// Return `Some(self)` if `term` occurs in the episode's data, limited to
    /// the `key` field when one is given.
    pub fn search(&self, term: &str, key: Option<&str>) -> Result<Option<&Episode>> {
        let needle = needle(term)?;
        Ok(self.record().matches(&needle, key).then_some(self))
    }
}

impl Season {
    pub fn search(&self, term: &str, key: Option<&str>) -> Result<Vec<&Episode>> {
        let needle = needle(term)?;
        let mut hits = Vec::new();
        self.collect_matches(&needle, key, &mut hits);
        Ok(hits)
    }

    fn collect_matches<'a>(&'a self, needle: &str, key: Option<&str>, hits: &mut Vec<&'a Episode>) {
        hits.extend(
            self.episodes()
                .filter(|episode| episode.record().matches(needle, key)),
        );
    }
}

impl Show {
    /// Search every episode of every season.
    ///
    /// ```
    /// use tvindex::catalog::IndexedCollection;
    /// use tvindex::catalog::CachePolicy;
    /// use tvindex::clock::SystemClock;
    /// use tvindex_common::ShowId;
    /// use std::sync::Arc;
    ///
    /// let mut coll = IndexedCollection::new(CachePolicy::default(), Arc::new(SystemClock));
    /// let id = ShowId::new(76156);
    /// coll.ensure_episode(id, 1, 1).set("episodeName", "My First Day");
    /// coll.ensure_episode(id, 1, 2).set("episodeName", "My Mentor");
    ///
    /// let show = coll.show(id).unwrap();
    /// let hits = show.search("mentor", Some("episodeName")).unwrap();
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].episode_number(), 2);
    /// ```
    pub fn search(&self, term: &str, key: Option<&str>) -> Result<Vec<&Episode>> {
        let needle = needle(term)?;
        let mut hits = Vec::new();
        for season in self.seasons() {
            season.collect_matches(&needle, key, &mut hits);
        }
        Ok(hits)
    }

    /// Episodes whose `firstAired` contains `date`.
    ///
    /// Raises `EpisodeNotFound` when nothing aired on that date.
    pub fn aired_on(&self, date: impl Display) -> Result<Vec<&Episode>> {
        let date = date.to_string();
        let hits = self.search(&date, Some("firstAired"))?;
        if hits.is_empty() {
            return Err(Error::episode_not_found(format!(
                "that aired on {date}"
            )));
        }
        Ok(hits)
    }
}
