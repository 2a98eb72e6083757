//! Filling the collection from a remote source.
//!
//! Population runs in phases: metadata, the optional banner and actor
//! augmentations, then episodes. Each phase fetches without holding the
//! collection lock and writes its results under one short lock. A failed
//! phase leaves earlier phases' data in place. Only the metadata phase
//! creates the show; if a sweep evicts it mid-run, later phases stop.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tvindex_common::{Error, Language, Result, ShowId};

use super::collection::IndexedCollection;
use super::record::{FieldValue, Record};
use super::show::{ACTORS_KEY, BANNERS_KEY};
use crate::provider::{ArtworkUrls, CatalogSource};

/// Metadata fields holding a relative artwork path.
const METADATA_ARTWORK_FIELDS: [&str; 3] = ["banner", "fanart", "poster"];

/// Which numbering places an episode into a season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeOrder {
    /// Broadcast numbering (`airedSeason` / `airedEpisodeNumber`).
    #[default]
    Aired,
    /// Disc numbering (`dvdSeason` / `dvdEpisodeNumber`).
    Dvd,
}

impl EpisodeOrder {
    /// Field names carrying the season and episode number.
    pub fn fields(self) -> (&'static str, &'static str) {
        match self {
            EpisodeOrder::Aired => ("airedSeason", "airedEpisodeNumber"),
            EpisodeOrder::Dvd => ("dvdSeason", "dvdEpisodeNumber"),
        }
    }

    /// Season and episode number of `record` under this ordering, or `None`
    /// when either is missing, null or not a whole number.
    pub fn position(self, record: &Record) -> Option<(u32, u32)> {
        let (season_field, episode_field) = self.fields();
        let season = record.get(season_field).ok()?.as_index()?;
        let episode = record.get(episode_field).ok()?.as_index()?;
        Some((season, episode))
    }
}

/// Which optional augmentations a population run performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateOptions {
    pub order: EpisodeOrder,
    pub banners: bool,
    pub actors: bool,
}

pub struct PopulationEngine {
    source: Arc<dyn CatalogSource>,
    artwork: ArtworkUrls,
    options: PopulateOptions,
}

impl PopulationEngine {
    pub fn new(source: Arc<dyn CatalogSource>, artwork: ArtworkUrls, options: PopulateOptions) -> Self {
        Self {
            source,
            artwork,
            options,
        }
    }

    pub fn options(&self) -> PopulateOptions {
        self.options
    }

    /// Fetch everything known about `id` and write it into `collection`.
    ///
    /// A metadata failure aborts before anything is written. Later failures
    /// abort the run but keep what earlier phases wrote.
    pub async fn populate(
        &self,
        collection: &Mutex<IndexedCollection>,
        id: ShowId,
        language: Language,
    ) -> Result<()> {
        debug!(%id, source = self.source.name(), "Getting all series data");
        let metadata = self.source.fetch_metadata(id, language).await?;
        {
            let mut collection = collection.lock();
            let show = collection.ensure_show(id);
            for (name, value) in metadata.iter() {
                show.set_data(name, self.metadata_value(name, value));
            }
        }

        if self.options.banners {
            debug!(%id, "Getting banners");
            let infos = self.source.fetch_banners(id).await?;
            let index = self.banner_index(&infos);
            collection
                .lock()
                .show_mut(id)
                .ok_or_else(|| evicted(id, "banners"))?
                .set_data(BANNERS_KEY, index);
        }

        if self.options.actors {
            debug!(%id, "Getting actors");
            let actors: Vec<Record> = self
                .source
                .fetch_actors(id)
                .await?
                .iter()
                .map(|actor| self.actor_record(actor))
                .collect();
            collection
                .lock()
                .show_mut(id)
                .ok_or_else(|| evicted(id, "actors"))?
                .set_data(ACTORS_KEY, actors);
        }

        debug!(%id, order = ?self.options.order, "Getting all episodes");
        let items = self.source.fetch_episodes(id, language).await?;
        let mut placed = 0usize;
        let mut skipped = 0usize;
        {
            let mut collection = collection.lock();
            let show = collection
                .show_mut(id)
                .ok_or_else(|| evicted(id, "episodes"))?;
            for item in &items {
                let Some((season, number)) = self.options.order.position(item) else {
                    let (season_field, episode_field) = self.options.order.fields();
                    warn!(
                        %id,
                        season = %item.get(season_field).map(ToString::to_string).unwrap_or_default(),
                        episode = %item.get(episode_field).map(ToString::to_string).unwrap_or_default(),
                        "An episode has incomplete season/episode number, skipping"
                    );
                    skipped += 1;
                    continue;
                };

                let episode = show.ensure_season(season).ensure_episode(number);
                for (name, value) in item.iter() {
                    if name == "filename" {
                        episode.set(name, self.rewrite_value(value));
                    } else {
                        episode.set(name, value.clone());
                    }
                }
                placed += 1;
            }
        }

        info!(%id, episodes = placed, skipped, "Populated show");
        Ok(())
    }

    fn rewrite_value(&self, value: &FieldValue) -> FieldValue {
        match value {
            FieldValue::Text(path) if !path.is_empty() => self.artwork.rewrite(path).into(),
            other => other.clone(),
        }
    }

    fn metadata_value(&self, name: &str, value: &FieldValue) -> FieldValue {
        if METADATA_ARTWORK_FIELDS.contains(&name) {
            self.rewrite_value(value)
        } else {
            value.clone()
        }
    }

    fn actor_record(&self, actor: &Record) -> Record {
        actor
            .iter()
            .map(|(name, value)| {
                let value = if name == "image" {
                    self.rewrite_value(value)
                } else {
                    value.clone()
                };
                (name, value)
            })
            .collect()
    }

    /// Nest banner infos as `keyType -> resolution -> id -> fields`.
    fn banner_index(&self, infos: &[Record]) -> FieldValue {
        let mut index: BTreeMap<String, BTreeMap<String, BTreeMap<String, Record>>> =
            BTreeMap::new();

        for info in infos {
            let key_type = present(info, "keyType");
            let resolution = present(info, "resolution");
            let (Some(key_type), Some(resolution)) = (key_type, resolution) else {
                continue;
            };
            let banner_id = present(info, "id").unwrap_or_default();

            let entry = index
                .entry(key_type)
                .or_default()
                .entry(resolution)
                .or_default()
                .entry(banner_id)
                .or_default();

            if let Ok(file_name) = info.get("fileName") {
                entry.set("bannerpath", file_name.clone());
            }
            let derived: Vec<(String, FieldValue)> = entry
                .iter()
                .filter(|(name, _)| name.ends_with("path") && !name.starts_with('_'))
                .map(|(name, value)| (format!("_{name}"), self.rewrite_value(value)))
                .collect();
            for (name, value) in derived {
                debug!(field = %name, "Transforming banner path");
                entry.set(name, value);
            }
        }

        index
            .into_iter()
            .map(|(key_type, by_resolution)| {
                let by_resolution = by_resolution
                    .into_iter()
                    .map(|(resolution, by_id)| {
                        let by_id = by_id
                            .into_iter()
                            .map(|(banner_id, record)| (banner_id, FieldValue::from(record)))
                            .collect::<BTreeMap<_, _>>();
                        (resolution, FieldValue::from(by_id))
                    })
                    .collect::<BTreeMap<_, _>>();
                (key_type, FieldValue::from(by_resolution))
            })
            .collect::<BTreeMap<_, _>>()
            .into()
    }
}

fn evicted(id: ShowId, phase: &str) -> Error {
    warn!(%id, phase, "Show was evicted during population, stopping");
    Error::show_not_found(format!("show {id} was evicted during population"))
}

/// Text form of a non-null field.
fn present(record: &Record, name: &str) -> Option<String> {
    match record.get(name).ok()? {
        FieldValue::Null => None,
        value => Some(value.search_text().into_owned()),
    }
}
