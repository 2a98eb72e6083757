//! In-memory show catalog.
//!
//! Shows are indexed as show, season, episode, with the raw catalog fields
//! kept as [`Record`]s at each level. A bounded insertion-order cache caps
//! how many shows stay resident.
//!
//! # Module layout
//!
//! - [`record`] -- Field values, flat records and actors.
//! - [`show`], [`season`], [`episode`] -- Hierarchy nodes.
//! - [`cache`] -- Bounded insertion-order cache with debounced sweeps.
//! - [`collection`] -- Three-level index with separate read and write paths.
//! - [`resolver`] -- Name to identifier resolution with a correction map.
//! - [`gate`] -- Per-key async gates that coalesce concurrent work.
//! - [`populate`] -- Filling the collection from a [`CatalogSource`].
//! - [`search`] -- Substring search and air-date lookup.
//!
//! [`CatalogSource`]: crate::provider::CatalogSource

pub mod cache;
pub mod collection;
pub mod episode;
pub mod gate;
pub mod populate;
pub mod record;
pub mod resolver;
pub mod search;
pub mod season;
pub mod show;

pub use cache::{BoundedCache, CachePolicy, DEFAULT_CAPACITY, DEFAULT_SWEEP_INTERVAL};
pub use collection::IndexedCollection;
pub use episode::Episode;
pub use gate::{GatePass, KeyedGates};
pub use populate::{EpisodeOrder, PopulateOptions, PopulationEngine};
pub use record::{Actor, FieldValue, Record};
pub use resolver::{Resolution, Resolver};
pub use season::Season;
pub use show::{Show, ShowEntry, ACTORS_KEY, BANNERS_KEY};
