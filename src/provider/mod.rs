//! Remote catalog collaborators.
//!
//! The catalog core depends only on the [`CatalogSource`] and
//! [`SeriesSelector`] traits defined here.
//!
//! # Module layout
//!
//! - [`source`] -- Source trait and search candidate type.
//! - [`selector`] -- Candidate disambiguation strategies.
//! - [`artwork`] -- Relative artwork path rewriting.
//! - [`breaker`] -- Transport cool-down check.
//! - [`tvdb`] -- HTTP client for TheTVDB.

pub mod artwork;
pub mod breaker;
pub mod selector;
pub mod source;
pub mod tvdb;

pub use artwork::{ArtworkUrls, DEFAULT_ARTWORK_URL};
pub use breaker::{TimeoutBreaker, DEFAULT_COOL_DOWN};
pub use selector::{FirstResult, SeriesSelector};
pub use source::{CatalogSource, SeriesCandidate};
pub use tvdb::TvdbClient;
