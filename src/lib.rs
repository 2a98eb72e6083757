//! tvindex - TheTVDB show catalog with a bounded in-memory cache
//!
//! Look shows up by id or name and walk them as show, season, episode:
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use std::sync::Arc;
//! use tvindex::clock::SystemClock;
//! use tvindex::config::Config;
//! use tvindex::provider::{TimeoutBreaker, DEFAULT_COOL_DOWN};
//! use tvindex::session::Catalog;
//!
//! let config = Config::default();
//! let breaker = Arc::new(TimeoutBreaker::new(DEFAULT_COOL_DOWN, Arc::new(SystemClock)));
//! let catalog = Catalog::from_config(&config, breaker)?;
//!
//! let show = catalog.lookup("scrubs").await?;
//! let episode = show.season(1)?.episode(24)?;
//! println!("{episode}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod clock;
pub mod config;
pub mod provider;
pub mod session;

pub use catalog::{Episode, FieldValue, Record, Season, Show};
pub use session::{Catalog, CatalogBuilder};
pub use tvindex_common::{Error, Language, Result, ShowId, ShowKey};
