//! tvindex-common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across tvindex:
//!
//! - **Typed IDs**: [`ShowId`] for catalog entries and [`ShowKey`] for
//!   consumer lookups that may be either an id or a name
//! - **Languages**: the fixed table of supported catalog languages
//! - **Error Handling**: the catalog error taxonomy and result alias
//!
//! # Examples
//!
//! ```
//! use tvindex_common::{Error, Language, Result, ShowId, ShowKey};
//!
//! assert_eq!(ShowKey::from(76156u64), ShowKey::Id(ShowId::new(76156)));
//! assert_eq!(ShowKey::from("24"), ShowKey::name("24"));
//!
//! let lang = Language::parse("de").unwrap();
//! assert_eq!(lang.tvdb_id(), 14);
//!
//! fn example() -> Result<()> {
//!     Err(Error::show_not_found("No Such Show"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod language;

pub use error::{Error, Result};
pub use ids::*;
pub use language::Language;
