//! Typed identifiers for catalog entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a catalog entry (a show), unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(u64);

impl ShowId {
    /// Wrap a raw numeric identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ShowId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<ShowId> for u64 {
    fn from(id: ShowId) -> Self {
        id.0
    }
}

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShowId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// What a consumer asks the catalog for: an identifier or a show name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShowKey {
    /// Identifier-shaped key; looked up directly.
    Id(ShowId),
    /// Human-readable name; resolved through search first.
    Name(String),
}

impl ShowKey {
    /// Build a name key.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl From<ShowId> for ShowKey {
    fn from(id: ShowId) -> Self {
        Self::Id(id)
    }
}

impl From<u64> for ShowKey {
    fn from(raw: u64) -> Self {
        Self::Id(ShowId(raw))
    }
}

/// Text is always a name, even when it is all digits.
impl From<&str> for ShowKey {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for ShowKey {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl fmt::Display for ShowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}
