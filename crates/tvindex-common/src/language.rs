//! Languages served by the remote catalog.
//!
//! The table is static and hard-coded to avoid an extra request per session.
//! TVDB links need the numeric language id, so the abbreviation is mapped to
//! it here.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{Error, Result};

const LANGUAGES: &[(&str, u32)] = &[
    ("da", 10),
    ("fi", 11),
    ("nl", 13),
    ("de", 14),
    ("it", 15),
    ("es", 16),
    ("fr", 17),
    ("pl", 18),
    ("hu", 19),
    ("el", 20),
    ("tr", 21),
    ("ru", 22),
    ("he", 24),
    ("ja", 25),
    ("pt", 26),
    ("zh", 27),
    ("cs", 28),
    ("sl", 30),
    ("hr", 31),
    ("ko", 32),
    ("en", 7),
    ("sv", 8),
    ("no", 9),
];

/// A validated two-letter catalog language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Language(&'static str);

impl Language {
    /// English, the default language.
    pub const ENGLISH: Language = Language("en");

    /// Validate an abbreviation against the supported table.
    pub fn parse(abbrev: &str) -> Result<Self> {
        LANGUAGES
            .iter()
            .find(|(code, _)| *code == abbrev)
            .map(|(code, _)| Language(code))
            .ok_or_else(|| Error::InvalidLanguage(abbrev.to_string(), Self::supported().join(", ")))
    }

    /// All supported abbreviations, in table order.
    pub fn supported() -> Vec<&'static str> {
        LANGUAGES.iter().map(|(code, _)| *code).collect()
    }

    /// The two-letter abbreviation.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// The numeric TVDB language id.
    pub fn tvdb_id(&self) -> u32 {
        LANGUAGES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, id)| *id)
            .unwrap_or(7)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::ENGLISH
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Self::parse(&code).map_err(serde::de::Error::custom)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0.to_string()
    }
}
