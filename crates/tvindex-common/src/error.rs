//! Error types shared by every tvindex layer.
//!
//! The first five variants are the catalog lookup taxonomy and are surfaced
//! unchanged to callers of the lookup and search APIs. They are distinct on
//! purpose: a missing season, a missing episode and a missing attribute must
//! stay distinguishable.

/// Common error type for tvindex.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A show-name search returned zero candidates, or an id is unknown to the
    /// remote catalog.
    #[error("Show not found: {0}")]
    ShowNotFound(String),

    /// An integer-shaped key is absent from a show's season namespace.
    #[error("Could not find season {0}")]
    SeasonNotFound(String),

    /// An episode number is absent from a season, or a date query matched
    /// nothing.
    #[error("Could not find episode {0}")]
    EpisodeNotFound(String),

    /// A named field is absent from a show's metadata or from a record.
    #[error("Cannot find attribute {0}")]
    AttributeNotFound(String),

    /// The remote source failed outright.
    #[error("Fetch error [{what}]: {message}")]
    Fetch {
        /// What was being fetched (e.g. "series 76156").
        what: String,
        /// Human-readable failure description.
        message: String,
    },

    /// A search was started without a term.
    #[error("must supply a string to search for")]
    MissingSearchTerm,

    /// The requested language is not one the catalog serves.
    #[error("Invalid language {0}, options are: {1}")]
    InvalidLanguage(String, String),

    /// A transport failure happened within the cool-down window.
    #[error("Recently timed out, giving up early (retry in {0}s or force connect)")]
    RecentTimeout(u64),

    /// Invalid configuration or input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new ShowNotFound error.
    pub fn show_not_found<S: Into<String>>(msg: S) -> Self {
        Self::ShowNotFound(msg.into())
    }

    /// Create a new SeasonNotFound error for the given key.
    pub fn season_not_found(key: impl std::fmt::Display) -> Self {
        Self::SeasonNotFound(key.to_string())
    }

    /// Create a new EpisodeNotFound error.
    pub fn episode_not_found(what: impl std::fmt::Display) -> Self {
        Self::EpisodeNotFound(what.to_string())
    }

    /// Create a new AttributeNotFound error for the given field name.
    pub fn attribute_not_found<S: Into<String>>(name: S) -> Self {
        Self::AttributeNotFound(name.into())
    }

    /// Create a new Fetch error.
    pub fn fetch(what: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            what: what.into(),
            message: message.to_string(),
        }
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// True for the lookup-miss kinds (show, season, episode, attribute).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ShowNotFound(_)
                | Self::SeasonNotFound(_)
                | Self::EpisodeNotFound(_)
                | Self::AttributeNotFound(_)
        )
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
