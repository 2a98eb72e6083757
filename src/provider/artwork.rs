/// Default prefix for relative artwork paths.
pub const DEFAULT_ARTWORK_URL: &str = "http://thetvdb.com/banners";

/// Turns relative artwork paths into absolute URLs under a fixed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkUrls {
    prefix: String,
}

impl ArtworkUrls {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn rewrite(&self, path: &str) -> String {
        format!("{}/{}", self.prefix, path.trim_start_matches('/'))
    }
}

impl Default for ArtworkUrls {
    fn default() -> Self {
        Self::new(DEFAULT_ARTWORK_URL)
    }
}
