//! Disambiguation between multiple search candidates.

use tracing::debug;
use tvindex_common::{Error, Result};

use super::source::SeriesCandidate;

/// Picks one show out of a non-empty candidate list.
///
/// Interactive front ends implement this to prompt the user; the library
/// default is [`FirstResult`]. Plain closures work too.
pub trait SeriesSelector: Send + Sync {
    fn select(&self, candidates: Vec<SeriesCandidate>) -> Result<SeriesCandidate>;
}

/// Always takes the first candidate, in the order the source returned them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstResult;

impl SeriesSelector for FirstResult {
    fn select(&self, candidates: Vec<SeriesCandidate>) -> Result<SeriesCandidate> {
        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::show_not_found("no candidates to select from"))?;
        debug!(id = %first.id, name = %first.display_name(), "Auto-selecting first search result");
        Ok(first)
    }
}

impl<F> SeriesSelector for F
where
    F: Fn(Vec<SeriesCandidate>) -> Result<SeriesCandidate> + Send + Sync,
{
    fn select(&self, candidates: Vec<SeriesCandidate>) -> Result<SeriesCandidate> {
        self(candidates)
    }
}
