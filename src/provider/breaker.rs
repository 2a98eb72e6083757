//! Transport cool-down shared by every session built from one owner.
//!
//! When the remote catalog times out, new sessions refuse to start for a
//! cool-down period instead of hammering it again. The breaker is an explicit
//! object passed around by `Arc`, so independent owners (and tests) never see
//! each other's failures.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::warn;
use tvindex_common::{Error, Result};

use crate::clock::Clock;

/// Default cool-down after a transport failure.
pub const DEFAULT_COOL_DOWN: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct TimeoutBreaker {
    last_failure: Mutex<Option<Instant>>,
    cool_down: Duration,
    clock: Arc<dyn Clock>,
}

impl TimeoutBreaker {
    pub fn new(cool_down: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            last_failure: Mutex::new(None),
            cool_down,
            clock,
        }
    }

    /// Note a transport-level failure now.
    pub fn record_failure(&self) {
        warn!(cool_down_secs = self.cool_down.as_secs(), "Recording transport failure");
        *self.last_failure.lock() = Some(self.clock.now());
    }

    /// Fail with `RecentTimeout` if a failure happened within the cool-down,
    /// unless `force` is set.
    pub fn check(&self, force: bool) -> Result<()> {
        if force {
            return Ok(());
        }
        let Some(at) = *self.last_failure.lock() else {
            return Ok(());
        };
        let elapsed = self.clock.now().duration_since(at);
        if elapsed < self.cool_down {
            let remaining = (self.cool_down - elapsed).as_secs().max(1);
            return Err(Error::RecentTimeout(remaining));
        }
        Ok(())
    }
}
