//! Throttled synchronization with the remote store.
//!
//! The gateway keeps the last fetched outcome in memory and skips a
//! real fetch when the previous one is younger than the refresh
//! interval.  It also owns the transport encoding: payloads persist as
//! base64 text so the remote (a line-oriented VCS) stores something
//! diff-safe, while callers only ever see raw blob bytes.
//!
//! There is no cross-process coordination: two processes racing on the
//! same remote can both fetch the same prior state and the second
//! publish silently wins.  That is an accepted limitation of the
//! design, not something the gateway tries to fix.

use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{KeyfoldError, Result};

use super::{RemoteStore, PAYLOAD_NAME};

/// Default minimum interval between real remote fetches.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(10);

/// Result of a fetch: the current blob, or nothing stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The remote holds an encrypted payload.
    Blob(Vec<u8>),
    /// First use — the remote has no payload; callers start from an
    /// empty tree.
    Empty,
}

/// Gateway between the engine and a remote store.
pub struct SyncGateway {
    remote: Box<dyn RemoteStore>,
    refresh: Duration,
    last_fetch: Option<Instant>,
    cached: Option<FetchOutcome>,
}

impl SyncGateway {
    /// Wrap a remote store with the default refresh interval.
    pub fn new(remote: impl RemoteStore + 'static) -> Self {
        Self::with_refresh(remote, DEFAULT_REFRESH)
    }

    /// Wrap a remote store with an explicit refresh interval.
    pub fn with_refresh(remote: impl RemoteStore + 'static, refresh: Duration) -> Self {
        Self {
            remote: Box::new(remote),
            refresh,
            last_fetch: None,
            cached: None,
        }
    }

    /// Fetch the current encrypted blob.
    ///
    /// Returns the cached outcome without touching the remote when the
    /// last successful fetch is younger than the refresh interval and
    /// `force` is not set.  A remote with no payload yields
    /// [`FetchOutcome::Empty`], not an error.
    pub fn fetch(&mut self, force: bool) -> Result<FetchOutcome> {
        if !force {
            if let (Some(at), Some(cached)) = (self.last_fetch, &self.cached) {
                if at.elapsed() < self.refresh {
                    return Ok(cached.clone());
                }
            }
        }

        let outcome = match self.remote.read(PAYLOAD_NAME)? {
            None => FetchOutcome::Empty,
            Some(text) => match decode_payload(&text)? {
                None => FetchOutcome::Empty,
                Some(blob) => FetchOutcome::Blob(blob),
            },
        };

        self.last_fetch = Some(Instant::now());
        self.cached = Some(outcome.clone());
        Ok(outcome)
    }

    /// Publish a new encrypted blob with a commit message.
    ///
    /// No automatic retry: a failed publish surfaces to the caller, who
    /// decides whether to re-run the whole fetch-mutate-publish cycle.
    pub fn publish(&mut self, blob: &[u8], message: &str) -> Result<()> {
        let encoded = BASE64.encode(blob);
        self.remote.write(PAYLOAD_NAME, encoded.as_bytes(), message)?;

        // The remote now holds exactly what we wrote; keep the cache in
        // step so a fetch inside the refresh window sees our own write.
        self.cached = Some(FetchOutcome::Blob(blob.to_vec()));
        self.last_fetch = Some(Instant::now());
        Ok(())
    }

    /// The configured refresh interval.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh
    }
}

/// Decode the persisted base64 text into blob bytes.
///
/// An empty payload file counts as "nothing stored yet"; anything else
/// that fails to decode is a corrupted remote, not a first use.
fn decode_payload(text: &[u8]) -> Result<Option<Vec<u8>>> {
    let text = std::str::from_utf8(text)
        .map_err(|_| KeyfoldError::MalformedEnvelope("payload is not valid text".to_string()))?
        .trim();

    if text.is_empty() {
        return Ok(None);
    }

    BASE64
        .decode(text)
        .map(Some)
        .map_err(|e| KeyfoldError::MalformedEnvelope(format!("payload is not valid base64: {e}")))
}
