//! Remote store backends and the throttled sync gateway.
//!
//! The engine only ever needs two capabilities from its persistence
//! layer: read the current payload, and replace it while recording a
//! human-readable message.  `RemoteStore` captures exactly that;
//! everything about transports, cloning, and commit mechanics stays
//! behind it.

pub mod dir;
pub mod gateway;
pub mod git;

pub use dir::DirRemote;
pub use gateway::{FetchOutcome, SyncGateway, DEFAULT_REFRESH};
pub use git::GitRemote;

use crate::errors::Result;

/// Logical name of the payload inside the remote store.
pub const PAYLOAD_NAME: &str = "data.dat";

/// An abstract versioned store holding a single payload.
pub trait RemoteStore {
    /// Read the current payload, or `None` if it has never been written.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the payload, recording `message` in the store's own
    /// history mechanism.
    fn write(&self, name: &str, data: &[u8], message: &str) -> Result<()>;
}
