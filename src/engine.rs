//! The secret-store engine.
//!
//! Every operation is one complete fetch → decrypt → mutate → encrypt →
//! publish cycle.  The tree is rebuilt from the remote's blob each
//! time and discarded afterwards — the remote repository, not process
//! memory, is the system of record.

use crate::crypto::envelope;
use crate::crypto::KeyMaterial;
use crate::errors::Result;
use crate::remote::{FetchOutcome, SyncGateway};
use crate::tree::SecretNode;

/// Commit message recorded when the caller does not supply one.
pub const DEFAULT_COMMIT_MESSAGE: &str = "nothing important";

/// The engine: key material plus a sync gateway.
pub struct Engine {
    key: KeyMaterial,
    gateway: SyncGateway,
}

impl Engine {
    pub fn new(key: KeyMaterial, gateway: SyncGateway) -> Self {
        Self { key, gateway }
    }

    /// Render the whole tree as an indented listing.
    ///
    /// Values are masked unless `secure` is false.
    pub fn list_keys(&mut self, secure: bool) -> Result<String> {
        let tree = self.current_tree()?;
        Ok(tree.render(secure))
    }

    /// Look up the secret value stored at `path`.
    ///
    /// Returns `Ok(None)` when the path does not resolve or the node
    /// holds no value — a missing secret is a normal negative result,
    /// not an error.
    pub fn get(&mut self, path: &str) -> Result<Option<String>> {
        let tree = self.current_tree()?;
        Ok(tree.get(path).and_then(|node| node.value.clone()))
    }

    /// Insert or overwrite the secret at `path`, then publish.
    pub fn add(&mut self, path: &str, value: &str, message: Option<&str>) -> Result<()> {
        let mut tree = self.current_tree()?;
        tree.add(path, value)?;
        self.publish_tree(&tree, message)
    }

    /// Remove the node at `path` (and everything beneath it), then
    /// publish.
    pub fn delete(&mut self, path: &str, message: Option<&str>) -> Result<()> {
        let mut tree = self.current_tree()?;
        tree.delete(path)?;
        self.publish_tree(&tree, message)
    }

    /// Fetch and decrypt the current tree; an empty remote yields a
    /// fresh empty tree.
    fn current_tree(&mut self) -> Result<SecretNode> {
        match self.gateway.fetch(false)? {
            FetchOutcome::Empty => Ok(SecretNode::root()),
            FetchOutcome::Blob(blob) => envelope::open(&blob, self.key.as_bytes()),
        }
    }

    fn publish_tree(&mut self, tree: &SecretNode, message: Option<&str>) -> Result<()> {
        let blob = envelope::seal(tree, self.key.as_bytes())?;
        self.gateway
            .publish(&blob, message.unwrap_or(DEFAULT_COMMIT_MESSAGE))
    }
}
