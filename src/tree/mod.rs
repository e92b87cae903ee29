//! Secret tree — the in-memory hierarchy of folders and passwords.
//!
//! The tree is addressed by slash-delimited paths (`work/email`) and is
//! rebuilt from the decrypted envelope on every engine operation, mutated,
//! re-encrypted, and discarded.  Nothing is cached between operations.

pub mod node;

pub use node::{SecretNode, MASK};
