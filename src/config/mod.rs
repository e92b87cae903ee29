//! Configuration — where the key lives and which remote to sync with.

pub mod settings;

pub use settings::{Backend, Settings};
