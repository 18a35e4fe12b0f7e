//! Backing store interface and the bundled tree stores.

mod json_file;
mod memory;
pub(crate) mod path;


pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::ConfigError;
use serde_json::Value;
use std::collections::BTreeSet;

/// Minimal interface the accessor needs from a configuration tree.
///
/// Implementations own the in-memory tree and its durable location. The
/// accessor never touches durable storage itself; it calls `persist` after
/// mutations and `reload` on demand.
pub trait ConfigStore {
    /// Raw value at a dotted path, if present.
    fn raw_get(&self, path: &str) -> Option<&Value>;

    /// Write (`Some`) or delete (`None`) the subtree at a dotted path.
    ///
    /// Writes create intermediate sections as needed; deleting below a
    /// missing or non-section intermediate is a no-op.
    fn raw_set(&mut self, path: &str, value: Option<Value>);

    /// Whether any value or section exists at the path.
    fn contains_path(&self, path: &str) -> bool {
        self.raw_get(path).is_some()
    }

    /// Names of the top-level keys, not recursive.
    fn top_level_keys(&self) -> BTreeSet<String>;

    /// Whether the path was explicitly set, under the store's own
    /// set-vs-defaulted semantics.
    fn is_set(&self, path: &str) -> bool;

    /// Flush the in-memory tree to durable storage.
    fn persist(&mut self) -> Result<(), ConfigError>;

    /// Discard the in-memory tree and reload it from durable storage.
    fn reload(&mut self) -> Result<(), ConfigError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &mut S {
    fn raw_get(&self, path: &str) -> Option<&Value> {
        (**self).raw_get(path)
    }

    fn raw_set(&mut self, path: &str, value: Option<Value>) {
        (**self).raw_set(path, value)
    }

    fn contains_path(&self, path: &str) -> bool {
        (**self).contains_path(path)
    }

    fn top_level_keys(&self) -> BTreeSet<String> {
        (**self).top_level_keys()
    }

    fn is_set(&self, path: &str) -> bool {
        (**self).is_set(path)
    }

    fn persist(&mut self) -> Result<(), ConfigError> {
        (**self).persist()
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        (**self).reload()
    }
}
