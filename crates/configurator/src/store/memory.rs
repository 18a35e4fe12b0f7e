//! In-memory store with an explicit durable snapshot.

use super::{ConfigStore, path};
use crate::ConfigError;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Tree store held entirely in memory.
///
/// `persist` copies the live tree into a snapshot and `reload` restores
/// from it, so unsaved mutations are dropped on reload exactly as they
/// would be with a file-backed store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    live: Value,
    saved: Value,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::seeded(Value::Object(Map::new()))
    }

    /// Store seeded with an initial tree, treated as already persisted.
    /// A non-object root is replaced with an empty section.
    pub fn seeded(root: Value) -> Self {
        let root = if root.is_object() {
            root
        } else {
            Value::Object(Map::new())
        };
        Self {
            live: root.clone(),
            saved: root,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for MemoryStore {
    fn raw_get(&self, p: &str) -> Option<&Value> {
        path::resolve(&self.live, p)
    }

    fn raw_set(&mut self, p: &str, value: Option<Value>) {
        path::write(&mut self.live, p, value);
    }

    fn top_level_keys(&self) -> BTreeSet<String> {
        match &self.live {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => BTreeSet::new(),
        }
    }

    // No defaults layer, so set and present coincide.
    fn is_set(&self, p: &str) -> bool {
        self.contains_path(p)
    }

    fn persist(&mut self) -> Result<(), ConfigError> {
        self.saved = self.live.clone();
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.live = self.saved.clone();
        Ok(())
    }
}
