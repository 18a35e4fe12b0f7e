//! File-backed store: JSON5 in, pretty-printed JSON out.

use super::{ConfigStore, path};
use crate::ConfigError;
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Store persisting its tree to a single file on disk.
///
/// Files are parsed as JSON5, so hand-edited configs may carry comments and
/// trailing commas; persisted output is plain pretty-printed JSON. A missing
/// file opens as an empty tree and comes into existence on first persist.
#[derive(Debug)]
pub struct JsonFileStore {
    file: PathBuf,
    root: Value,
}

impl JsonFileStore {
    /// Open a store backed by the given file, loading it when it exists.
    pub fn open(file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = file.as_ref().to_path_buf();
        let root = read_tree(&file)?;
        info!("opened config store (file={})", file.display());
        Ok(Self { file, root })
    }

    /// Location this store persists to.
    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl ConfigStore for JsonFileStore {
    fn raw_get(&self, p: &str) -> Option<&Value> {
        path::resolve(&self.root, p)
    }

    fn raw_set(&mut self, p: &str, value: Option<Value>) {
        path::write(&mut self.root, p, value);
    }

    fn top_level_keys(&self) -> BTreeSet<String> {
        match &self.root {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => BTreeSet::new(),
        }
    }

    fn is_set(&self, p: &str) -> bool {
        self.contains_path(p)
    }

    fn persist(&mut self) -> Result<(), ConfigError> {
        let rendered = serde_json::to_string_pretty(&self.root)?;
        fs::write(&self.file, rendered)?;
        debug!("persisted config (file={})", self.file.display());
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.root = read_tree(&self.file)?;
        info!("reloaded config (file={})", self.file.display());
        Ok(())
    }
}

/// Read and parse the tree, treating a missing file as empty.
fn read_tree(file: &Path) -> Result<Value, ConfigError> {
    if !file.exists() {
        debug!("config file missing, starting empty (file={})", file.display());
        return Ok(Value::Object(Map::new()));
    }
    let contents = fs::read_to_string(file)?;
    let root: Value = json5::from_str(&contents)?;
    if !root.is_object() {
        return Err(ConfigError::Invalid(format!(
            "root of {} must be an object",
            file.display()
        )));
    }
    Ok(root)
}
