//! Typed, path-addressed operations over a backing store.

#[cfg(test)]
mod tests;

use crate::ConfigError;
use crate::store::ConfigStore;
use crate::value::{FromValue, ValueKind};
use serde_json::Value;
use std::collections::BTreeSet;

/// Typed accessor over a backing configuration tree.
///
/// Reads classify the raw value's tag against the requested type and fail
/// on any mismatch; mutating calls persist through the store before
/// returning. The accessor keeps no tree state of its own.
///
/// Not synchronized: callers sharing one store across threads must
/// serialize access themselves.
pub struct Config<S> {
    store: S,
}

impl<S: ConfigStore> Config<S> {
    /// Wrap a backing store. Pass `&mut store` to keep ownership outside.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the backing store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Core read: fetch the raw value at `path` and check its tag.
    ///
    /// Absent paths fail with [`ConfigError::PathNotFound`] when `strict`
    /// and yield `default` otherwise. A present value whose tag differs
    /// from `T`'s fails with [`ConfigError::TypeMismatch`] regardless of
    /// `strict`.
    pub fn lookup<T: FromValue>(
        &self,
        path: &str,
        default: Option<T>,
        strict: bool,
    ) -> Result<Option<T>, ConfigError> {
        let Some(raw) = self.store.raw_get(path) else {
            if strict {
                return Err(ConfigError::PathNotFound {
                    path: path.to_string(),
                });
            }
            return Ok(default);
        };
        typed(path, raw).map(Some)
    }

    /// Lenient read with no default: `Ok(None)` when absent.
    pub fn get<T: FromValue>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        self.lookup(path, None, false)
    }

    /// Strict read: the path must hold a value of the requested type.
    pub fn get_required<T: FromValue>(&self, path: &str) -> Result<T, ConfigError> {
        self.lookup(path, None, true)?
            .ok_or_else(|| ConfigError::PathNotFound {
                path: path.to_string(),
            })
    }

    /// Lenient read substituting `default` when the path is absent.
    pub fn get_or<T: FromValue>(&self, path: &str, default: T) -> Result<T, ConfigError> {
        Ok(self.lookup(path, None, false)?.unwrap_or(default))
    }

    /// Lenient read for paths that may be intentionally unset.
    ///
    /// Behaves exactly like [`Config::get`]; kept as a separate entry point
    /// for call sites reading optional, defaulted settings.
    pub fn get_default<T: FromValue>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        self.lookup(path, None, false)
    }

    /// Write `value` at `path`, overwriting any existing subtree, then
    /// persist.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        self.store.raw_set(path, Some(value.into()));
        self.store.persist()
    }

    /// Whether a value or section exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.store.contains_path(path)
    }

    /// Typed list read, order preserved.
    ///
    /// Absent paths and non-list values yield `Ok(None)`. One mismatching
    /// element fails the whole call; no partial list is returned.
    pub fn get_list<T: FromValue>(&self, path: &str) -> Result<Option<Vec<T>>, ConfigError> {
        let Some(Value::Array(items)) = self.store.raw_get(path) else {
            return Ok(None);
        };
        let mut typed_items = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            typed_items.push(typed(&format!("{path}[{idx}]"), item)?);
        }
        Ok(Some(typed_items))
    }

    /// Delete every top-level key, then persist once.
    ///
    /// Shallow by contract: nested sections disappear with their key, no
    /// recursive enumeration happens.
    pub fn clear(&mut self) -> Result<(), ConfigError> {
        for key in self.store.top_level_keys() {
            self.store.raw_set(&key, None);
        }
        self.store.persist()
    }

    /// Drop unsaved mutations and reload the tree from durable storage.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        self.store.reload()
    }

    /// Assert that the string at `path` equals `expected`.
    ///
    /// Absence, a non-string value, and inequality all collapse into
    /// [`ConfigError::InvalidValue`]; nothing is returned on success.
    pub fn validate(&self, path: &str, expected: &str) -> Result<(), ConfigError> {
        let value = self.lookup::<String>(path, None, false).ok().flatten();
        match value {
            Some(value) if value == expected => Ok(()),
            _ => Err(ConfigError::InvalidValue {
                path: path.to_string(),
            }),
        }
    }

    /// Top-level key names, not recursive.
    pub fn keys(&self) -> BTreeSet<String> {
        self.store.top_level_keys()
    }

    /// Persist the current tree unconditionally.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.store.persist()
    }

    /// Read a value nested below `path`, descending one segment at a time.
    ///
    /// Every intermediate must be a section while segments remain, else
    /// [`ConfigError::PathNotFound`] names the failing segment. An absent
    /// terminal yields `Ok(None)`; a present one must match `T`'s tag.
    pub fn get_nested<T: FromValue>(
        &self,
        path: &str,
        nested: &[&str],
    ) -> Result<Option<T>, ConfigError> {
        let mut current = self.store.raw_get(path);
        for segment in nested {
            let Some(Value::Object(section)) = current else {
                return Err(ConfigError::PathNotFound {
                    path: format!("{segment} (in section {path})"),
                });
            };
            current = section.get(*segment);
        }
        let Some(raw) = current else {
            return Ok(None);
        };
        typed(path, raw).map(Some)
    }

    /// Write `value` only when `path` is currently absent.
    ///
    /// A present path is left untouched and nothing is persisted.
    pub fn set_default(&mut self, path: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        if self.store.contains_path(path) {
            return Ok(());
        }
        self.set(path, value)
    }

    /// Delete the subtree at `path`, then persist.
    pub fn remove(&mut self, path: &str) -> Result<(), ConfigError> {
        self.store.raw_set(path, None);
        self.store.persist()
    }

    /// Live view onto the section at `path`, or `None` when the raw value
    /// there is absent or not a section.
    pub fn section(&mut self, path: &str) -> Option<Section<'_, S>> {
        if !self.is_section(path) {
            return None;
        }
        Some(Section {
            config: self,
            base: path.to_string(),
        })
    }

    /// Whether `path` is explicitly set in the store.
    pub fn is_valid_path(&self, path: &str) -> bool {
        self.store.is_set(path)
    }

    /// Whether the raw value at `path` is a list.
    pub fn is_list(&self, path: &str) -> bool {
        matches!(self.store.raw_get(path), Some(Value::Array(_)))
    }

    /// Whether the raw value at `path` is a section.
    pub fn is_section(&self, path: &str) -> bool {
        matches!(self.store.raw_get(path), Some(Value::Object(_)))
    }
}

/// Check a raw value's tag against `T` and extract it.
fn typed<T: FromValue>(path: &str, raw: &Value) -> Result<T, ConfigError> {
    T::from_value(raw).ok_or_else(|| ConfigError::TypeMismatch {
        path: path.to_string(),
        expected: T::expected(),
        actual: ValueKind::of(raw),
    })
}

/// Live, mutable view onto one section of the tree.
///
/// Paths are relative to the section base; reads and writes go through the
/// underlying store, so the view never holds a copy.
pub struct Section<'a, S> {
    config: &'a mut Config<S>,
    base: String,
}

impl<S: ConfigStore> Section<'_, S> {
    /// Dotted path of this section from the root.
    pub fn path(&self) -> &str {
        &self.base
    }

    fn full(&self, path: &str) -> String {
        format!("{}.{path}", self.base)
    }

    /// Lenient typed read relative to this section.
    pub fn get<T: FromValue>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        self.config.get(&self.full(path))
    }

    /// Strict typed read relative to this section.
    pub fn get_required<T: FromValue>(&self, path: &str) -> Result<T, ConfigError> {
        self.config.get_required(&self.full(path))
    }

    /// Write relative to this section, persisting through the store.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        self.config.set(&self.full(path), value)
    }

    /// Whether a value exists relative to this section.
    pub fn contains(&self, path: &str) -> bool {
        self.config.contains(&self.full(path))
    }

    /// Key names directly under this section.
    pub fn keys(&self) -> BTreeSet<String> {
        match self.config.store.raw_get(&self.base) {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Descend into a nested section.
    pub fn section(&mut self, path: &str) -> Option<Section<'_, S>> {
        let full = self.full(path);
        self.config.section(&full)
    }
}
