//! Dotted-path navigation over a raw value tree.

use serde_json::{Map, Value};

/// Resolve a dotted path to a node, if present.
pub(crate) fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Write a value at a dotted path, or delete the subtree there with `None`.
///
/// Writes force every intermediate into a section, replacing scalars in the
/// way. Deletes stop silently when an intermediate is missing or not a
/// section: there is nothing below it to remove.
pub(crate) fn write(root: &mut Value, path: &str, value: Option<Value>) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = root;
    for segment in segments {
        let Some(map) = current.as_object_mut() else {
            return;
        };
        if value.is_none() {
            match map.get_mut(segment) {
                Some(entry) if entry.is_object() => current = entry,
                _ => return,
            }
        } else {
            let entry = map
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = entry;
        }
    }

    if let Some(map) = current.as_object_mut() {
        match value {
            Some(value) => {
                map.insert(last.to_string(), value);
            }
            None => {
                map.remove(last);
            }
        }
    }
}
