//! Tests for the typed accessor.

use super::*;
use crate::store::MemoryStore;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Accessor over a seeded in-memory tree used by most tests.
fn seeded() -> Config<MemoryStore> {
    Config::new(MemoryStore::seeded(json!({
        "a": { "b": "x", "c": 5 },
        "name": "stanley",
        "port": 8080,
        "ratio": 0.5,
        "debug": true,
        "tags": ["alpha", "beta", "alpha"],
        "mixed": ["alpha", 7],
    })))
}

/// Store wrapper counting persist calls, for flush-exactly-once checks.
struct CountingStore {
    inner: MemoryStore,
    persists: usize,
}

impl CountingStore {
    fn seeded(root: serde_json::Value) -> Self {
        Self {
            inner: MemoryStore::seeded(root),
            persists: 0,
        }
    }
}

impl ConfigStore for CountingStore {
    fn raw_get(&self, path: &str) -> Option<&Value> {
        self.inner.raw_get(path)
    }

    fn raw_set(&mut self, path: &str, value: Option<Value>) {
        self.inner.raw_set(path, value)
    }

    fn top_level_keys(&self) -> BTreeSet<String> {
        self.inner.top_level_keys()
    }

    fn is_set(&self, path: &str) -> bool {
        self.inner.is_set(path)
    }

    fn persist(&mut self) -> Result<(), ConfigError> {
        self.persists += 1;
        self.inner.persist()
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.inner.reload()
    }
}

#[test]
fn strict_read_returns_exact_values() {
    let config = seeded();
    assert_eq!(config.get_required::<String>("name").expect("string"), "stanley");
    assert_eq!(config.get_required::<i64>("port").expect("integer"), 8080);
    assert_eq!(config.get_required::<f64>("ratio").expect("float"), 0.5);
    assert!(config.get_required::<bool>("debug").expect("boolean"));
}

#[test]
fn dotted_paths_reach_into_sections() {
    let config = seeded();
    assert_eq!(config.get_required::<String>("a.b").expect("string"), "x");
    assert_eq!(config.get_required::<i64>("a.c").expect("integer"), 5);
}

#[test]
fn absent_path_lenient_returns_default() {
    let config = seeded();
    assert_eq!(config.get_or("missing", 42).expect("default"), 42);
    assert_eq!(config.get::<i64>("missing").expect("lenient"), None);
    assert_eq!(
        config.lookup("missing", Some("fallback".to_string()), false).expect("lenient"),
        Some("fallback".to_string())
    );
}

#[test]
fn absent_path_strict_is_path_not_found() {
    let config = seeded();
    let err = config.get_required::<i64>("missing").unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
    assert!(format!("{err}").contains("missing"));
}

#[test]
fn type_mismatch_fails_regardless_of_strictness() {
    let config = seeded();
    for strict in [false, true] {
        let err = config.lookup::<String>("port", None, strict).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch {
                expected: ValueKind::String,
                actual: ValueKind::Integer,
                ..
            }
        ));
    }
    // A supplied default never masks a mismatch.
    let err = config.get_or("port", "oops".to_string()).unwrap_err();
    assert!(format!("{err}").contains("expected string, found integer"));
}

#[test]
fn integers_and_floats_do_not_cross() {
    let config = seeded();
    let err = config.get_required::<f64>("port").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TypeMismatch {
            expected: ValueKind::Float,
            actual: ValueKind::Integer,
            ..
        }
    ));
    let err = config.get_required::<i64>("ratio").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TypeMismatch {
            expected: ValueKind::Integer,
            actual: ValueKind::Float,
            ..
        }
    ));
}

#[test]
fn get_default_matches_plain_get() {
    let config = seeded();
    assert_eq!(
        config.get_default::<String>("name").expect("present"),
        config.get::<String>("name").expect("present")
    );
    assert_eq!(config.get_default::<String>("missing").expect("absent"), None);
}

#[test]
fn set_then_read_round_trips_with_one_persist() {
    let mut config = Config::new(CountingStore::seeded(json!({})));
    config.set("server.host", "localhost").expect("set");
    assert_eq!(
        config.get_required::<String>("server.host").expect("read"),
        "localhost"
    );
    assert_eq!(config.store().persists, 1);
}

#[test]
fn set_overwrites_whole_subtree() {
    let mut config = seeded();
    config.set("a", 9).expect("set");
    assert_eq!(config.get_required::<i64>("a").expect("scalar"), 9);
    assert!(!config.contains("a.b"));
}

#[test]
fn set_default_writes_only_when_absent() {
    let mut config = Config::new(CountingStore::seeded(json!({ "kept": "original" })));
    config.set_default("kept", "replacement").expect("noop");
    assert_eq!(config.get_required::<String>("kept").expect("read"), "original");
    assert_eq!(config.store().persists, 0);

    config.set_default("fresh", "seeded").expect("write");
    assert_eq!(config.get_required::<String>("fresh").expect("read"), "seeded");
    assert_eq!(config.store().persists, 1);
}

#[test]
fn clear_empties_top_level_with_one_persist() {
    let mut config = Config::new(CountingStore::seeded(json!({
        "a": { "b": "x" },
        "c": 1,
        "d": [true],
    })));
    config.clear().expect("clear");
    assert!(config.keys().is_empty());
    assert!(!config.contains("a.b"));
    assert_eq!(config.store().persists, 1);
}

#[test]
fn remove_deletes_and_persists() {
    let mut config = Config::new(CountingStore::seeded(json!({ "a": { "b": "x" } })));
    config.remove("a.b").expect("remove");
    assert!(!config.contains("a.b"));
    assert!(config.contains("a"));
    assert_eq!(config.store().persists, 1);
}

#[test]
fn save_persists_without_mutation() {
    let mut config = Config::new(CountingStore::seeded(json!({})));
    config.save().expect("save");
    config.save().expect("save");
    assert_eq!(config.store().persists, 2);
}

#[test]
fn list_read_preserves_order() {
    let config = seeded();
    let tags = config.get_list::<String>("tags").expect("list").expect("present");
    assert_eq!(tags, vec!["alpha", "beta", "alpha"]);
}

#[test]
fn list_with_one_bad_element_fails_whole_read() {
    let config = seeded();
    let err = config.get_list::<String>("mixed").unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    assert!(format!("{err}").contains("mixed[1]"));
}

#[test]
fn list_read_on_absent_or_non_list_is_none() {
    let config = seeded();
    assert_eq!(config.get_list::<String>("missing").expect("absent"), None);
    assert_eq!(config.get_list::<String>("name").expect("scalar"), None);
}

#[test]
fn nested_read_descends_sections() {
    let config = seeded();
    assert_eq!(
        config.get_nested::<String>("a", &["b"]).expect("nested"),
        Some("x".to_string())
    );
}

#[test]
fn nested_read_rejects_wrong_terminal_type() {
    let config = seeded();
    let err = config.get_nested::<String>("a", &["c"]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TypeMismatch {
            expected: ValueKind::String,
            actual: ValueKind::Integer,
            ..
        }
    ));
}

#[test]
fn nested_read_absent_terminal_is_none() {
    let config = seeded();
    assert_eq!(config.get_nested::<String>("a", &["z"]).expect("absent"), None);
}

#[test]
fn nested_read_through_scalar_is_path_not_found() {
    let config = seeded();
    let err = config.get_nested::<String>("name", &["b"]).unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
    assert!(format!("{err}").contains("b"));
}

#[test]
fn validate_asserts_string_equality() {
    let config = seeded();
    config.validate("a.b", "x").expect("equal");
    for path_and_expected in [("a.b", "y"), ("missing", "x"), ("port", "8080")] {
        let err = config.validate(path_and_expected.0, path_and_expected.1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}

#[test]
fn keys_lists_top_level_only() {
    let config = seeded();
    let keys: Vec<String> = config.keys().into_iter().collect();
    assert_eq!(keys, ["a", "debug", "mixed", "name", "port", "ratio", "tags"]);
}

#[test]
fn classification_queries_are_false_when_absent() {
    let config = seeded();
    assert!(config.is_list("tags"));
    assert!(!config.is_list("name"));
    assert!(config.is_section("a"));
    assert!(!config.is_section("tags"));
    assert!(!config.is_list("missing"));
    assert!(!config.is_section("missing"));
    assert!(config.is_valid_path("a.b"));
    assert!(!config.is_valid_path("missing"));
}

#[test]
fn section_view_is_live() {
    let mut config = seeded();
    let mut section = config.section("a").expect("section");
    assert_eq!(section.path(), "a");
    assert_eq!(section.get_required::<String>("b").expect("read"), "x");

    section.set("d", 7).expect("write");
    assert_eq!(section.keys().into_iter().collect::<Vec<_>>(), ["b", "c", "d"]);
    // Writes through the view are visible at the root.
    assert_eq!(config.get_required::<i64>("a.d").expect("root read"), 7);
}

#[test]
fn section_view_absent_or_scalar_is_none() {
    let mut config = seeded();
    assert!(config.section("missing").is_none());
    assert!(config.section("name").is_none());
}

#[test]
fn section_view_descends_into_subsections() {
    let mut config = Config::new(MemoryStore::seeded(json!({
        "outer": { "inner": { "leaf": true } }
    })));
    let mut outer = config.section("outer").expect("outer");
    let inner = outer.section("inner").expect("inner");
    assert_eq!(inner.path(), "outer.inner");
    assert!(inner.get_required::<bool>("leaf").expect("leaf"));
}

#[test]
fn accessor_works_over_a_borrowed_store() {
    let mut store = MemoryStore::new();
    {
        let mut config = Config::new(&mut store);
        config.set("owned.elsewhere", true).expect("set");
    }
    let config = Config::new(&mut store);
    assert!(config.get_required::<bool>("owned.elsewhere").expect("read"));
}
