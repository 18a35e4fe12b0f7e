//! Typed, dotted-path configuration access over tree-shaped stores.
//!
//! The accessor wraps any [`ConfigStore`] and layers exact runtime type
//! checking, default substitution, list typing, nested lookup, and live
//! section views on top of it. Persistence stays with the store; every
//! mutating accessor call flushes through it synchronously.

mod accessor;
mod error;
mod store;
mod value;

/// The typed accessor and its live section view.
pub use accessor::{Config, Section};
/// Public error type returned by accessor operations and store I/O.
pub use error::ConfigError;
/// Backing store interface and the bundled implementations.
pub use store::{ConfigStore, JsonFileStore, MemoryStore};
/// Raw value classification and typed extraction.
pub use value::{FromValue, ValueKind};
