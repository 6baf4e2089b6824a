//! The shared workspace: a concurrent name→value map with typed retrieval.
//!
//! One workspace backs each graph run. The caller seeds it with external
//! inputs, nodes write their declared outputs into it, and the caller reads
//! final results out of it after the run. Keys are never removed while a run
//! is in flight; the last writer wins per key.
//!
//! A reader-writer lock protects the map: many workers reading existing keys
//! proceed in parallel, while the occasional write takes the lock
//! exclusively. Reads hand out copies, never references into the map, so a
//! concurrent write can never invalidate what a caller holds.

use crate::error::{Result, WeftError};
use crate::value::AnyValue;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared, concurrent, typed key-value store.
///
/// `Workspace` is a handle: cloning it is cheap and every clone sees the
/// same underlying map. All methods take `&self`; mutation goes through the
/// interior lock.
#[derive(Clone, Default)]
pub struct Workspace {
    data: Arc<RwLock<HashMap<String, AnyValue>>>,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `key`, replacing any previous binding. Never fails.
    pub fn set<T: Send + Sync + 'static>(&self, key: impl Into<String>, value: T) {
        self.set_any(key, AnyValue::new(value));
    }

    /// Bind an already-erased value to `key`.
    ///
    /// This is the write half of boundary copying between workspaces; pair
    /// it with [`Workspace::get_any`].
    pub fn set_any(&self, key: impl Into<String>, value: AnyValue) {
        let mut data = self.data.write();
        data.insert(key.into(), value);
    }

    /// Store scalar JSON values under their natural Rust types.
    ///
    /// Numbers land as `i64` (or `f64` when not integral), strings as
    /// `String`, booleans as `bool`; arrays, objects and null are stored as
    /// raw [`serde_json::Value`]. This keeps JSON-seeded inputs readable by
    /// nodes that ask for plain `i64`/`String` values.
    pub fn set_json(&self, key: impl Into<String>, value: &serde_json::Value) {
        use serde_json::Value;
        match value {
            Value::Bool(b) => self.set(key, *b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    self.set(key, i);
                } else {
                    self.set(key, n.as_f64().unwrap_or(f64::NAN));
                }
            }
            Value::String(s) => self.set(key, s.clone()),
            other => self.set(key, other.clone()),
        }
    }

    /// Fetch a copy of the value bound to `key`.
    ///
    /// Fails with [`WeftError::StoreKeyNotFound`] when the key is unbound
    /// and [`WeftError::StoreTypeMismatch`] when the bound value is not a
    /// `T`. The map lock is released before the copy is produced.
    pub fn get<T: Clone + 'static>(&self, key: &str) -> Result<T> {
        let stored = {
            let data = self.data.read();
            data.get(key).cloned()
        };
        let stored = stored.ok_or_else(|| WeftError::StoreKeyNotFound {
            key: key.to_string(),
        })?;
        stored
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| WeftError::StoreTypeMismatch {
                key: key.to_string(),
                requested: std::any::type_name::<T>(),
                actual: stored.type_name(),
            })
    }

    /// Whether `key` is currently bound.
    pub fn has(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Fetch the value bound to `key` without a type check.
    pub fn get_any(&self, key: &str) -> Result<AnyValue> {
        let data = self.data.read();
        data.get(key)
            .cloned()
            .ok_or_else(|| WeftError::StoreKeyNotFound {
                key: key.to_string(),
            })
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether no key is bound.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// All bound keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("keys", &self.len())
            .finish()
    }
}
