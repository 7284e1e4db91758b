//! Process configuration store with environment fallback.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Key-value configuration owned by the host application.
///
/// Lookups consult explicitly set values first, then a snapshot of the
/// OS environment captured at construction. The env-file loader writes
/// through [`set_if_absent`](Self::set_if_absent), so a key already
/// present in either layer keeps its value for the lifetime of the
/// store.
///
/// The store is `Send + Sync`: reads take a read lock and writes a
/// write lock, so a shared reference can be handed to concurrent code.
#[derive(Debug)]
pub struct ConfigStore {
    values: RwLock<HashMap<String, String>>,
    environment: HashMap<String, String>,
}

impl ConfigStore {
    /// Creates an empty store with a snapshot of the process environment.
    ///
    /// Variables with non-UTF-8 names or values are not captured.
    pub fn new() -> Self {
        Self::with_environment(std::env::vars())
    }

    /// Creates an empty store with an explicit environment snapshot.
    ///
    /// Lets tests, and hosts that want full control over the fallback
    /// layer, substitute their own snapshot for the process environment.
    pub fn with_environment(environment: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            environment: environment.into_iter().collect(),
        }
    }

    /// Looks up a key: explicit values first, then the environment snapshot.
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.values.read().get(key) {
            return Some(value.clone());
        }
        self.environment.get(key).cloned()
    }

    /// Sets an explicit configuration value, replacing any previous one.
    ///
    /// Explicit writes are the highest-priority source and are not
    /// subject to the loader's no-overwrite rule.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// Inserts a value only if the key is absent from both the explicit
    /// values and the environment snapshot.
    ///
    /// The check and the insert happen under one write lock, so two
    /// concurrent inserts of the same new key admit exactly one winner.
    /// Returns whether this call performed the insert.
    pub fn set_if_absent(&self, key: &str, value: impl Into<String>) -> bool {
        if self.environment.contains_key(key) {
            return false;
        }
        let mut values = self.values.write();
        if values.contains_key(key) {
            return false;
        }
        values.insert(key.to_string(), value.into());
        true
    }

    /// Returns whether the key is present in either layer.
    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key) || self.environment.contains_key(key)
    }

    /// Number of explicitly set values. The environment snapshot is not counted.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
