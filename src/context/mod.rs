//! Application context for managing shared configuration state.

use std::path::{Path, PathBuf};

use crate::config::{ConfigStore, EnvLoader};

/// Central application context owning the configuration store.
///
/// Replaces process-global configuration with an explicit value the
/// host constructs once, early in startup, and injects into whatever
/// needs configuration. Lookups keep a fixed precedence: explicit
/// configuration first, then the OS environment snapshot; env files
/// never overwrite either.
///
/// ## Example
///
/// ```no_run
/// use envseed::AppContext;
///
/// let ctx = AppContext::builder()
///     .with_env_file(".env")
///     .with_env_file(".env.local")
///     .build();
///
/// if let Some(host) = ctx.get("DB_HOST") {
///     println!("database host: {host}");
/// }
/// ```
#[derive(Debug)]
pub struct AppContext {
    store: ConfigStore,
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::default()
    }

    /// Layered lookup: explicit configuration first, then the OS
    /// environment snapshot. `None` when the key is in neither.
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Sets an explicit configuration value, replacing any previous one.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.store.set(key, value);
    }

    /// Loads `./.env` into the store. A missing file is a no-op.
    pub fn load_env(&self) {
        EnvLoader::new().load(&self.store);
    }

    /// Loads an explicit env file into the store. A missing file is a no-op.
    pub fn load_env_from(&self, path: impl AsRef<Path>) {
        EnvLoader::new().with_file(path).load(&self.store);
    }

    /// Returns the underlying configuration store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }
}

/// Builder for constructing an [`AppContext`].
///
/// Env files registered with [`with_env_file`](Self::with_env_file) are
/// applied in registration order at [`build`](Self::build) time; with
/// none registered, `./.env` is applied.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder {
    store: Option<ConfigStore>,
    env_files: Vec<PathBuf>,
}

impl AppContextBuilder {
    /// Supplies a pre-built store, e.g. one with a custom environment
    /// snapshot from [`ConfigStore::with_environment`].
    pub fn with_store(mut self, store: ConfigStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Registers an env file to load at build time. Files are applied
    /// in registration order; the first file to provide a key wins.
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Builds the context and applies the registered env files.
    pub fn build(self) -> AppContext {
        let store = self.store.unwrap_or_else(ConfigStore::new);
        let mut loader = EnvLoader::new();
        for path in self.env_files {
            loader = loader.with_file(path);
        }
        loader.load(&store);
        AppContext { store }
    }
}
