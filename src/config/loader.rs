//! Env-file loading: parse `KEY=VALUE` lines into a [`ConfigStore`].

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::store::ConfigStore;
use super::ConfigError;

/// File applied by [`EnvLoader::load`] when no file was registered.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Loads `KEY=VALUE` pairs from env files into a [`ConfigStore`].
///
/// Files are applied in registration order. A key already present in
/// the store or in its environment snapshot is never overwritten, so
/// the first source to provide a key wins, within one file and across
/// files alike.
///
/// Loading is best-effort: a missing file is skipped silently, a read
/// failure is logged as a warning, and malformed lines are dropped.
/// [`load`](Self::load) never returns an error to the caller.
///
/// ## Example
///
/// ```no_run
/// use envseed::{ConfigStore, EnvLoader};
///
/// let store = ConfigStore::new();
/// EnvLoader::new()
///     .with_file(".env")
///     .with_file(".env.local")
///     .load(&store);
/// ```
#[derive(Debug, Default)]
#[must_use = "loaders do nothing until .load() is called"]
pub struct EnvLoader {
    files: Vec<PathBuf>,
}

impl EnvLoader {
    /// Creates a loader with no files registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an env file. Files are applied in registration order.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    /// Applies every registered file to the store, in order. With no
    /// file registered, applies [`DEFAULT_ENV_FILE`] from the current
    /// working directory.
    ///
    /// Never fails: a missing file is a debug-logged no-op and a read
    /// failure degrades to a warning, leaving the store as it was.
    pub fn load(&self, store: &ConfigStore) {
        if self.files.is_empty() {
            apply_file(store, Path::new(DEFAULT_ENV_FILE));
            return;
        }
        for path in &self.files {
            apply_file(store, path);
        }
    }

    /// Strict single-file load for hosts that want the outcome.
    ///
    /// Returns the number of keys inserted. Keys skipped because they
    /// were already present are not counted.
    pub fn try_load_file(
        path: impl AsRef<Path>,
        store: &ConfigStore,
    ) -> Result<usize, ConfigError> {
        load_env_file(path.as_ref(), store)
    }
}

/// Lenient wrapper over [`load_env_file`]: a missing file and a read
/// failure both degrade to a log entry.
fn apply_file(store: &ConfigStore, path: &Path) {
    match load_env_file(path, store) {
        Ok(inserted) => {
            info!(path = %path.display(), inserted, "env file loaded");
        }
        Err(ConfigError::FileNotFound(_)) => {
            debug!(path = %path.display(), "env file not found, skipping");
        }
        Err(ConfigError::Read { source, .. }) => {
            warn!(path = %path.display(), error = %source, "failed to read env file, skipping");
        }
    }
}

/// Reads an env file and merges its entries into the store.
fn load_env_file(path: &Path, store: &ConfigStore) -> Result<usize, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let mut inserted = 0;
    for line in contents.lines() {
        // Parsing is best-effort: skip reasons are not reported.
        let Some((key, value)) = parse_line(line) else {
            continue;
        };
        if store.set_if_absent(key, value) {
            // Key only; values may hold secrets.
            debug!(key, "env entry loaded");
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Splits one env-file line into a trimmed `(key, value)` pair.
///
/// Returns `None` for blank lines, `#` comments, lines without `=`,
/// and lines whose trimmed key is empty. An empty value is valid.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn empty_store() -> ConfigStore {
        ConfigStore::with_environment([])
    }

    fn env_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_parse_line_well_formed() {
        assert_eq!(parse_line("KEY=value"), Some(("KEY", "value")));
        assert_eq!(parse_line("  KEY  =  value  "), Some(("KEY", "value")));
        assert_eq!(parse_line("KEY="), Some(("KEY", "")));
        assert_eq!(parse_line("URL=a=b=c"), Some(("URL", "a=b=c")));
    }

    #[test]
    fn test_parse_line_skipped() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("# comment"), None);
        assert_eq!(parse_line("  # indented comment"), None);
        assert_eq!(parse_line("NO_DELIMITER"), None);
        assert_eq!(parse_line("=value"), None);
        assert_eq!(parse_line("   =value"), None);
    }

    #[test]
    fn test_load_well_formed_file() {
        let file = env_file("DB_HOST=localhost\nDB_PORT=5432\n# comment\n\nAPI_KEY=test123\n");
        let store = empty_store();

        EnvLoader::new().with_file(file.path()).load(&store);

        assert_eq!(store.get("DB_HOST"), Some("localhost".to_string()));
        assert_eq!(store.get("DB_PORT"), Some("5432".to_string()));
        assert_eq!(store.get("API_KEY"), Some("test123".to_string()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_comments_and_blank_lines_produce_no_entries() {
        let file = env_file("# only comments\n\n   \n# KEY=value\n");
        let store = empty_store();

        EnvLoader::new().with_file(file.path()).load(&store);

        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_lines_ignored() {
        let file = env_file("LINE_WITHOUT_EQUALS\n=value_without_key\n   =spaced\nVALID=yes\n");
        let store = empty_store();

        EnvLoader::new().with_file(file.path()).load(&store);

        assert_eq!(store.get("VALID"), Some("yes".to_string()));
        assert_eq!(store.get("LINE_WITHOUT_EQUALS"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_value_is_present_not_absent() {
        let file = env_file("KEY_WITHOUT_VALUE=\n");
        let store = empty_store();

        EnvLoader::new().with_file(file.path()).load(&store);

        assert_eq!(store.get("KEY_WITHOUT_VALUE"), Some(String::new()));
    }

    #[test]
    fn test_whitespace_around_key_and_value_trimmed() {
        let file = env_file("  KEY1  =  value1  \nKEY2=value2\n");
        let store = empty_store();

        EnvLoader::new().with_file(file.path()).load(&store);

        assert_eq!(store.get("KEY1"), Some("value1".to_string()));
        assert_eq!(store.get("KEY2"), Some("value2".to_string()));
    }

    #[test]
    fn test_missing_file_is_a_silent_noop() {
        let store = empty_store();
        store.set("KEPT", "kept");

        EnvLoader::new()
            .with_file("/nonexistent/path/.env")
            .load(&store);

        assert_eq!(store.get("KEPT"), Some("kept".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_default_path_load_does_not_panic() {
        EnvLoader::new().load(&empty_store());
    }

    #[test]
    fn test_does_not_overwrite_existing_store_value() {
        let file = env_file("EXISTING_KEY=new_value\nNEW_KEY=new_value\n");
        let store = empty_store();
        store.set("EXISTING_KEY", "existing_value");

        EnvLoader::new().with_file(file.path()).load(&store);

        assert_eq!(store.get("EXISTING_KEY"), Some("existing_value".to_string()));
        assert_eq!(store.get("NEW_KEY"), Some("new_value".to_string()));
    }

    #[test]
    fn test_does_not_overwrite_environment_value() {
        let file = env_file("HOME_DIR=/tmp/other\n");
        let store =
            ConfigStore::with_environment([("HOME_DIR".to_string(), "/home/me".to_string())]);

        EnvLoader::new().with_file(file.path()).load(&store);

        assert_eq!(store.get("HOME_DIR"), Some("/home/me".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_first_duplicate_within_file_wins() {
        let file = env_file("KEY=first\nKEY=second\n");
        let store = empty_store();

        EnvLoader::new().with_file(file.path()).load(&store);

        assert_eq!(store.get("KEY"), Some("first".to_string()));
    }

    #[test]
    fn test_first_file_wins_across_files() {
        let first = env_file("SHARED=from_first\nONLY_FIRST=1\n");
        let second = env_file("SHARED=from_second\nONLY_SECOND=2\n");
        let store = empty_store();

        EnvLoader::new()
            .with_file(first.path())
            .with_file(second.path())
            .load(&store);

        assert_eq!(store.get("SHARED"), Some("from_first".to_string()));
        assert_eq!(store.get("ONLY_FIRST"), Some("1".to_string()));
        assert_eq!(store.get("ONLY_SECOND"), Some("2".to_string()));
    }

    #[test]
    fn test_try_load_file_missing() {
        let result = EnvLoader::try_load_file("/nonexistent/path/.env", &empty_store());

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_try_load_file_counts_only_inserts() {
        let file = env_file("FRESH=1\nSHADOWED=2\nFRESH=3\n# note\n");
        let store =
            ConfigStore::with_environment([("SHADOWED".to_string(), "env".to_string())]);

        let inserted = EnvLoader::try_load_file(file.path(), &store).unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(store.get("FRESH"), Some("1".to_string()));
    }
}
