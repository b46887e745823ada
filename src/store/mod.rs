// Store module - key-value persistence for widget preferences
//
// Preferences never touch the filesystem directly; they go through the
// `KeyValueStore` trait so the dashboard can run against a JSON file on disk
// and tests (or `--ephemeral` runs) can use an in-memory map.
//
// FileStore keeps the whole file in memory and rewrites it on every `set`.
// There is exactly one writer, so last-writer-wins is the whole story.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String-keyed, string-valued persistence
pub trait KeyValueStore: Send {
    /// Value for `key`, or `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop `key` if present
    fn remove(&mut self, key: &str) -> Result<()>;

    /// All entries in key order (for `prefs --show`)
    fn entries(&self) -> Result<Vec<(String, String)>>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Map-backed store; contents vanish with the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File store
// ─────────────────────────────────────────────────────────────────────────────

/// JSON object file: `{"capture_enabled": "true", ...}`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty store. A file that exists but is not a
    /// JSON object of strings is logged and treated as empty; it is replaced
    /// on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Preference file unreadable, starting empty: {:#}", e);
                BTreeMap::new()
            }
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "Preference store opened");
        Self { path, values }
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e).context("Failed to read preference file"),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).context("Preference file is not a JSON object of strings")
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create preference directory")?;
        }
        let json =
            serde_json::to_string_pretty(&self.values).context("Failed to encode preferences")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = FileStore::open(&path);
        store.set("capture_enabled", "false").unwrap();
        store.set("blocked_domains", r#"["example.com"]"#).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.get("capture_enabled").unwrap().as_deref(),
            Some("false")
        );
        assert_eq!(
            reopened.get("blocked_domains").unwrap().as_deref(),
            Some(r#"["example.com"]"#)
        );
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json"));
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn file_store_corrupt_file_is_empty_and_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::open(&path);
        assert!(store.entries().unwrap().is_empty());

        store.set("notifications_enabled", "true").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.get("notifications_enabled").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn file_store_remove_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = FileStore::open(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.entries().unwrap(), vec![("b".to_string(), "2".to_string())]);
    }
}
