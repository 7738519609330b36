//! Persistence backends: a minimal key-value string store. The campaign
//! snapshot is one JSON document under one fixed key; durability is
//! last-write-wins and write failures must never take down in-memory state.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Load/save contract the store commits through. Implementations absorb
/// their own write errors (logging them) so a failed save never surfaces as
/// an engine failure.
pub trait StateStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// File-backed store: one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            log::warn!("unable to create state dir {}: {err}", self.dir.display());
            return;
        }
        let path = self.path_for(key);
        if let Err(err) = fs::write(&path, value) {
            log::warn!("unable to write state file {}: {err}", path.display());
        }
    }
}
