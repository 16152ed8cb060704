use std::path::{Path, PathBuf};

use ahash::AHashMap as HashMap;
use tracing::debug;

use super::{HistoryStore, Result};

/// Environment variable overriding where [`JsonFileStore::default_location`] points.
pub const DATA_DIR_ENV: &str = "BOOKCLUB_DATA_DIR";
pub const DATA_DIR_DEFAULT: &str = "./bookclub_data";

/// Keeps values in process memory. Gone when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, bypassing any parsing.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Put a raw value in place, e.g. to simulate a corrupt slot.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `$BOOKCLUB_DATA_DIR`, the platform data directory
    /// (with the `system-dirs` feature), or `./bookclub_data`.
    pub fn default_location() -> Self {
        Self::new(default_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)?;
        debug!(path = %path.display(), "Saved history slot");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .ok()
        .or_else(platform_data_dir)
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_DEFAULT))
}

#[cfg(feature = "system-dirs")]
fn platform_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bookclub").map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(not(feature = "system-dirs"))]
fn platform_data_dir() -> Option<PathBuf> {
    None
}
