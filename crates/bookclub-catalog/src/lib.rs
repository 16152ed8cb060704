//! Catalog provider for `bookclub-search`.
//!
//! Holds the [`CatalogEntry`] record, an ordered immutable [`Catalog`], JSON
//! loading from strings and files, and the sample catalog embedded in the crate.
use std::path::{Path, PathBuf};

use ahash::AHashSet as HashSet;
use itertools::Itertools;
use tracing::{info, instrument, warn};

pub mod embedded;
mod entry;

pub use embedded::sample_catalog;
pub use entry::CatalogEntry;

/// Environment variable naming a catalog JSON file to use instead of the sample.
pub const CATALOG_PATH_ENV: &str = "BOOKCLUB_CATALOG";

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CatalogError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        #[error("Serialization error: {0}")]
        Serde(#[from] serde_json::Error),
    }

    pub type Result<T> = std::result::Result<T, CatalogError>;
}

pub use error::{CatalogError, Result};

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// The ten-book sample embedded in this crate
    #[default]
    Sample,
    /// A JSON array of catalog entries on disk
    File(PathBuf),
}

impl CatalogSource {
    /// `File` when [`CATALOG_PATH_ENV`] is set, otherwise `Sample`.
    pub fn from_env() -> Self {
        std::env::var(CATALOG_PATH_ENV)
            .map(|path| Self::File(PathBuf::from(path)))
            .unwrap_or(Self::Sample)
    }
}

/// An ordered, read-only sequence of catalog entries.
///
/// Order is significant: ranking ties are broken by catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let catalog = Self { entries };
        catalog.report_suspicious_entries();
        catalog
    }

    /// The embedded sample catalog.
    pub fn sample() -> Self {
        sample_catalog()
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Read and parse a JSON catalog file.
    #[instrument(name = "Load catalog file", level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&json)?;
        info!(books = catalog.len(), "Loaded catalog file");
        Ok(catalog)
    }

    pub fn load(source: &CatalogSource) -> Result<Self> {
        match source {
            CatalogSource::Sample => Ok(Self::sample()),
            CatalogSource::File(path) => Self::from_path(path),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: u32) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Distinct genres in first-seen order.
    pub fn genres(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.genre.as_str())
            .unique()
            .collect()
    }

    /// Presence/type checks are serde's job; anything else odd is only logged.
    fn report_suspicious_entries(&self) {
        let mut seen_ids = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if entry.title.trim().is_empty() {
                warn!(id = entry.id, "Catalog entry has an empty title");
            }
            if entry.age_min > entry.age_max {
                warn!(
                    id = entry.id,
                    age_min = entry.age_min,
                    age_max = entry.age_max,
                    "Catalog entry has an inverted age range"
                );
            }
            if entry.popularity.is_some_and(|p| p < 0.0) {
                warn!(id = entry.id, "Catalog entry has negative popularity");
            }
            if !seen_ids.insert(entry.id) {
                warn!(id = entry.id, "Duplicate catalog entry id");
            }
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl AsRef<[CatalogEntry]> for Catalog {
    fn as_ref(&self) -> &[CatalogEntry] {
        &self.entries
    }
}
