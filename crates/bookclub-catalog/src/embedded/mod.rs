//! The sample catalog shipped inside the crate.
//!
//! The JSON is compiled in with `include_str!` and parsed once on first use.

use once_cell::sync::Lazy;
use tracing::info;

use crate::{Catalog, CatalogEntry};

const SAMPLE_BOOKS_JSON: &str = include_str!("../../data/sample_books.json");

static SAMPLE_ENTRIES: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(SAMPLE_BOOKS_JSON).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Embedded sample catalog is malformed");
            Vec::new()
        });
    info!(books = entries.len(), "Loaded embedded sample catalog");
    entries
});

/// Entries of the embedded sample catalog, in catalog order.
pub(crate) fn sample_entries() -> &'static [CatalogEntry] {
    &SAMPLE_ENTRIES
}

/// Build a [`Catalog`] from the embedded sample.
pub fn sample_catalog() -> Catalog {
    Catalog::from_entries(sample_entries().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_sample_parses() {
        let parsed: Vec<CatalogEntry> = serde_json::from_str(SAMPLE_BOOKS_JSON).unwrap();
        assert_eq!(parsed.len(), 10);
        assert_eq!(sample_entries(), parsed.as_slice());
    }

    #[test]
    fn test_sample_catalog_order_and_ids() {
        let catalog = sample_catalog();
        let ids: Vec<u32> = catalog.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(catalog.entries()[0].title, "신비아파트");
    }

    #[test]
    fn test_sample_records_are_well_formed() {
        for entry in sample_entries() {
            assert!(!entry.title.is_empty());
            assert!(entry.age_min <= entry.age_max, "{}", entry.title);
            assert!(entry.popularity_or_zero() >= 0.0);
        }
    }
}
