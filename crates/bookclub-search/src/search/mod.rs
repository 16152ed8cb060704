//! Search functionality for book matching.
//!
//! This module contains the matcher that scores one book against a query, the
//! ranker that filters and orders a whole catalog, autocomplete suggestions
//! and title highlighting.

pub use error::SearchError;
mod highlight;
mod matcher;
mod options;
mod ranker;
mod suggest;

pub use highlight::{highlight_ranges, split_highlighted};
pub use matcher::{MatchResult, MatchType, edit_distance, extract_chosung, match_entry};
pub use options::{DEFAULT_USER_LEVEL, GenreFilter, SearchOptions, SortMode};
pub use ranker::{RankedEntry, search_catalog, search_catalog_bulk, trending};
pub use suggest::{Suggestion, suggest};

mod error {
    use thiserror::Error;

    /// Errors at the search option boundary. Matching and ranking never fail.
    #[derive(Error, Debug)]
    pub enum SearchError {
        #[error("Unknown sort mode: {0}")]
        UnknownSortMode(String),
        #[error("Invalid search options: {0}")]
        Serde(#[from] serde_json::Error),
    }
}
