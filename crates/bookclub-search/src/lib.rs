//! Bookclub Search - Book Search Core for a Children's Reading Club
//!
//! Bookclub Search finds books in a small catalog for young readers. It
//! matches queries against titles, Hangul initial-consonant (chosung)
//! sequences and authors, tolerates small typos, then ranks results by match
//! quality, closeness to the reader's KRS reading level and popularity.
//!
//! # Quick Start
//!
//! ```rust
//! use bookclub_search::{BookSearcher, MemoryStore, QueryHistory, SearchOptions, SortMode};
//!
//! // Create a searcher over the embedded sample catalog
//! let searcher = BookSearcher::new_sample();
//!
//! // Simple search
//! let results = searcher.search("마법");
//! if let Some(result) = results.first() {
//!     println!("Found: {}", result.title());
//! }
//!
//! // Chosung search: "ㅅㅂ" finds "신비아파트"
//! let results = searcher.search("ㅅㅂ");
//! assert!(results.iter().any(|r| r.id() == 1));
//!
//! // Faceted search for a level 2 reader, most popular first
//! let options = SearchOptions::new("")
//!     .genre("동화")
//!     .user_level(2)
//!     .sort_by(SortMode::Popular);
//! let results = searcher.search_with_options(&options);
//! assert_eq!(results[0].title(), "타요 버스");
//!
//! // Submitted queries are remembered, most recent first
//! let mut history = QueryHistory::new(MemoryStore::new());
//! searcher.submit(&mut history, &SearchOptions::new("공룡"));
//! assert_eq!(history.list(), vec!["공룡"]);
//! ```
//!
//! # Features
//!
//! - **Forgiving Matching**: Substring, chosung, author and typo-tolerant matching
//! - **Level-Aware Ranking**: Books at the reader's level rise to the top
//! - **Autocomplete**: Up to five suggestions while the reader types
//! - **Highlighting**: Byte ranges of a title to emphasise for a query
//! - **Query History**: The last ten submitted queries, persisted as JSON
//!
//! # Data
//!
//! A ten-book sample catalog is embedded in the `bookclub-catalog` crate, so
//! the library works without any files. Set `BOOKCLUB_CATALOG` to a JSON
//! array of books to search your own catalog instead.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
mod history;
mod search;

pub use core::{BookSearcher, SearchResults, SearchResultsBatch};

pub use bookclub_catalog as catalog;
pub use bookclub_catalog::{Catalog, CatalogEntry, CatalogSource};
pub use config::{ScoringBuilder, ScoringParams, SearchConfig, SearchConfigBuilder, parse_level};
pub use history::{
    DATA_DIR_DEFAULT, DATA_DIR_ENV, HISTORY_CAPACITY, HISTORY_KEY, HistoryError, HistoryStore,
    JsonFileStore, MemoryStore, QueryHistory,
};
pub use search::{
    DEFAULT_USER_LEVEL, GenreFilter, MatchResult, MatchType, RankedEntry, SearchError,
    SearchOptions, SortMode, Suggestion, edit_distance, extract_chosung, highlight_ranges,
    match_entry, search_catalog, search_catalog_bulk, split_highlighted, suggest, trending,
};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Bookclub Search library.
///
/// This sets up structured logging with configurable levels and filtering.
/// `RUST_LOG` takes precedence over `level` when it is set. Calling this
/// more than once is harmless.
///
/// # Examples
///
/// ```rust
/// use bookclub_search::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), bookclub_search::error::BookclubError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::BookclubError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?;

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_init_logging_twice() {
        setup_test_env();
        assert!(init_logging(tracing::Level::DEBUG).is_ok());
    }

    #[test]
    fn test_searcher_creation() {
        setup_test_env();

        let searcher = BookSearcher::from_source(&CatalogSource::Sample);
        assert!(searcher.is_ok(), "Should be able to create searcher from the sample");
    }

    #[test]
    fn test_missing_catalog_file() {
        setup_test_env();

        let source = CatalogSource::File("/definitely/not/here/books.json".into());
        let result = BookSearcher::from_source(&source);
        assert!(matches!(result, Err(error::BookclubError::Catalog(_))));
    }

    #[test]
    fn test_basic_search() {
        setup_test_env();

        let searcher = BookSearcher::new_sample();
        for term in ["신비", "ㄸㅂ", "김공룡", "마법 학교"] {
            assert!(!searcher.search(term).is_empty(), "Search for '{term}' should match");
        }
    }

    #[test]
    fn test_configuration() {
        setup_test_env();

        let config = SearchConfigBuilder::no_level_boost().popularity_weight(0.0).build();
        let searcher = BookSearcher::new_sample().with_config(config);

        let results = searcher.search_with_options(&SearchOptions::new("마법").level_filter(false));
        for result in &results {
            assert_eq!(
                result.final_score,
                Some(f64::from(result.match_result.score)),
                "Without boosts the score is the match score"
            );
        }
    }

    #[test]
    fn test_no_match() {
        setup_test_env();

        let searcher = BookSearcher::new_sample();
        assert!(searcher.search("XYZ123NONEXISTENT").is_empty());
        assert!(searcher.suggest("XYZ123NONEXISTENT").is_empty());
    }
}
