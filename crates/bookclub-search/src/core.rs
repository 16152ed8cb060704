//! The [`BookSearcher`] facade.
//!
//! A searcher owns one catalog and one [`SearchConfig`] and exposes every
//! search the reading-club front end needs: the ranked result list, the
//! trending listing, autocomplete, title highlighting and query submission
//! with history.
//!
//! ```rust
//! use bookclub_search::{BookSearcher, SearchOptions};
//!
//! let searcher = BookSearcher::new_sample();
//!
//! let results = searcher.search("신비");
//! assert_eq!(results[0].title(), "신비아파트");
//!
//! let suggestions = searcher.suggest("ㅁㅂ");
//! assert!(!suggestions.is_empty());
//! ```

use std::ops::Range;

use bookclub_catalog::{Catalog, CatalogSource};
use tracing::{info, instrument};

use crate::{
    config::SearchConfig,
    error::BookclubError,
    history::{HistoryStore, QueryHistory},
    search::{
        RankedEntry, SearchOptions, Suggestion, highlight_ranges, search_catalog,
        search_catalog_bulk, suggest, trending,
    },
};

pub type SearchResults = Vec<RankedEntry>;
pub type SearchResultsBatch = Vec<Vec<RankedEntry>>;

/// Searches one catalog.
///
/// Construction is the only fallible step; every search returns a
/// (possibly empty) list.
#[derive(Debug, Clone)]
pub struct BookSearcher {
    catalog: Catalog,
    config: SearchConfig,
}

impl BookSearcher {
    /// Searcher over the embedded sample catalog.
    #[instrument(name = "Create BookSearcher with sample catalog", level = "info")]
    pub fn new_sample() -> Self {
        Self::from_catalog(Catalog::sample())
    }

    /// Searcher over the catalog `source` points at.
    ///
    /// ```rust
    /// use bookclub_search::{BookSearcher, catalog::CatalogSource};
    ///
    /// let searcher = BookSearcher::from_source(&CatalogSource::Sample)?;
    /// assert_eq!(searcher.catalog().len(), 10);
    /// # Ok::<(), bookclub_search::error::BookclubError>(())
    /// ```
    #[instrument(name = "Create BookSearcher", level = "info")]
    pub fn from_source(source: &CatalogSource) -> Result<Self, BookclubError> {
        let catalog = Catalog::load(source)?;
        info!(books = catalog.len(), "BookSearcher ready");
        Ok(Self::from_catalog(catalog))
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: SearchConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Ranked search for `query` with default options.
    pub fn search(&self, query: &str) -> SearchResults {
        self.search_with_options(&SearchOptions::new(query))
    }

    /// Ranked search with explicit options.
    ///
    /// With an empty query and no genre or age facet this is the trending
    /// listing.
    pub fn search_with_options(&self, options: &SearchOptions) -> SearchResults {
        search_catalog(self.catalog.entries(), options, &self.config)
    }

    /// Several searches over the catalog, run in parallel. Results follow
    /// the order of `options`.
    pub fn search_bulk(&self, options: &[SearchOptions]) -> SearchResultsBatch {
        search_catalog_bulk(self.catalog.entries(), options, &self.config)
    }

    /// Most popular books, capped at the configured trending window.
    pub fn trending(&self) -> SearchResults {
        trending(self.catalog.entries(), self.config.trending_limit)
    }

    /// Autocomplete candidates for `query`.
    pub fn suggest(&self, query: &str) -> Vec<Suggestion> {
        suggest(self.catalog.entries(), query, self.config.suggestion_limit)
    }

    /// Byte ranges of `text` to emphasise for `query`.
    pub fn highlight(&self, text: &str, query: &str) -> Vec<Range<usize>> {
        highlight_ranges(text, query)
    }

    /// Record a submitted query in `history`, then run the search.
    pub fn submit<S: HistoryStore>(
        &self,
        history: &mut QueryHistory<S>,
        options: &SearchOptions,
    ) -> SearchResults {
        history.add(&options.query);
        self.search_with_options(options)
    }
}
