use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BookclubError;

/// Score blending parameters for ranked search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringParams {
    /// Multiplier when the book's level equals the reader's
    pub exact_level_boost: f64,
    /// Multiplier when the levels differ by exactly one
    pub adjacent_level_boost: f64,
    /// Weight of the popularity prior added after boosting
    pub popularity_weight: f64,
    /// Largest level difference kept by the level filter
    pub level_window: u32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            exact_level_boost: 2.0,
            adjacent_level_boost: 1.5,
            popularity_weight: 0.1,
            level_window: 1,
        }
    }
}

/// Configuration shared by every search a [`crate::BookSearcher`] runs.
///
/// Per-call choices (query, facets, sort) live in [`crate::SearchOptions`];
/// this holds the knobs that stay fixed for a deployment.
///
/// ```rust
/// use bookclub_search::SearchConfig;
///
/// let config = SearchConfig::builder().suggestion_limit(8).build();
/// assert_eq!(config.trending_limit, 12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Size of the popularity listing returned with no query and no facet
    pub trending_limit: usize,
    /// Maximum autocomplete suggestions
    pub suggestion_limit: usize,
    pub scoring: ScoringParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trending_limit: 12,
            suggestion_limit: 5,
            scoring: ScoringParams::default(),
        }
    }
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

/// Builder for creating search configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Create a new builder with the standard defaults
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Longer autocomplete list and trending window, for a full-page search view
    pub fn browse() -> Self {
        let mut builder = Self::new();
        builder.config.trending_limit = 24;
        builder.config.suggestion_limit = 10;
        builder
    }

    /// Rank purely by match score and popularity, ignoring reading level
    pub fn no_level_boost() -> Self {
        let mut builder = Self::new();
        builder.config.scoring.exact_level_boost = 1.0;
        builder.config.scoring.adjacent_level_boost = 1.0;
        builder
    }

    /// Set the size of the trending listing
    pub fn trending_limit(mut self, limit: usize) -> Self {
        self.config.trending_limit = limit;
        self
    }

    /// Set the maximum number of autocomplete suggestions
    pub fn suggestion_limit(mut self, limit: usize) -> Self {
        self.config.suggestion_limit = limit;
        self
    }

    /// Set the level difference tolerated by the level filter
    pub fn level_window(mut self, window: u32) -> Self {
        self.config.scoring.level_window = window;
        self
    }

    /// Set the weight of the popularity prior
    pub fn popularity_weight(mut self, weight: f64) -> Self {
        self.config.scoring.popularity_weight = weight.max(0.0);
        self
    }

    /// Configure level boosting
    pub fn scoring(self) -> ScoringBuilder {
        ScoringBuilder::new(self)
    }

    /// Build the final configuration
    pub fn build(self) -> SearchConfig {
        self.config
    }
}

/// Builder for level boost multipliers
pub struct ScoringBuilder {
    parent: SearchConfigBuilder,
}

impl ScoringBuilder {
    fn new(parent: SearchConfigBuilder) -> Self {
        Self { parent }
    }

    /// Favour books at the reader's level more strongly
    pub fn strong_level_preference(mut self) -> Self {
        self.parent.config.scoring.exact_level_boost = 3.0;
        self.parent.config.scoring.adjacent_level_boost = 1.5;
        self
    }

    /// Set custom boosts. Both must be finite and at least 1.0, and the exact
    /// level boost may not be smaller than the adjacent one.
    pub fn custom_boosts(mut self, exact: f64, adjacent: f64) -> Result<Self, BookclubError> {
        if !exact.is_finite() || !adjacent.is_finite() || exact < 1.0 || adjacent < 1.0 {
            return Err(BookclubError::ConfigError(format!(
                "Level boosts must be finite and at least 1.0, got {exact} and {adjacent}"
            )));
        }
        if exact < adjacent {
            return Err(BookclubError::ConfigError(format!(
                "Exact level boost {exact} is smaller than adjacent boost {adjacent}"
            )));
        }

        self.parent.config.scoring.exact_level_boost = exact;
        self.parent.config.scoring.adjacent_level_boost = adjacent;
        Ok(self)
    }

    /// Return to the main configuration builder
    pub fn done(self) -> SearchConfigBuilder {
        self.parent
    }
}

static LEVEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"K(\d+)").expect("level pattern is valid"));

/// Read a KRS level out of a profile label such as `"K3"` or `"KRS K4 reader"`.
pub fn parse_level(label: &str) -> Option<i32> {
    LEVEL_PATTERN
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
