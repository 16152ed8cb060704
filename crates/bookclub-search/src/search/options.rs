use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::SearchError;
use crate::error::BookclubError;

/// Default reading level assumed for a user with no profile level.
pub const DEFAULT_USER_LEVEL: i32 = 3;

/// How ranked results are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Descending blended score
    #[default]
    Relevance,
    /// Descending id
    Latest,
    /// Descending popularity
    Popular,
}

impl FromStr for SortMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "latest" => Ok(Self::Latest),
            "popular" => Ok(Self::Popular),
            other => Err(SearchError::UnknownSortMode(other.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Relevance => "relevance",
            Self::Latest => "latest",
            Self::Popular => "popular",
        })
    }
}

/// Genre facet. The literal string `"all"`, or no value at all, means no filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn accepts(&self, genre: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == genre,
        }
    }
}

impl From<String> for GenreFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<Option<String>> for GenreFilter {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::All, Self::from)
    }
}

impl From<&str> for GenreFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<GenreFilter> for String {
    fn from(value: GenreFilter) -> Self {
        match value {
            GenreFilter::All => "all".to_string(),
            GenreFilter::Only(genre) => genre,
        }
    }
}

/// Per-call search options.
///
/// Built fresh for every search. Every field has a default, and the serde
/// form accepts the option names the front end sends (`userKrs`,
/// `krsFilterOn`, `sortBy`, `genreFilter`, `ageFilter`), so a partial JSON
/// object deserializes into a complete value.
///
/// ```rust
/// use bookclub_search::{SearchOptions, SortMode};
///
/// let options = SearchOptions::new("신비")
///     .genre("만화")
///     .age(8)
///     .sort_by(SortMode::Popular);
/// assert_eq!(options.user_level, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub query: String,
    /// Reader's KRS level; `None` disables level filtering and boosting
    #[serde(rename = "userKrs")]
    pub user_level: Option<i32>,
    /// Keep only books within the level window around `user_level`
    #[serde(rename = "krsFilterOn")]
    pub level_filter: bool,
    /// Unknown or missing values fall back to relevance
    #[serde(deserialize_with = "lenient_sort_mode")]
    pub sort_by: SortMode,
    #[serde(rename = "genreFilter")]
    pub genre: GenreFilter,
    #[serde(rename = "ageFilter")]
    pub age: Option<i32>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: String::new(),
            user_level: Some(DEFAULT_USER_LEVEL),
            level_filter: true,
            sort_by: SortMode::default(),
            genre: GenreFilter::default(),
            age: None,
        }
    }
}

impl SearchOptions {
    /// Default options for `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn user_level(mut self, level: impl Into<Option<i32>>) -> Self {
        self.user_level = level.into();
        self
    }

    pub fn level_filter(mut self, enabled: bool) -> Self {
        self.level_filter = enabled;
        self
    }

    pub fn sort_by(mut self, sort_by: SortMode) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn genre(mut self, genre: impl Into<GenreFilter>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn age(mut self, age: impl Into<Option<i32>>) -> Self {
        self.age = age.into();
        self
    }

    /// No query, no genre and no age: the trending listing applies.
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty() && self.genre.is_all() && self.age.is_none()
    }

    /// Parse options from the front end's JSON form.
    ///
    /// Only malformed JSON or wrongly typed fields are errors. A null genre
    /// means no genre filter and an unrecognised sort mode means relevance.
    pub fn from_json(json: &str) -> Result<Self, BookclubError> {
        let options = serde_json::from_str(json).map_err(SearchError::from)?;
        Ok(options)
    }
}

fn lenient_sort_mode<'de, D>(deserializer: D) -> Result<SortMode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map_or_else(SortMode::default, |value| {
        value.parse().unwrap_or_else(|e: SearchError| {
            warn!(error = %e, "Falling back to relevance sort");
            SortMode::default()
        })
    }))
}
