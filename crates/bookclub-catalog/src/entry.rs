use serde::{Deserialize, Serialize};

/// A single book record in the catalog.
///
/// Field names follow the camelCase layout the reading-club front end
/// produces (`krsLevel`, `ageMin`, `ageMax`), so catalog files exported from
/// it deserialize directly. Optional fields degrade to safe defaults through
/// the `*_or_*` accessors rather than failing a search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Unique, stable identifier. Higher ids are newer books.
    pub id: u32,
    /// Display title
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    /// Category tag used by the genre filter
    pub genre: String,
    /// KRS reading level
    #[serde(rename = "krsLevel")]
    pub level: i32,
    /// Youngest target age (inclusive)
    pub age_min: i32,
    /// Oldest target age (inclusive)
    pub age_max: i32,
    #[serde(default)]
    pub series: Option<String>,
    /// Ranking prior, non-negative
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews: Option<u32>,
}

impl CatalogEntry {
    /// Minimal entry with the fields ranking depends on; the rest stay unset.
    pub fn new(id: u32, title: impl Into<String>, genre: impl Into<String>, level: i32) -> Self {
        Self {
            id,
            title: title.into(),
            genre: genre.into(),
            level,
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_ages(mut self, age_min: i32, age_max: i32) -> Self {
        self.age_min = age_min;
        self.age_max = age_max;
        self
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Author, or the empty string when the record has none.
    #[must_use]
    pub fn author_or_empty(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }

    /// Popularity, or zero when the record has none.
    #[must_use]
    pub fn popularity_or_zero(&self) -> f64 {
        self.popularity.unwrap_or(0.0)
    }

    /// Whether `age` falls inside the inclusive target age range.
    #[must_use]
    pub fn suits_age(&self, age: i32) -> bool {
        self.age_min <= age && age <= self.age_max
    }
}
