//! Catalog-wide ranking.
//!
//! Runs the matcher over every entry, applies the genre, age and level
//! facets, blends the match score with a level boost and a popularity prior,
//! and orders the survivors. With no query and no facet the catalog is
//! returned as a popularity-ordered trending window instead.

use std::cmp::Ordering;

use bookclub_catalog::CatalogEntry;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    matcher::{MatchResult, match_entry},
    options::{SearchOptions, SortMode},
};
use crate::config::{ScoringParams, SearchConfig};

/// A catalog entry decorated with its match and blended score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub entry: CatalogEntry,
    pub match_result: MatchResult,
    /// Blended score; `None` for unscored trending results
    pub final_score: Option<f64>,
}

impl RankedEntry {
    pub fn id(&self) -> u32 {
        self.entry.id
    }

    pub fn title(&self) -> &str {
        &self.entry.title
    }
}

/// Rank `catalog` for `options`.
///
/// The returned sequence is a filtered permutation of the input: every
/// entry appears at most once and nothing is invented. Sorting is stable,
/// so equal keys keep catalog order.
#[instrument(name = "Rank catalog", level = "debug", skip_all, fields(query = %options.query, sort = %options.sort_by))]
pub fn search_catalog(
    catalog: &[CatalogEntry],
    options: &SearchOptions,
    config: &SearchConfig,
) -> Vec<RankedEntry> {
    if options.is_unfiltered() {
        return trending(catalog, config.trending_limit);
    }

    let scoring = &config.scoring;
    let mut results: Vec<RankedEntry> = catalog
        .iter()
        .filter_map(|entry| {
            let match_result = match_entry(entry, &options.query);
            match_result.matched.then_some((entry, match_result))
        })
        .filter(|(entry, _)| options.genre.accepts(&entry.genre))
        .filter(|(entry, _)| options.age.is_none_or(|age| entry.suits_age(age)))
        .filter(|(entry, _)| passes_level_filter(entry, options, scoring))
        .map(|(entry, match_result)| RankedEntry {
            final_score: Some(blend_score(entry, match_result, options.user_level, scoring)),
            entry: entry.clone(),
            match_result,
        })
        .collect();

    sort_ranked(&mut results, options.sort_by);

    debug!(
        candidates = catalog.len(),
        results = results.len(),
        "Ranked catalog"
    );
    results
}

/// Rank the same catalog for several option sets in parallel.
///
/// Output order follows `options`; each element equals the sequential
/// [`search_catalog`] result.
#[instrument(name = "Rank catalog (bulk)", level = "debug", skip_all, fields(batches = options.len()))]
pub fn search_catalog_bulk(
    catalog: &[CatalogEntry],
    options: &[SearchOptions],
    config: &SearchConfig,
) -> Vec<Vec<RankedEntry>> {
    options
        .par_iter()
        .map(|opts| search_catalog(catalog, opts, config))
        .collect()
}

/// Most popular entries first, capped at `limit`. Unscored.
pub fn trending(catalog: &[CatalogEntry], limit: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<&CatalogEntry> = catalog.iter().collect();
    entries.sort_by(|a, b| by_popularity_desc(a, b));
    entries
        .into_iter()
        .take(limit)
        .map(|entry| RankedEntry {
            entry: entry.clone(),
            match_result: MatchResult::all(),
            final_score: None,
        })
        .collect()
}

fn passes_level_filter(entry: &CatalogEntry, options: &SearchOptions, scoring: &ScoringParams) -> bool {
    match options.user_level {
        Some(user_level) if options.level_filter => {
            entry.level.abs_diff(user_level) <= scoring.level_window
        }
        _ => true,
    }
}

/// Base score, boosted for level proximity, plus the popularity prior.
pub(crate) fn blend_score(
    entry: &CatalogEntry,
    match_result: MatchResult,
    user_level: Option<i32>,
    scoring: &ScoringParams,
) -> f64 {
    let base = f64::from(match_result.score);
    let boosted = match user_level.map(|level| entry.level.abs_diff(level)) {
        Some(0) => base * scoring.exact_level_boost,
        Some(1) => base * scoring.adjacent_level_boost,
        _ => base,
    };
    boosted + scoring.popularity_weight * entry.popularity_or_zero()
}

fn sort_ranked(results: &mut [RankedEntry], sort_by: SortMode) {
    match sort_by {
        SortMode::Relevance => results.sort_by(|a, b| {
            b.final_score
                .unwrap_or(0.0)
                .total_cmp(&a.final_score.unwrap_or(0.0))
        }),
        SortMode::Latest => results.sort_by(|a, b| b.entry.id.cmp(&a.entry.id)),
        SortMode::Popular => results.sort_by(|a, b| by_popularity_desc(&a.entry, &b.entry)),
    }
}

fn by_popularity_desc(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    b.popularity_or_zero().total_cmp(&a.popularity_or_zero())
}
