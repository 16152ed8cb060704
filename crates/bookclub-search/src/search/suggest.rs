use bookclub_catalog::CatalogEntry;
use serde::Serialize;
use tracing::instrument;

use super::matcher::{MatchResult, match_entry};

/// An autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub entry: CatalogEntry,
    pub match_result: MatchResult,
}

/// Up to `limit` autocomplete candidates for `query`, best match first.
///
/// No facets and no level blending: only the matcher's base score orders
/// the candidates, and ties keep catalog order. An empty query suggests
/// nothing.
#[instrument(name = "Suggest", level = "debug", skip(catalog))]
pub fn suggest(catalog: &[CatalogEntry], query: &str, limit: usize) -> Vec<Suggestion> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<Suggestion> = catalog
        .iter()
        .filter_map(|entry| {
            let match_result = match_entry(entry, query);
            match_result.matched.then(|| Suggestion {
                entry: entry.clone(),
                match_result,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| b.match_result.score.cmp(&a.match_result.score));
    suggestions.truncate(limit);
    suggestions
}

#[cfg(test)]
mod tests {
    use bookclub_catalog::Catalog;

    use super::*;
    use crate::search::matcher::MatchType;

    #[test]
    fn test_empty_query_suggests_nothing() {
        let catalog = Catalog::sample();
        assert!(suggest(catalog.entries(), "", 5).is_empty());
    }

    #[test]
    fn test_suggestions_capped() {
        let books: Vec<CatalogEntry> = (1..=9)
            .map(|id| CatalogEntry::new(id, format!("동물 {id}"), "동화", 3))
            .collect();
        let suggestions = suggest(&books, "동물", 5);
        let ids: Vec<u32> = suggestions.iter().map(|s| s.entry.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ordered_by_base_score() {
        let books = vec![
            CatalogEntry::new(1, "또봇", "만화", 3).with_author("마법사"),
            CatalogEntry::new(2, "모험 바다", "모험", 9),
            CatalogEntry::new(3, "마법 학교", "판타지", 1),
            CatalogEntry::new(4, "ㅁㅎ 노트", "모험", 2),
        ];
        // chosung hit on "모험 바다" (80) loses to the literal jamo title (100)
        let suggestions = suggest(&books, "ㅁㅎ", 5);
        let types: Vec<MatchType> = suggestions.iter().map(|s| s.match_result.match_type).collect();
        assert_eq!(types, vec![MatchType::Exact, MatchType::Chosung]);
        assert_eq!(suggestions[0].entry.id, 4);

        let suggestions = suggest(&books, "마법", 5);
        let ids: Vec<u32> = suggestions.iter().map(|s| s.entry.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(suggestions[0].match_result.match_type, MatchType::Exact);
        assert_eq!(suggestions[1].match_result.match_type, MatchType::Author);
    }

    #[test]
    fn test_levels_do_not_filter_suggestions() {
        let catalog = Catalog::sample();
        // 우주 탐험 is level 5, far from the default user level
        let suggestions = suggest(catalog.entries(), "우주", 5);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].entry.id, 9);
    }
}
