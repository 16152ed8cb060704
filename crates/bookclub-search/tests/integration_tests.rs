//! Integration tests for Bookclub Search
//!
//! These tests run against the full public API and verify the behaviour a
//! front end relies on: matching, ranking, trending, suggestions and query
//! history. Most use the embedded ten-book sample catalog.

use ahash::AHashSet as HashSet;
use bookclub_search::{
    BookSearcher, Catalog, CatalogEntry, GenreFilter, HISTORY_KEY, JsonFileStore, MatchType,
    MemoryStore, QueryHistory, RankedEntry, SearchConfigBuilder, SearchOptions, SortMode,
    match_entry,
};

fn setup_test_env() {
    let _ = bookclub_search::init_logging(tracing::Level::WARN);
}

fn ids(results: &[RankedEntry]) -> Vec<u32> {
    results.iter().map(RankedEntry::id).collect()
}

fn searcher_over(entries: Vec<CatalogEntry>) -> BookSearcher {
    BookSearcher::from_catalog(Catalog::from_entries(entries))
}

#[test]
fn test_full_workflow() {
    setup_test_env();

    let searcher = BookSearcher::new_sample();
    let mut history = QueryHistory::new(MemoryStore::new());

    // 1. Landing page shows trending books
    let trending = searcher.search("");
    assert_eq!(trending.len(), 10);
    assert!(trending.iter().all(|r| r.final_score.is_none()));

    // 2. Typing shows suggestions
    let suggestions = searcher.suggest("ㅅㅂ");
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= searcher.config().suggestion_limit);

    // 3. Submitting runs the search and remembers the query
    let results = searcher.submit(&mut history, &SearchOptions::new("신비"));
    assert_eq!(ids(&results), vec![1, 2]);
    assert_eq!(history.list(), vec!["신비"]);

    // 4. Results can be highlighted
    let ranges = searcher.highlight(results[0].title(), "신비");
    assert_eq!(ranges, vec![0.."신비".len()]);
}

#[test]
fn test_search_is_deterministic() {
    setup_test_env();

    let searcher = BookSearcher::new_sample();
    let cases = [
        SearchOptions::new("탐험"),
        SearchOptions::new("").genre("동화").sort_by(SortMode::Latest),
        SearchOptions::new("ㅁ").level_filter(false).sort_by(SortMode::Popular),
        SearchOptions::new("").age(9).user_level(None),
    ];

    for options in &cases {
        let first = searcher.search_with_options(options);
        for _ in 0..5 {
            assert_eq!(searcher.search_with_options(options), first, "{options:?}");
        }
    }
}

#[test]
fn test_results_preserve_identity() {
    setup_test_env();

    let searcher = BookSearcher::new_sample();
    let catalog_ids: HashSet<u32> = searcher.catalog().iter().map(|e| e.id).collect();

    for query in ["", "ㅅ", "마법", "탐험", "버스", "김", "우주 탐험"] {
        let options = SearchOptions::new(query).level_filter(false);
        let results = searcher.search_with_options(&options);
        let mut seen = HashSet::new();
        for result in &results {
            assert!(catalog_ids.contains(&result.id()), "fabricated id {}", result.id());
            assert!(seen.insert(result.id()), "duplicated id {}", result.id());
            assert_eq!(searcher.catalog().get(result.id()), Some(&result.entry));
        }
    }
}

#[test]
fn test_empty_query_trending() {
    setup_test_env();

    let searcher = BookSearcher::new_sample();
    let options = SearchOptions::new("").genre(GenreFilter::All);
    let results = searcher.search_with_options(&options);

    assert_eq!(results.len(), 10);
    assert_eq!(ids(&results), vec![1, 4, 10, 3, 7, 2, 8, 5, 9, 6]);
    for pair in results.windows(2) {
        assert!(pair[0].entry.popularity_or_zero() >= pair[1].entry.popularity_or_zero());
    }

    // A bigger catalog is cut at twelve
    let big: Vec<CatalogEntry> = (1..=30)
        .map(|id| CatalogEntry::new(id, format!("책 {id}"), "동화", 9).with_popularity(f64::from(id)))
        .collect();
    let results = searcher_over(big).search("");
    assert_eq!(results.len(), 12);
    assert_eq!(results[0].id(), 30);
    assert_eq!(results[11].id(), 19);
}

#[test]
fn test_trending_ignores_level_settings() {
    setup_test_env();

    let searcher = BookSearcher::new_sample();
    let options = SearchOptions::new("").user_level(9).level_filter(true);
    assert_eq!(searcher.search_with_options(&options).len(), 10);
}

#[test]
fn test_exact_match_priority() {
    setup_test_env();

    let entry = CatalogEntry::new(1, "신비아파트", "만화", 3);
    let result = match_entry(&entry, "신비");
    assert!(result.matched);
    assert_eq!(result.match_type, MatchType::Exact);
    assert_eq!(result.score, 100);
}

#[test]
fn test_chosung_match_needs_every_initial() {
    setup_test_env();

    let entry = CatalogEntry::new(1, "신비아파트", "만화", 3);

    let result = match_entry(&entry, "ㅅㅂㅇㅍㅌ");
    assert!(result.matched);
    assert_eq!(result.match_type, MatchType::Chosung);
    assert_eq!(result.score, 80);

    // 파 contributes ㅍ, so skipping it breaks the contiguous sequence
    assert!(!match_entry(&entry, "ㅅㅂㅇㅌ").matched);
}

#[test]
fn test_fuzzy_bound() {
    setup_test_env();

    let entry = CatalogEntry::new(1, "타요", "동화", 2);

    let result = match_entry(&entry, "타요요요");
    assert!(result.matched);
    assert_eq!(result.match_type, MatchType::Fuzzy);
    assert_eq!(result.score, 50);

    assert!(!match_entry(&entry, "타요요요요").matched);
    assert!(!match_entry(&entry, "abc").matched);
}

#[test]
fn test_level_boosting() {
    setup_test_env();

    let searcher = searcher_over(vec![
        CatalogEntry::new(1, "공룡 친구", "과학", 4).with_popularity(50.0),
        CatalogEntry::new(2, "공룡 나라", "과학", 3).with_popularity(50.0),
    ]);
    let options = SearchOptions::new("공룡").user_level(3).sort_by(SortMode::Relevance);
    let results = searcher.search_with_options(&options);

    assert_eq!(ids(&results), vec![2, 1]);
    let exact = results[0].final_score.unwrap_or_default();
    let adjacent = results[1].final_score.unwrap_or_default();
    assert!(exact > adjacent);
    assert!((exact - 205.0).abs() < 1e-9);
    assert!((adjacent - 155.0).abs() < 1e-9);

    // Without boosts the tie falls back to catalog order
    let flat = searcher.with_config(SearchConfigBuilder::no_level_boost().build());
    assert_eq!(ids(&flat.search_with_options(&options)), vec![1, 2]);
}

#[test]
fn test_facets() {
    setup_test_env();

    let searcher = BookSearcher::new_sample();

    let options = SearchOptions::new("").genre("과학").level_filter(false);
    assert_eq!(ids(&searcher.search_with_options(&options)), vec![5, 9]);

    let options = SearchOptions::new("").age(7).level_filter(false);
    let mut found = ids(&searcher.search_with_options(&options));
    found.sort_unstable();
    assert_eq!(found, vec![1, 3, 6, 8]);

    let options = SearchOptions::from_json(
        r#"{"query":"","genreFilter":"판타지","userKrs":4,"krsFilterOn":true,"sortBy":"latest"}"#,
    )
    .expect("valid options");
    assert_eq!(ids(&searcher.search_with_options(&options)), vec![10, 2]);
}

#[test]
fn test_history_dedupe_and_cap() {
    setup_test_env();

    let mut history = QueryHistory::new(MemoryStore::new());
    for i in 1..=11 {
        history.add(&format!("query {i}"));
    }

    let list = history.list();
    assert_eq!(list.len(), 10);
    assert_eq!(list[0], "query 11");
    assert!(!list.contains(&"query 1".to_string()));

    history.add("query 5");
    let list = history.list();
    assert_eq!(list.len(), 10);
    assert_eq!(list[0], "query 5");
    assert_eq!(list.iter().filter(|q| *q == "query 5").count(), 1);
}

#[test]
fn test_empty_add_is_idempotent() {
    setup_test_env();

    let mut history = QueryHistory::new(MemoryStore::new());
    history.add("");
    history.add("   ");
    assert_eq!(history.store().raw(HISTORY_KEY), None);

    history.add("숲");
    let before = history.store().raw(HISTORY_KEY).map(str::to_string);
    history.add("");
    history.add("   ");
    assert_eq!(history.store().raw(HISTORY_KEY).map(str::to_string), before);
}

#[test]
fn test_history_file_layout() {
    setup_test_env();

    let dir = tempfile::tempdir().expect("temp dir");
    let mut history = QueryHistory::new(JsonFileStore::new(dir.path()));
    history.add("우주");
    history.add("공룡");

    let raw = std::fs::read_to_string(dir.path().join(format!("{HISTORY_KEY}.json")))
        .expect("history file");
    let stored: Vec<String> = serde_json::from_str(&raw).expect("JSON array of strings");
    assert_eq!(stored, vec!["공룡", "우주"]);
}

#[test]
fn test_edge_cases_do_not_panic() {
    setup_test_env();

    let searcher = BookSearcher::new_sample();
    let long_string = "가".repeat(1000);
    for query in ["", "   ", "XYZ123NONEXISTENT", long_string.as_str(), "ㄱ", "🚀", "(.*)"] {
        let _ = searcher.search(query);
        let _ = searcher.suggest(query);
        let _ = searcher.highlight("우주 탐험", query);
    }

    let empty = searcher_over(Vec::new());
    assert!(empty.search("").is_empty());
    assert!(empty.search("신비").is_empty());
    assert!(empty.suggest("신비").is_empty());
}
