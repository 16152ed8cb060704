//! Search configuration and customization
//!
//! This example demonstrates how to customize ranking with presets, the
//! fluent builder and per-call search options.

use bookclub_search::{
    BookSearcher, SearchConfig, SearchConfigBuilder, SearchOptions, SortMode, parse_level,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let searcher = BookSearcher::new_sample();

    println!("Comparing different search configurations for '탐험':\n");

    test_preset_configs(&searcher)?;
    test_custom_configs(&searcher)?;
    test_search_options(&searcher)?;

    Ok(())
}

fn test_preset_configs(searcher: &BookSearcher) -> Result<(), Box<dyn std::error::Error>> {
    println!("Preset configurations:");

    let presets = [
        ("Default", SearchConfig::default()),
        ("Browse", SearchConfigBuilder::browse().build()),
        ("No boost", SearchConfigBuilder::no_level_boost().build()),
    ];

    for (name, config) in presets {
        let searcher = searcher.clone().with_config(config);
        let results = searcher.search("탐험");
        let top = results.first().map_or("none", |r| r.title());
        println!(
            "  {name:<9} {} results, top: {top} (trending limit: {})",
            results.len(),
            searcher.config().trending_limit
        );
    }
    println!();

    Ok(())
}

fn test_custom_configs(searcher: &BookSearcher) -> Result<(), Box<dyn std::error::Error>> {
    println!("Custom configurations:");

    let config = SearchConfig::builder()
        .level_window(2)
        .popularity_weight(0.2)
        .scoring()
        .custom_boosts(3.0, 1.2)?
        .done()
        .build();
    let results = searcher.clone().with_config(config).search("탐험");
    for result in &results {
        println!(
            "  {} (K{}): {:.1}",
            result.title(),
            result.entry.level,
            result.final_score.unwrap_or_default()
        );
    }

    // Invalid boosts are rejected at build time
    if let Err(e) = SearchConfig::builder().scoring().custom_boosts(0.5, 1.0) {
        println!("  Rejected: {e}");
    }
    println!();

    Ok(())
}

fn test_search_options(searcher: &BookSearcher) -> Result<(), Box<dyn std::error::Error>> {
    println!("Search options:");

    // Level from a profile label, options from the front end's JSON
    let level = parse_level("KRS K4").unwrap_or(bookclub_search::DEFAULT_USER_LEVEL);
    let options = SearchOptions::from_json(r#"{"query": "탐험", "sortBy": "latest"}"#)?
        .user_level(level);
    for result in searcher.search_with_options(&options) {
        println!("  latest: {} (#{})", result.title(), result.id());
    }

    let options = SearchOptions::new("")
        .age(7)
        .level_filter(false)
        .sort_by("popular".parse::<SortMode>()?);
    for result in searcher.search_with_options(&options) {
        println!("  age 7:  {}", result.title());
    }

    Ok(())
}
