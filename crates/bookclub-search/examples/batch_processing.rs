//! Batch processing for bulk searches
//!
//! This example runs many option sets against one catalog, comparing
//! one-at-a-time searches with the parallel bulk search.

use std::time::Instant;

use bookclub_search::{BookSearcher, SearchOptions, SortMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let searcher = BookSearcher::new_sample();

    let queries: Vec<SearchOptions> = ["신비", "ㅁㅂ", "탐험", "공룡", "버스", "우주 탐험"]
        .into_iter()
        .flat_map(|q| {
            [
                SearchOptions::new(q),
                SearchOptions::new(q).level_filter(false).sort_by(SortMode::Popular),
            ]
        })
        .collect();

    println!("Processing {} searches...", queries.len());

    let start = Instant::now();
    let individual: Vec<_> = queries
        .iter()
        .map(|options| searcher.search_with_options(options))
        .collect();
    let individual_time = start.elapsed();

    let start = Instant::now();
    let batch = searcher.search_bulk(&queries);
    let batch_time = start.elapsed();

    println!("  Individual: {individual_time:?}");
    println!("  Batch:      {batch_time:?}");

    if individual != batch {
        return Err("bulk search disagreed with individual searches".into());
    }

    for (options, results) in queries.iter().zip(&batch) {
        let titles: Vec<&str> = results.iter().map(|r| r.title()).collect();
        println!(
            "  {:<10} [{}] -> {}",
            options.query,
            options.sort_by,
            titles.join(", ")
        );
    }

    Ok(())
}
