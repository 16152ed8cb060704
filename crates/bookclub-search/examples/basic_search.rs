//! Basic book search functionality
//!
//! This example demonstrates the fundamental search operations:
//! - Creating a searcher over the embedded sample catalog
//! - Title, chosung and author searches
//! - Autocomplete and highlighting

use bookclub_search::{BookSearcher, RankedEntry, split_highlighted};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let searcher = BookSearcher::new_sample();

    // Empty query: the trending listing
    println!("Trending:");
    print_search_results(&searcher.trending(), 5);

    // Title substring
    println!("\nSearching for '마법':");
    print_search_results(&searcher.search("마법"), 3);

    // Initial consonants only
    println!("\nSearching for 'ㄱㄹ':");
    print_search_results(&searcher.search("ㄱㄹ"), 3);

    // Author name
    println!("\nSearching for '박모험':");
    print_search_results(&searcher.search("박모험"), 3);

    // Autocomplete while typing, with the matched part marked
    println!("\nSuggestions for '탐험':");
    for suggestion in searcher.suggest("탐험") {
        let title = &suggestion.entry.title;
        let ranges = searcher.highlight(title, "탐험");
        let marked: String = split_highlighted(title, &ranges)
            .into_iter()
            .map(|(part, hit)| if hit { format!("[{part}]") } else { part.to_string() })
            .collect();
        println!("  {marked} ({})", suggestion.match_result.match_type);
    }

    Ok(())
}

fn print_search_results(results: &[RankedEntry], limit: usize) {
    for (i, result) in results.iter().take(limit).enumerate() {
        println!(
            "  {}. {} (K{}) - Match: {}, Score: {}",
            i + 1,
            result.title(),
            result.entry.level,
            result.match_result.match_type,
            result
                .final_score
                .map_or_else(|| "-".to_string(), |score| format!("{score:.1}"))
        );
    }

    if results.len() > limit {
        println!("  ... and {} more results", results.len() - limit);
    }
}
