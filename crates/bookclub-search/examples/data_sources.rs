//! Catalog sources and query history
//!
//! This example demonstrates loading a catalog from the embedded sample or a
//! JSON file, and keeping submitted queries in a file-backed history.

use std::path::PathBuf;

use bookclub_search::{
    BookSearcher, CatalogSource, JsonFileStore, QueryHistory, SearchOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Bookclub Search - Data Source Examples\n");

    // Method 1: the embedded sample
    println!("1. Using the embedded sample catalog:");
    let sample = BookSearcher::from_source(&CatalogSource::Sample)?;
    println!("   {} books, genres: {:?}\n", sample.catalog().len(), sample.catalog().genres());

    // Method 2: a JSON file, written here from the sample
    println!("2. Loading a catalog from a JSON file:");
    let dir = std::env::temp_dir().join(format!("bookclub-example-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("books.json");
    std::fs::write(&path, serde_json::to_string(sample.catalog().entries())?)?;
    let from_file = BookSearcher::from_source(&CatalogSource::File(path))?;
    println!("   {} books loaded\n", from_file.catalog().len());

    // Method 3: whatever BOOKCLUB_CATALOG points at
    println!("3. Catalog from the environment:");
    match BookSearcher::from_source(&CatalogSource::from_env()) {
        Ok(searcher) => println!("   {} books\n", searcher.catalog().len()),
        Err(e) => println!("   Could not load: {e}\n"),
    }

    // Query history persisted as <dir>/bc3_search_history.json
    println!("4. Query history:");
    let history_dir: PathBuf = dir.join("history");
    let mut history = QueryHistory::new(JsonFileStore::new(&history_dir));
    for query in ["공룡", "신비", "  ", "공룡"] {
        let results = from_file.submit(&mut history, &SearchOptions::new(query).level_filter(false));
        println!("   '{query}' -> {} results", results.len());
    }
    println!("   Recent: {:?}", history.list());

    history.clear();
    std::fs::remove_dir_all(&dir)?;

    Ok(())
}
