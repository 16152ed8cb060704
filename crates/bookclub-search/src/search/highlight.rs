//! Which parts of a title to emphasise for a query.
//!
//! The query is first tried against the title's initial consonants, and the
//! characters behind the first hit are emphasised. When that fails, every
//! literal case-insensitive occurrence is emphasised instead. Characters that
//! are not Hangul syllables stand for themselves in the consonant sequence, so
//! a Latin or jamo query highlights only its first occurrence.

use std::ops::Range;

use regex::RegexBuilder;
use tracing::warn;

use super::matcher::chosung_of;

/// Byte ranges of `text` to emphasise for `query`, in order and non-overlapping.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }

    if let Some(range) = chosung_range(text, query) {
        return vec![range];
    }

    literal_ranges(text, query)
}

/// Split `text` into `(segment, emphasised)` pieces along `ranges`.
///
/// `ranges` must be sorted, non-overlapping and on char boundaries, as
/// returned by [`highlight_ranges`].
pub fn split_highlighted<'a>(text: &'a str, ranges: &[Range<usize>]) -> Vec<(&'a str, bool)> {
    let mut segments = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            segments.push((&text[cursor..range.start], false));
        }
        if range.end > range.start {
            segments.push((&text[range.clone()], true));
        }
        cursor = range.end;
    }
    if cursor < text.len() {
        segments.push((&text[cursor..], false));
    }
    segments
}

fn literal_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.find_iter(text).map(|m| m.range()).collect(),
        Err(e) => {
            warn!(error = %e, "Could not build highlight pattern");
            Vec::new()
        }
    }
}

/// First run of characters whose initial consonants spell the query.
fn chosung_range(text: &str, query: &str) -> Option<Range<usize>> {
    let keys: Vec<(usize, char)> = text
        .char_indices()
        .map(|(offset, c)| (offset, chosung_of(c.to_lowercase().next().unwrap_or(c))))
        .collect();
    let wanted: Vec<char> = query.to_lowercase().chars().collect();
    if wanted.is_empty() || wanted.len() > keys.len() {
        return None;
    }

    let start = keys
        .windows(wanted.len())
        .position(|window| window.iter().map(|(_, key)| *key).eq(wanted.iter().copied()))?;
    let begin = keys[start].0;
    let end = keys
        .get(start + wanted.len())
        .map_or(text.len(), |(offset, _)| *offset);
    Some(begin..end)
}
