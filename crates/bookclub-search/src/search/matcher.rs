//! Per-entry text matching.
//!
//! A query is tested against one catalog entry with an ordered list of rules;
//! the first rule that fires decides the match type and base score. Rules are
//! never combined.

use std::fmt;

use bookclub_catalog::CatalogEntry;
use rapidfuzz::distance::levenshtein;
use serde::Serialize;

/// First code point of the Hangul syllables block (가).
const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;
/// Number of precomposed Hangul syllables.
const HANGUL_SYLLABLE_COUNT: u32 = 11172;
/// Syllables sharing one initial consonant (21 vowels x 28 finals).
const SYLLABLES_PER_INITIAL: u32 = 588;

/// The 19 initial consonants in Unicode order.
const CHOSUNG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ',
    'ㅍ', 'ㅎ',
];

const PARTIAL_MIN_QUERY_CHARS: usize = 2;
const FUZZY_MIN_QUERY_CHARS: usize = 3;
const FUZZY_MAX_DISTANCE: usize = 2;

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Empty query: every entry is eligible
    All,
    /// Query is a substring of the title
    Exact,
    /// Query is a substring of the title's initial consonants
    Chosung,
    /// Query is a substring of the author
    Author,
    /// Query of two or more characters found inside the title
    Partial,
    /// Whole title within a small edit distance of the query
    Fuzzy,
    /// No rule fired
    None,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Exact => "exact",
            Self::Chosung => "chosung",
            Self::Author => "author",
            Self::Partial => "partial",
            Self::Fuzzy => "fuzzy",
            Self::None => "none",
        }
    }

    /// Base score awarded by the rule, in `0..=100`.
    pub fn base_score(self) -> u8 {
        match self {
            Self::All | Self::Exact => 100,
            Self::Chosung => 80,
            Self::Partial => 70,
            Self::Author => 60,
            Self::Fuzzy => 50,
            Self::None => 0,
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of matching one entry against one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched: bool,
    pub score: u8,
    pub match_type: MatchType,
}

impl MatchResult {
    fn hit(match_type: MatchType) -> Self {
        Self {
            matched: true,
            score: match_type.base_score(),
            match_type,
        }
    }

    /// Result for the empty query.
    pub fn all() -> Self {
        Self::hit(MatchType::All)
    }

    pub fn none() -> Self {
        Self {
            matched: false,
            score: 0,
            match_type: MatchType::None,
        }
    }
}

/// Replace every Hangul syllable with its initial consonant.
///
/// Characters outside the syllable block pass through unchanged, so the
/// output has exactly as many characters as the input.
pub fn extract_chosung(text: &str) -> String {
    text.chars().map(chosung_of).collect()
}

/// Initial consonant of a Hangul syllable, or the character itself.
pub(crate) fn chosung_of(c: char) -> char {
    let offset = (c as u32).wrapping_sub(HANGUL_SYLLABLE_BASE);
    if offset < HANGUL_SYLLABLE_COUNT {
        CHOSUNG[(offset / SYLLABLES_PER_INITIAL) as usize]
    } else {
        c
    }
}

/// Levenshtein distance between two strings, counted in characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Match `query` against `entry`.
///
/// Comparison is case-insensitive. The rules, in order:
/// 1. title contains the query (100, exact)
/// 2. title's chosung sequence contains the query (80, chosung)
/// 3. author contains the query (60, author)
/// 4. query of 2+ characters found in the title (70, partial)
/// 5. query of 3+ characters within edit distance 2 of the whole title (50, fuzzy)
///
/// Rule 4 can only fire when rule 1 already has, so it never wins; it is kept
/// so the rule table stays in its published order.
pub fn match_entry(entry: &CatalogEntry, query: &str) -> MatchResult {
    if query.is_empty() {
        return MatchResult::all();
    }

    let q = query.to_lowercase();
    let title = entry.title.to_lowercase();

    if title.contains(&q) {
        return MatchResult::hit(MatchType::Exact);
    }

    if extract_chosung(&title).contains(&q) {
        return MatchResult::hit(MatchType::Chosung);
    }

    if entry.author_or_empty().to_lowercase().contains(&q) {
        return MatchResult::hit(MatchType::Author);
    }

    let q_chars: Vec<char> = q.chars().collect();

    if q_chars.len() >= PARTIAL_MIN_QUERY_CHARS && contains_window(&title, &q_chars) {
        return MatchResult::hit(MatchType::Partial);
    }

    if q_chars.len() >= FUZZY_MIN_QUERY_CHARS && edit_distance(&title, &q) <= FUZZY_MAX_DISTANCE {
        return MatchResult::hit(MatchType::Fuzzy);
    }

    MatchResult::none()
}

/// Slide a window of the query's length over the title, starting at every
/// position but the last.
fn contains_window(title: &str, q_chars: &[char]) -> bool {
    let title_chars: Vec<char> = title.chars().collect();
    let last_start = title_chars.len().saturating_sub(1);
    (0..last_start).any(|i| {
        let end = (i + q_chars.len()).min(title_chars.len());
        title_chars[i..end] == *q_chars
    })
}
