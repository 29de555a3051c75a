//! Frequency-based theme extraction over post titles.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Common English stopwords plus contraction artifacts, filtered out of
/// theme counting.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "my", "your", "his", "her",
    "its", "our", "their", "what", "which", "who", "when", "where", "why", "how", "all", "each",
    "every", "both", "few", "more", "most", "other", "some", "such", "no", "not", "only", "same",
    "so", "than", "too", "very", "just", "also", "now", "here", "there", "about", "into", "over",
    "after", "before", "up", "down", "out", "off", "if", "then", "else", "because", "as", "until",
    "while", "during", "through", "again", "once", "any", "get", "got", "like", "know", "think",
    "want", "need", "use", "using", "used", "new", "first", "last", "one", "two", "way", "even",
    "well", "back", "still", "going", "make", "made", "anyone", "someone", "everyone",
    "something", "anything", "everything", "really", "much", "many", "dont", "don't", "im", "i'm",
    "ive", "i've",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

// Lowercase alphabetic words of length >= 3
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("invalid word pattern"));

/// Extract the top-N keywords across a set of titles, stopwords removed.
/// Deterministic; no state is retained between calls.
pub fn extract_common_themes<'a>(
    titles: impl IntoIterator<Item = &'a str>,
    top_n: usize,
) -> Vec<String> {
    let words = titles.into_iter().flat_map(|title| {
        WORD_PATTERN
            .find_iter(title)
            .map(|m| m.as_str().to_lowercase())
            .filter(|w| !STOPWORD_SET.contains(w.as_str()))
            .collect::<Vec<_>>()
    });
    rank_by_frequency(words, top_n)
}

/// Top-N items by descending frequency; ties broken by first-encountered
/// order (standard most-common-N semantics).
pub fn rank_by_frequency(items: impl IntoIterator<Item = String>, top_n: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, item) in items.into_iter().enumerate() {
        let entry = counts.entry(item).or_insert((0, index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(item, (count, first_seen))| (item, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(top_n).map(|(item, _, _)| item).collect()
}
