//! Game-level theme extraction
//!
//! Pulls a handful of recurring short phrases out of the whole thread by
//! plain term frequency over word bigrams and trigrams. A lightweight
//! stand-in for TF-IDF keyphrase mining; good enough for a side channel that
//! is not part of the timeline contract.

use std::collections::HashMap;

/// Themes returned per game
pub const DEFAULT_MAX_THEMES: usize = 5;

/// Times a phrase must occur before it counts as a theme
const MIN_FREQUENCY: usize = 3;

/// Function words excluded before phrases are formed
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "an", "and", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "did", "do", "for", "from", "get", "got", "had", "has", "have",
    "he", "him", "his", "how", "i", "if", "in", "is", "it", "its", "just", "like", "me", "my",
    "of", "on", "or", "our", "out", "she", "so", "that", "the", "their", "them", "they", "this",
    "to", "up", "was", "we", "were", "what", "when", "who", "will", "with", "you", "your",
];

/// Franchise names excluded from themes; fans repeat them constantly and
/// they carry no information beyond the matchup itself
const TEAM_NAMES: &[&str] = &[
    "lakers",
    "mavericks",
    "celtics",
    "bucks",
    "warriors",
    "grizzlies",
    "heat",
    "nuggets",
];

/// Extract up to `max_themes` recurring 2-3 word phrases from the texts.
///
/// Ties break lexicographically so the output is deterministic for a given
/// input set.
pub fn extract_themes<'a, I>(texts: I, max_themes: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<String> = texts
        .into_iter()
        .flat_map(tokenize)
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for n in 2..=3 {
        for gram in tokens.windows(n) {
            *counts.entry(gram.join(" ")).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(phrase, count)| *count >= MIN_FREQUENCY && !is_filtered(phrase))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(max_themes)
        .map(|(phrase, _)| phrase)
        .collect()
}

/// Lowercase word tokens, punctuation dropped
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| {
            t.chars()
                .filter(|c| c.is_alphanumeric() || *c == '\'')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Drop phrases naming a team or made of nothing but numbers
fn is_filtered(phrase: &str) -> bool {
    let mut all_numeric = true;
    for word in phrase.split(' ') {
        if TEAM_NAMES.contains(&word) {
            return true;
        }
        if !word.chars().all(|c| c.is_ascii_digit()) {
            all_numeric = false;
        }
    }
    all_numeric
}
