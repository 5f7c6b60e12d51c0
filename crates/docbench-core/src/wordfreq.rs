//! Client-side word-frequency analysis for the word graph charts.
//!
//! Deliberately simple: no stemming, no language-aware segmentation.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::defaults::{WORD_FREQUENCY_LIMIT, WORD_MIN_EXCLUSIVE_LEN};
use crate::models::WordFrequency;

/// Characters removed before tokenising.
const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "that", "this", "with", "from", "have", "were", "will", "your", "they", "could", "which",
    ]
    .into_iter()
    .collect()
});

/// Top terms of `text` by frequency, most frequent first.
///
/// Ties keep the order in which the terms were first seen.
pub fn word_frequencies(text: &str) -> Vec<WordFrequency> {
    top_words(text, WORD_FREQUENCY_LIMIT)
}

/// Like [`word_frequencies`] with an explicit limit.
pub fn top_words(text: &str, limit: usize) -> Vec<WordFrequency> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WordFrequency> = Vec::new();

    for token in cleaned.split_whitespace() {
        if token.chars().count() <= WORD_MIN_EXCLUSIVE_LEN || STOP_WORDS.contains(token) {
            continue;
        }
        match index.get(token) {
            Some(&i) => counts[i].value += 1,
            None => {
                index.insert(token, counts.len());
                counts.push(WordFrequency {
                    name: token.to_string(),
                    value: 1,
                });
            }
        }
    }

    // stable: equal counts stay in encounter order
    counts.sort_by(|a, b| b.value.cmp(&a.value));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(freqs: &[WordFrequency]) -> Vec<(&str, usize)> {
        freqs.iter().map(|f| (f.name.as_str(), f.value)).collect()
    }

    #[test]
    fn test_ranking() {
        let freqs = word_frequencies("elephant elephant tiger tiger tiger lion");
        assert_eq!(
            pairs(&freqs),
            vec![("tiger", 3), ("elephant", 2), ("lion", 1)]
        );
    }

    #[test]
    fn test_three_letter_words_are_dropped() {
        assert!(word_frequencies("the cat sat on the mat the cat ran").is_empty());
    }

    #[test]
    fn test_four_letter_boundary_kept() {
        let freqs = word_frequencies("cats cat");
        assert_eq!(pairs(&freqs), vec![("cats", 1)]);
    }

    #[test]
    fn test_stop_words_dropped() {
        let freqs = word_frequencies("This could be which they were with data");
        assert_eq!(pairs(&freqs), vec![("data", 1)]);
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let freqs = word_frequencies("Drug, DRUG. drug! (drug) well-known");
        assert_eq!(pairs(&freqs), vec![("drug", 4), ("wellknown", 1)]);
    }

    #[test]
    fn test_punctuation_outside_set_is_kept() {
        // quotes and question marks are not stripped
        let freqs = word_frequencies("\"quoted\" really?");
        assert_eq!(pairs(&freqs), vec![("\"quoted\"", 1), ("really?", 1)]);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let freqs = word_frequencies("zebra apple mango apple zebra mango");
        assert_eq!(
            pairs(&freqs),
            vec![("zebra", 2), ("apple", 2), ("mango", 2)]
        );
    }

    #[test]
    fn test_limit_twenty() {
        let text: String = (0..30)
            .map(|i| format!("word{:02} ", i))
            .collect::<String>();
        let freqs = word_frequencies(&text);
        assert_eq!(freqs.len(), 20);
        assert_eq!(freqs[0].name, "word00");
        assert_eq!(freqs[19].name, "word19");
    }

    #[test]
    fn test_whitespace_variants() {
        let freqs = word_frequencies("  alpha\n\nalpha\tbeta  ");
        assert_eq!(pairs(&freqs), vec![("alpha", 2), ("beta", 1)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(word_frequencies("").is_empty());
    }
}
