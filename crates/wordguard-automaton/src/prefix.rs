// Prefix index: whole words bucketed by first character

use std::collections::BTreeSet;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use wordguard_core::{Match, MatchType};

use crate::Scanner;
use crate::align::align;

/// Mapping from first character to the distinct words beginning with it.
///
/// Every word inserted appears in exactly one bucket, keyed by its first
/// character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixIndex {
    buckets: HashMap<char, BTreeSet<String>>,
}

impl PrefixIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a list of words. Blank words are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for word in words {
            index.insert(word.as_ref());
        }
        index
    }

    /// Add a word under its first character. Returns `true` if it was new.
    pub fn insert(&mut self, word: &str) -> bool {
        match word.chars().next() {
            Some(first) => self
                .buckets
                .entry(first)
                .or_default()
                .insert(word.to_string()),
            None => false,
        }
    }

    /// Remove every bucket.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// The bucket for `first`, if any word starts with it.
    pub fn bucket(&self, first: char) -> Option<&BTreeSet<String>> {
        self.buckets.get(&first)
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of words across buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Every indexed word, sorted.
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.buckets.values().flatten().cloned().collect();
        words.sort_unstable();
        words
    }

    /// Every literal occurrence of every indexed word whose first character
    /// appears in `text`, including occurrences that overlap each other.
    ///
    /// The result is unaligned: pass it through [`align`] to obtain
    /// scan-equivalent output.
    pub fn find_all(&self, text: &[char]) -> Vec<Match> {
        let present: HashSet<char> = text.iter().copied().collect();
        let mut found = Vec::new();
        for first in present {
            let Some(bucket) = self.buckets.get(&first) else {
                continue;
            };
            for word in bucket {
                let word_chars: Vec<char> = word.chars().collect();
                if word_chars.len() > text.len() {
                    continue;
                }
                for (offset, window) in text.windows(word_chars.len()).enumerate() {
                    if window == word_chars.as_slice() {
                        found.push(Match {
                            word: word.clone(),
                            offset,
                            length: word_chars.len(),
                        });
                    }
                }
            }
        }
        found
    }
}

impl Scanner for PrefixIndex {
    fn scan(&self, text: &[char], match_type: MatchType) -> Vec<Match> {
        let mut found = self.find_all(text);
        if found.len() > 1 {
            found = align(found, match_type);
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::Automaton;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn words_bucketed_by_first_char() {
        let index = PrefixIndex::from_words(["坏蛋", "坏人", "敏感"]);
        assert_eq!(index.bucket_count(), 2);
        assert_eq!(index.bucket('坏').unwrap().len(), 2);
        assert!(index.bucket('敏').unwrap().contains("敏感"));
        assert!(index.bucket('x').is_none());
    }

    #[test]
    fn duplicate_words_stored_once() {
        let mut index = PrefixIndex::new();
        assert!(index.insert("abc"));
        assert!(!index.insert("abc"));
        assert!(!index.insert(""));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn find_all_includes_overlapping_occurrences() {
        let index = PrefixIndex::from_words(["aa"]);
        let mut found = index.find_all(&chars("aaa"));
        found.sort_by_key(|m| m.offset);
        assert_eq!(found, vec![Match::new("aa", 0), Match::new("aa", 1)]);
    }

    #[test]
    fn scan_aligns_raw_matches() {
        let index = PrefixIndex::from_words(["AB", "ABC"]);
        assert_eq!(
            index.scan(&chars("ABCD"), MatchType::Min),
            vec![Match::new("AB", 0)]
        );
        assert_eq!(
            index.scan(&chars("ABCD"), MatchType::Max),
            vec![Match::new("ABC", 0)]
        );
    }

    #[test]
    fn scan_matches_trie_walk() {
        // "aa" at 1 overlaps "xa" at 0; the trie walk then finds "aa" at 2.
        let words = ["xa", "aa", "ab", "b", "abc", "ca"];
        let index = PrefixIndex::from_words(words);
        let automaton = Automaton::from_words(words);
        for text in ["xaaa", "abcabca", "bbxaab", "cabxa", ""] {
            let text = chars(text);
            for mt in [MatchType::Min, MatchType::Max] {
                assert_eq!(index.scan(&text, mt), automaton.scan(&text, mt));
            }
        }
    }

    #[test]
    fn word_longer_than_text_is_skipped() {
        let index = PrefixIndex::from_words(["abcdef"]);
        assert!(index.find_all(&chars("abc")).is_empty());
    }
}
