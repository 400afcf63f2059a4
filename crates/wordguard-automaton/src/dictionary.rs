// Dictionary: automaton plus optional prefix index, with scan dispatch

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use wordguard_core::{Match, MatchType};

use crate::prefix::PrefixIndex;
use crate::source::LineSource;
use crate::trie::Automaton;
use crate::{AutomatonError, PREFIX_SCAN_MAX_LEN, Scanner};

/// The compiled dictionary.
///
/// Holds the automaton and, when prefix acceleration is enabled, a prefix
/// index kept in step with it. Both are rebuilt together by
/// [`set_words`](Self::set_words) and grown together by
/// [`add_words`](Self::add_words).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    automaton: Automaton,
    prefix_index: Option<PrefixIndex>,
    #[serde(default = "default_prefix_scan_max_len")]
    prefix_scan_max_len: usize,
}

fn default_prefix_scan_max_len() -> usize {
    PREFIX_SCAN_MAX_LEN
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new(enable_prefix_index: bool) -> Self {
        Self {
            automaton: Automaton::new(),
            prefix_index: enable_prefix_index.then(PrefixIndex::new),
            prefix_scan_max_len: PREFIX_SCAN_MAX_LEN,
        }
    }

    /// Set the text length from which scans bypass the prefix index.
    pub fn with_prefix_scan_max_len(mut self, max_len: usize) -> Self {
        self.prefix_scan_max_len = max_len;
        self
    }

    pub fn set_prefix_scan_max_len(&mut self, max_len: usize) {
        self.prefix_scan_max_len = max_len;
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn prefix_index(&self) -> Option<&PrefixIndex> {
        self.prefix_index.as_ref()
    }

    pub fn prefix_index_enabled(&self) -> bool {
        self.prefix_index.is_some()
    }

    /// Turn prefix acceleration on or off. Enabling it indexes the words
    /// already in the automaton.
    pub fn set_prefix_index_enabled(&mut self, enabled: bool) {
        match (enabled, self.prefix_index.is_some()) {
            (true, false) => {
                self.prefix_index = Some(PrefixIndex::from_words(self.automaton.words()));
            }
            (false, true) => self.prefix_index = None,
            _ => {}
        }
    }

    /// Replace the whole dictionary. Words are trimmed; blank ones skipped.
    ///
    /// Returns the number of distinct words afterwards.
    pub fn set_words<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear();
        self.add_words(words);
        self.automaton.len()
    }

    /// Replace the whole dictionary from a line-oriented source, read lazily.
    ///
    /// Returns the number of distinct words afterwards.
    pub fn set_words_from_lines<R: BufRead>(&mut self, source: R) -> Result<usize, AutomatonError> {
        self.clear();
        self.add_words_from_lines(source)?;
        Ok(self.automaton.len())
    }

    /// Grow the dictionary from a line-oriented source, read lazily.
    ///
    /// Words read before a failing line stay in the dictionary. Returns the
    /// number of words read.
    pub fn add_words_from_lines<R: BufRead>(&mut self, source: R) -> Result<usize, AutomatonError> {
        let mut read = 0;
        for word in LineSource::new(source) {
            self.insert(&word?);
            read += 1;
        }
        debug!(read, words = self.automaton.len(), "loaded words from line source");
        Ok(read)
    }

    /// Grow the dictionary. Words are trimmed; blank ones skipped.
    ///
    /// Returns the number of non-blank words processed, including ones that
    /// were already present.
    pub fn add_words<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut processed = 0;
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            self.insert(word);
            processed += 1;
        }
        processed
    }

    fn insert(&mut self, word: &str) {
        self.automaton.insert(word);
        if let Some(index) = self.prefix_index.as_mut() {
            index.insert(word);
        }
    }

    /// Remove every word, keeping the prefix-index setting.
    pub fn clear(&mut self) {
        self.automaton.clear();
        if let Some(index) = self.prefix_index.as_mut() {
            index.clear();
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.automaton.contains(word)
    }

    pub fn len(&self) -> usize {
        self.automaton.len()
    }

    pub fn is_empty(&self) -> bool {
        self.automaton.is_empty()
    }

    /// Every word in the dictionary, sorted.
    pub fn words(&self) -> Vec<String> {
        match &self.prefix_index {
            Some(index) if !index.is_empty() => index.words(),
            _ => self.automaton.words(),
        }
    }

    /// Whether a scan over `text_len` codepoints would use the prefix index.
    pub fn uses_prefix_scan(&self, text_len: usize) -> bool {
        match &self.prefix_index {
            Some(index) => !index.is_empty() && text_len > 0 && text_len < self.prefix_scan_max_len,
            None => false,
        }
    }
}

impl Scanner for Dictionary {
    fn scan(&self, text: &[char], match_type: MatchType) -> Vec<Match> {
        match &self.prefix_index {
            Some(index) if self.uses_prefix_scan(text.len()) => {
                trace!(chars = text.len(), "prefix index scan");
                index.scan(text, match_type)
            }
            _ => {
                trace!(chars = text.len(), "trie scan");
                self.automaton.scan(text, match_type)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn set_words_rebuilds_both_structures() {
        let mut dict = Dictionary::new(true);
        dict.set_words(["old"]);
        dict.set_words([" 坏蛋 ", "", "敏感词"]);
        assert_eq!(dict.len(), 2);
        assert!(!dict.contains("old"));
        let index = dict.prefix_index().unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.bucket('o').is_none());
    }

    #[test]
    fn add_words_is_additive() {
        let mut dict = Dictionary::new(true);
        dict.set_words(["a", "b"]);
        assert_eq!(dict.add_words(["b", " ", "c"]), 2);
        assert_eq!(dict.words(), vec!["a", "b", "c"]);
    }

    #[test]
    fn disabled_index_stays_absent() {
        let mut dict = Dictionary::new(false);
        dict.set_words(["x"]);
        assert!(dict.prefix_index().is_none());
        assert!(!dict.uses_prefix_scan(5));
        assert_eq!(dict.words(), vec!["x"]);
    }

    #[test]
    fn enabling_index_indexes_existing_words() {
        let mut dict = Dictionary::new(false);
        dict.set_words(["ab", "cd"]);
        dict.set_prefix_index_enabled(true);
        assert_eq!(dict.prefix_index().unwrap().len(), 2);
        dict.set_prefix_index_enabled(false);
        assert!(dict.prefix_index().is_none());
    }

    #[test]
    fn long_text_bypasses_prefix_index() {
        let mut dict = Dictionary::new(true).with_prefix_scan_max_len(8);
        dict.set_words(["ab"]);
        assert!(dict.uses_prefix_scan(7));
        assert!(!dict.uses_prefix_scan(8));
        assert!(!dict.uses_prefix_scan(0));
        let text = chars("xxabxxxxab");
        assert_eq!(
            dict.scan(&text, MatchType::Min),
            vec![Match::new("ab", 2), Match::new("ab", 8)]
        );
    }

    #[test]
    fn both_scan_paths_agree() {
        let words = ["AB", "ABC", "BCD", "坏蛋", "坏", "蛋糕"];
        let mut indexed = Dictionary::new(true);
        indexed.set_words(words);
        let mut plain = Dictionary::new(false);
        plain.set_words(words);
        for text in ["ABCD", "坏蛋糕", "ABCDABC坏", "xBCDy", "蛋糕坏蛋"] {
            let text = chars(text);
            for mt in [MatchType::Min, MatchType::Max] {
                assert_eq!(indexed.scan(&text, mt), plain.scan(&text, mt));
            }
        }
    }

    #[test]
    fn set_words_from_lines() {
        let mut dict = Dictionary::new(true);
        let count = dict.set_words_from_lines("一\n\n二\n".as_bytes()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(dict.prefix_index().unwrap().len(), 2);
    }

    #[test]
    fn add_words_from_lines_keeps_existing() {
        let mut dict = Dictionary::new(false);
        dict.set_words(["一"]);
        assert_eq!(dict.add_words_from_lines("一\n二\n".as_bytes()).unwrap(), 2);
        assert_eq!(dict.words(), vec!["一", "二"]);
    }

    #[test]
    fn snapshot_through_json() {
        let mut dict = Dictionary::new(true);
        dict.set_words(["坏蛋", "ab"]);
        let json = serde_json::to_string(&dict).unwrap();
        let back: Dictionary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dict);
    }
}
