// Whitelist: direct and contextual exemption of matches

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wordguard_core::Match;

/// Set of exemption phrases.
///
/// A match is exempt when its word is itself whitelisted, or when it sits
/// inside a longer whitelisted phrase that actually occurs at that place in
/// the text (so "ass" inside "assessment" is not reported).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Whitelist {
    phrases: BTreeSet<String>,
}

impl Whitelist {
    /// Create an empty whitelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from phrases. Blank phrases are skipped.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut whitelist = Self::new();
        whitelist.extend(phrases);
        whitelist
    }

    /// Add one phrase. Returns `true` if it was not present.
    pub fn insert(&mut self, phrase: &str) -> bool {
        let phrase = phrase.trim();
        !phrase.is_empty() && self.phrases.insert(phrase.to_string())
    }

    /// Add phrases, returning how many were new.
    pub fn extend<I, S>(&mut self, phrases: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        phrases
            .into_iter()
            .filter(|p| self.insert(p.as_ref()))
            .count()
    }

    /// Remove one phrase. Returns `true` if it was present.
    pub fn remove(&mut self, phrase: &str) -> bool {
        self.phrases.remove(phrase.trim())
    }

    pub fn clear(&mut self) {
        self.phrases.clear();
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains(phrase)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    /// All phrases, sorted.
    pub fn phrases(&self) -> Vec<String> {
        self.phrases.iter().cloned().collect()
    }

    /// The word is itself a whitelisted phrase.
    pub fn is_direct_exempt(&self, word: &str) -> bool {
        self.phrases.contains(word)
    }

    /// The word, found at `offset` in `text`, lies inside a whitelisted
    /// phrase that occurs in `text` around it.
    ///
    /// Every position of `word` within each phrase is tried, so a word
    /// occurring twice in a phrase is exempt under either reading.
    pub fn is_contextually_exempt(&self, word: &str, offset: usize, text: &[char]) -> bool {
        let word: Vec<char> = word.chars().collect();
        if word.is_empty() {
            return false;
        }
        self.phrases.iter().any(|phrase| {
            let phrase: Vec<char> = phrase.chars().collect();
            if phrase.len() < word.len() {
                return false;
            }
            phrase
                .windows(word.len())
                .enumerate()
                .filter(|(_, window)| *window == word.as_slice())
                .any(|(relative, _)| occurs_at(text, &phrase, offset, relative))
        })
    }

    /// Drop every match that is directly or contextually exempt. Survivors
    /// keep their order, offsets and lengths.
    pub fn filter(&self, matches: Vec<Match>, text: &[char]) -> Vec<Match> {
        if self.is_empty() || matches.is_empty() {
            return matches;
        }
        matches
            .into_iter()
            .filter(|m| {
                !self.is_direct_exempt(&m.word)
                    && !self.is_contextually_exempt(&m.word, m.offset, text)
            })
            .collect()
    }
}

/// `phrase` occurs in `text` such that its character `relative` lands on
/// `offset`.
fn occurs_at(text: &[char], phrase: &[char], offset: usize, relative: usize) -> bool {
    let Some(start) = offset.checked_sub(relative) else {
        return false;
    };
    text.get(start..start + phrase.len()) == Some(phrase)
}
