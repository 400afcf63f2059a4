// Match: one dictionary hit inside normalized text

use serde::{Deserialize, Serialize};

/// A dictionary word found in normalized text.
///
/// `offset` and `length` count Unicode codepoints, not bytes, and are relative
/// to the normalized text the scan ran over. For every match produced by a
/// scan, `offset + length <= text length`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Match {
    /// The matched dictionary word, as it appears in the text.
    pub word: String,

    /// Codepoint index of the first matched character.
    pub offset: usize,

    /// Number of codepoints covered by the match.
    pub length: usize,
}

impl Match {
    /// Create a new match. The length is computed from `word`.
    pub fn new(word: impl Into<String>, offset: usize) -> Self {
        let word = word.into();
        let length = word.chars().count();
        Self {
            word,
            offset,
            length,
        }
    }

    /// Build a match from a slice of the scanned text.
    pub fn from_chars(text: &[char], offset: usize, length: usize) -> Self {
        Self {
            word: text[offset..offset + length].iter().collect(),
            offset,
            length,
        }
    }

    /// Exclusive end position (`offset + length`).
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether the `[offset, end)` ranges of two matches intersect.
    pub fn overlaps(&self, other: &Match) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_new_counts_codepoints() {
        let m = Match::new("坏蛋", 2);
        assert_eq!(m.length, 2);
        assert_eq!(m.offset, 2);
        assert_eq!(m.end(), 4);
    }

    #[test]
    fn match_from_chars() {
        let text: Vec<char> = "这是坏蛋".chars().collect();
        let m = Match::from_chars(&text, 2, 2);
        assert_eq!(m.word, "坏蛋");
        assert_eq!(m, Match::new("坏蛋", 2));
    }

    #[test]
    fn overlap_detection() {
        let a = Match::new("abc", 0);
        let b = Match::new("cd", 2);
        let c = Match::new("de", 3);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn adjacent_matches_do_not_overlap() {
        let a = Match::new("ab", 0);
        let b = Match::new("cd", 2);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn ordering_is_by_word_then_offset() {
        let mut v = vec![Match::new("b", 0), Match::new("a", 5), Match::new("a", 1)];
        v.sort();
        assert_eq!(v[0], Match::new("a", 1));
        assert_eq!(v[2], Match::new("b", 0));
    }
}
