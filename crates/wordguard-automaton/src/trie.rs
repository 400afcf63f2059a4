// Dictionary automaton: trie insertion and min/max scanning

use std::io::BufRead;

use tracing::debug;
use wordguard_core::{Match, MatchType};

use crate::node::Node;
use crate::source::LineSource;
use crate::{AutomatonError, Scanner};

/// Character-edge trie encoding the dictionary.
///
/// The automaton only grows: words are added with [`insert`](Self::insert)
/// or replaced wholesale with [`rebuild`](Self::rebuild). There is no
/// operation that removes a single word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    root: Node,
    word_count: usize,
}

impl Automaton {
    /// Create an empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an automaton from a list of words (see [`rebuild`](Self::rebuild)).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut automaton = Self::new();
        automaton.rebuild(words);
        automaton
    }

    pub(crate) fn from_parts(root: Node, word_count: usize) -> Self {
        Self { root, word_count }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Insert a word, creating one edge per character and marking the final
    /// node terminal.
    ///
    /// Returns `true` if the word was not present before. Inserting an empty
    /// word does nothing.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.child_or_insert(c);
        }
        if node.is_terminal() {
            return false;
        }
        node.set_terminal(true);
        self.word_count += 1;
        true
    }

    /// Clear the automaton and insert every word, trimming surrounding
    /// whitespace and skipping blank entries.
    ///
    /// Returns the number of distinct words in the rebuilt automaton.
    pub fn rebuild<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear();
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.insert(word);
            }
        }
        debug!(words = self.word_count, "rebuilt automaton");
        self.word_count
    }

    /// Clear the automaton and insert every non-blank line of `source`.
    ///
    /// Lines are read one at a time so the source is never materialized in
    /// memory. On a read error the automaton keeps the words inserted so far
    /// and the error is returned.
    pub fn rebuild_from_lines<R: BufRead>(&mut self, source: R) -> Result<usize, AutomatonError> {
        self.clear();
        for word in LineSource::new(source) {
            self.insert(&word?);
        }
        debug!(words = self.word_count, "rebuilt automaton from line source");
        Ok(self.word_count)
    }

    /// Remove every word.
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.word_count = 0;
    }

    /// Whether `word` is a complete dictionary word.
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = &self.root;
        for c in word.chars() {
            match node.child(c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.is_terminal()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether the automaton holds no words.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Enumerate all words, sorted.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.word_count);
        // Explicit DFS stack: (node, prefix)
        let mut stack: Vec<(&Node, String)> = vec![(&self.root, String::new())];
        while let Some((node, prefix)) = stack.pop() {
            if node.is_terminal() {
                words.push(prefix.clone());
            }
            for (c, child) in node.children() {
                let mut next = prefix.clone();
                next.push(c);
                stack.push((child, next));
            }
        }
        words.sort_unstable();
        words
    }

    /// Length of the dictionary word starting at `start`, chosen by
    /// `match_type`, or `None` if no word starts there.
    ///
    /// `Min` stops at the first terminal node reached. `Max` walks the live
    /// edge path to its end and reports the last terminal node on it.
    pub fn match_len_at(&self, text: &[char], start: usize, match_type: MatchType) -> Option<usize> {
        let mut node = &self.root;
        let mut found = None;
        for (depth, &c) in text[start..].iter().enumerate() {
            match node.child(c) {
                Some(next) => node = next,
                None => break,
            }
            if node.is_terminal() {
                found = Some(depth + 1);
                if match_type == MatchType::Min {
                    break;
                }
            }
        }
        found
    }
}

impl Scanner for Automaton {
    /// Leftmost, non-overlapping scan. After a match of length `L` at `i`
    /// the scan resumes at `i + L`.
    fn scan(&self, text: &[char], match_type: MatchType) -> Vec<Match> {
        let mut matches = Vec::new();
        if self.is_empty() {
            return matches;
        }
        let mut i = 0;
        while i < text.len() {
            match self.match_len_at(text, i, match_type) {
                Some(len) => {
                    matches.push(Match::from_chars(text, i, len));
                    i += len;
                }
                None => i += 1,
            }
        }
        matches.dedup();
        matches
    }
}
