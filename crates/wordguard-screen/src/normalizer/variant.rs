// Variant map: grapheme-to-canonical substitution table

use std::collections::BTreeMap;
use std::path::Path;

use hashbrown::HashMap;
use tracing::warn;

use crate::ScreenError;

/// Punctuation the built-in table deletes outright.
const STRIPPED_PUNCTUATION: &str = ".。,，!！?？@#$%^&*()-_+=[]{}|\\/:;\"'<>`~";

/// Mapping from variant spellings to canonical text.
///
/// Applied as a single left-to-right pass: at each position the longest key
/// that matches is replaced and the scan continues after it, so replaced
/// text is never rescanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantMap {
    entries: HashMap<Box<[char]>, String>,
    max_key_len: usize,
}

impl VariantMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(variant, canonical)` pairs. Empty keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (from, to) in pairs {
            map.insert(from.as_ref(), to);
        }
        map
    }

    /// The built-in table: full-width digits and letters, circled and
    /// parenthesized digits, and common punctuation removal.
    pub fn builtin() -> Self {
        let mut map = Self::new();
        for (i, digit) in ('0'..='9').enumerate() {
            let offset = i as u32;
            map.insert_char(char_at(0xFF10, offset), digit);
            // ⓪ sits apart from ①..⑨.
            let circled = if i == 0 { '⓪' } else { char_at(0x2460, offset - 1) };
            map.insert_char(circled, digit);
        }
        for (i, (lower, upper)) in ('a'..='z').zip('A'..='Z').enumerate() {
            let offset = i as u32;
            map.insert_char(char_at(0xFF41, offset), lower);
            map.insert_char(char_at(0xFF21, offset), upper);
        }
        // ⑴..⑽
        for n in 1..=10u32 {
            map.insert(&char_at(0x2474, n - 1).to_string(), n.to_string());
        }
        for c in STRIPPED_PUNCTUATION.chars() {
            map.insert(&c.to_string(), String::new());
        }
        map
    }

    /// Read a JSON object of `"variant": "canonical"` pairs.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScreenError> {
        let path = path.as_ref();
        let configuration = |reason: String| ScreenError::Configuration {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read_to_string(path).map_err(|e| configuration(e.to_string()))?;
        let pairs: BTreeMap<String, String> =
            serde_json::from_str(&data).map_err(|e| configuration(e.to_string()))?;
        let map = Self::from_pairs(pairs);
        if map.is_empty() {
            return Err(configuration("variant map has no entries".into()));
        }
        Ok(map)
    }

    /// Load the map at `path`, or the built-in table when no path is given
    /// or the file cannot be used.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match Self::from_json_file(path) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "falling back to built-in variant map");
                Self::builtin()
            }
        }
    }

    /// Add or overwrite one entry. Empty keys are ignored.
    pub fn insert(&mut self, from: &str, to: impl Into<String>) {
        let key: Box<[char]> = from.chars().collect();
        if key.is_empty() {
            return;
        }
        self.max_key_len = self.max_key_len.max(key.len());
        self.entries.insert(key, to.into());
    }

    fn insert_char(&mut self, from: char, to: char) {
        self.max_key_len = self.max_key_len.max(1);
        self.entries.insert(Box::new([from]), to.to_string());
    }

    /// The canonical form for `from`, if mapped.
    pub fn get(&self, from: &str) -> Option<&str> {
        let key: Vec<char> = from.chars().collect();
        self.entries.get(key.as_slice()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substitute every mapped variant in `text`.
    pub fn apply(&self, text: &[char]) -> String {
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < text.len() {
            let longest = self.max_key_len.min(text.len() - i);
            let hit = (1..=longest)
                .rev()
                .find_map(|len| self.entries.get(&text[i..i + len]).map(|to| (len, to)));
            match hit {
                Some((len, to)) => {
                    out.push_str(to);
                    i += len;
                }
                None => {
                    out.push(text[i]);
                    i += 1;
                }
            }
        }
        out
    }
}

fn char_at(base: u32, offset: u32) -> char {
    char::from_u32(base + offset).unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(map: &VariantMap, s: &str) -> String {
        let chars: Vec<char> = s.chars().collect();
        map.apply(&chars)
    }

    #[test]
    fn builtin_folds_width_and_circled_forms() {
        let map = VariantMap::builtin();
        assert_eq!(apply(&map, "ｆｕｃｋ"), "fuck");
        assert_eq!(apply(&map, "ＡＢ１２"), "AB12");
        assert_eq!(apply(&map, "⓪①⑨"), "019");
        assert_eq!(apply(&map, "⑴⑽"), "110");
        assert_eq!(apply(&map, "坏。蛋！"), "坏蛋");
    }

    #[test]
    fn builtin_has_no_homophone_expansion() {
        let map = VariantMap::builtin();
        assert_eq!(map.get("2"), None);
        assert_eq!(apply(&map, "2"), "2");
    }

    #[test]
    fn longest_key_wins() {
        let map = VariantMap::from_pairs([("a", "1"), ("ab", "2"), ("abc", "3")]);
        assert_eq!(apply(&map, "abcab a"), "32 1");
    }

    #[test]
    fn replaced_text_is_not_rescanned() {
        let map = VariantMap::from_pairs([("a", "b"), ("b", "c")]);
        assert_eq!(apply(&map, "ab"), "bc");
    }

    #[test]
    fn empty_keys_ignored() {
        let map = VariantMap::from_pairs([("", "x")]);
        assert!(map.is_empty());
        assert_eq!(apply(&map, "abc"), "abc");
    }

    #[test]
    fn json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("variants.json");
        std::fs::write(&path, r#"{"囗": "口", "vx": "微信"}"#).unwrap();
        let map = VariantMap::from_json_file(&path).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(apply(&map, "加vx"), "加微信");
    }

    #[test]
    fn invalid_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("variants.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(VariantMap::from_json_file(&path).is_err());
        assert_eq!(VariantMap::load_or_builtin(Some(&path)), VariantMap::builtin());

        std::fs::write(&path, "{}").unwrap();
        assert!(VariantMap::from_json_file(&path).is_err());
    }
}
