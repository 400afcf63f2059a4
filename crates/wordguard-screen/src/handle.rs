// Screen: top-level integration point for sensitive-word screening.
//
// Owns the normalizer, the compiled library (dictionary and whitelist), the
// snapshot store, the fuzzy matcher and its filter chain, and exposes every
// screening operation through one handle.
//
// Design notes:
// - The library is loaded on first use, or at construction when `preload`
//   is set. Queries take `&self` and reach it through a `RefCell`;
//   mutations take `&mut self`.
// - Each call normalizes its input once. Reported offsets, and the output
//   of replace and mark, refer to the normalized text.
// - With caching enabled, every mutation writes a fresh snapshot.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hashbrown::HashSet;
use tracing::{debug, warn};
use wordguard_automaton::{Dictionary, Scanner};
use wordguard_core::{EmojiStrategy, Match, MatchType, MergeMode};

use crate::ScreenError;
use crate::config::ScreenConfig;
use crate::filters::FilterChain;
use crate::fuzzy::FuzzyMatcher;
use crate::normalizer::{TextNormalizer, VariantMap};
use crate::store::{FileLibraryStore, Library, LibraryStore};
use crate::whitelist::Whitelist;

/// Sensitive-word screening handle.
///
/// Not `Sync`: share it between threads only behind external locking, or
/// give each thread its own instance.
pub struct Screen {
    config: ScreenConfig,
    normalizer: TextNormalizer,

    /// Loaded lazily; `None` until first use.
    library: RefCell<Option<Library>>,
    store: Box<dyn LibraryStore>,

    fuzzy: RefCell<FuzzyMatcher>,
    filters: FilterChain,
}

impl Screen {
    /// Create a screen persisting snapshots to the configured cache file.
    pub fn new(config: ScreenConfig) -> Self {
        let store = FileLibraryStore::new(config.resolved_cache_path(), config.cache_max_age());
        Self::with_store(config, Box::new(store))
    }

    /// Create a screen with a caller-supplied snapshot store.
    pub fn with_store(config: ScreenConfig, store: Box<dyn LibraryStore>) -> Self {
        let screen = Self {
            normalizer: TextNormalizer::from_config(&config),
            library: RefCell::new(None),
            store,
            fuzzy: RefCell::new(FuzzyMatcher::new()),
            filters: FilterChain::with_default_filters(),
            config,
        };
        if screen.config.preload {
            screen.warmup();
        }
        screen
    }

    /// A screen over `words` with default options.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut screen = Self::new(ScreenConfig::default());
        screen.set_word_library(words);
        screen
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Apply the configured emoji and variant transforms to `text`.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.normalizer.normalize(text)
    }

    // =========================================================================
    // Detection
    // =========================================================================

    /// Whether `text` contains any non-exempt dictionary word.
    pub fn check(&self, text: &str) -> bool {
        !text.is_empty() && !self.list_bad_words_detailed(text, MatchType::Min, Some(1)).is_empty()
    }

    /// Distinct detected words, shortest-match rule, in order of first
    /// appearance. `limit` caps the number of matches considered.
    pub fn list_bad_words(&self, text: &str, limit: Option<usize>) -> Vec<String> {
        let mut seen = HashSet::new();
        self.list_bad_words_detailed(text, MatchType::Min, limit)
            .into_iter()
            .filter(|m| seen.insert(m.word.clone()))
            .map(|m| m.word)
            .collect()
    }

    /// Detected matches with offsets into the normalized text.
    ///
    /// With a `limit`, matches are ordered by offset, longer first at equal
    /// offsets, and the first `limit` kept.
    pub fn list_bad_words_detailed(
        &self,
        text: &str,
        match_type: MatchType,
        limit: Option<usize>,
    ) -> Vec<Match> {
        let normalized = self.normalizer.normalize(text);
        let chars: Vec<char> = normalized.chars().collect();
        self.detect(&chars, match_type, limit)
    }

    fn detect(&self, text: &[char], match_type: MatchType, limit: Option<usize>) -> Vec<Match> {
        self.with_library(|library| {
            if text.is_empty() || library.dictionary.is_empty() {
                return Vec::new();
            }
            let found = library.dictionary.scan(text, match_type);
            let mut found = library.whitelist.filter(found, text);
            if let Some(limit) = limit {
                if found.len() > limit {
                    found.sort_by(|a, b| a.offset.cmp(&b.offset).then(b.length.cmp(&a.length)));
                    found.truncate(limit);
                }
            }
            found
        })
    }

    /// Replace every detected word in the normalized text with
    /// `replacement`, once or repeated per matched character.
    pub fn replace(
        &self,
        text: &str,
        replacement: &str,
        repeat: bool,
        match_type: MatchType,
    ) -> String {
        let replacement: Vec<char> = replacement.chars().collect();
        self.rewrite(text, match_type, |m, _| {
            if repeat {
                replacement.repeat(m.length)
            } else {
                replacement.clone()
            }
        })
    }

    /// Wrap every detected word in the normalized text with the tags.
    pub fn mark(&self, text: &str, start_tag: &str, end_tag: &str, match_type: MatchType) -> String {
        self.rewrite(text, match_type, |_, original| {
            start_tag
                .chars()
                .chain(original.iter().copied())
                .chain(end_tag.chars())
                .collect()
        })
    }

    fn rewrite<F>(&self, text: &str, match_type: MatchType, render: F) -> String
    where
        F: FnMut(&Match, &[char]) -> Vec<char>,
    {
        let normalized = self.normalizer.normalize(text);
        let mut chars: Vec<char> = normalized.chars().collect();
        let found = self.detect(&chars, match_type, None);
        if found.is_empty() {
            return normalized.into_owned();
        }
        splice_matches(&mut chars, &found, render);
        chars.into_iter().collect()
    }

    /// Fuzzy findings: dictionary words occurring in `text` as gap-bounded
    /// subsequences, minus whitelisted words and filter rejections.
    pub fn fuzzy_bad_words(&self, text: &str, limit: Option<usize>) -> Vec<String> {
        let normalized = self.normalizer.normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }
        let chars: Vec<char> = normalized.chars().collect();
        let mut fuzzy = self.fuzzy.borrow_mut();
        self.with_library(|library| {
            let mut found = Vec::new();
            for word in library.dictionary.words() {
                if limit.is_some_and(|n| found.len() >= n) {
                    break;
                }
                if library.whitelist.is_direct_exempt(&word) {
                    continue;
                }
                let pattern: Vec<char> = word.chars().collect();
                if fuzzy.is_match(&pattern, &chars) && !self.filters.should_reject(&word, &normalized)
                {
                    found.push(word);
                }
            }
            debug!(found = found.len(), "fuzzy scan");
            found
        })
    }

    pub fn filter_chain(&self) -> &FilterChain {
        &self.filters
    }

    pub fn filter_chain_mut(&mut self) -> &mut FilterChain {
        &mut self.filters
    }

    pub fn clear_fuzzy_cache(&self) {
        self.fuzzy.borrow_mut().clear_cache();
    }

    // =========================================================================
    // Word library
    // =========================================================================

    /// Every dictionary word, sorted.
    pub fn all_words(&self) -> Vec<String> {
        self.with_library(|library| library.dictionary.words())
    }

    pub fn word_count(&self) -> usize {
        self.with_library(|library| library.dictionary.len())
    }

    /// Grow the dictionary. Words are normalized and trimmed; blank ones are
    /// skipped. Returns `false` when nothing usable was given.
    pub fn add_words<I, S>(&mut self, words: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = self.normalized_entries(words);
        if words.is_empty() {
            return false;
        }
        let library = self.library_mut();
        library.dictionary.add_words(&words);
        debug!(added = words.len(), words = library.dictionary.len(), "grew word library");
        self.save_library();
        true
    }

    /// Replace the dictionary. Words are trimmed, not normalized; blank ones
    /// are skipped. Returns `false`, leaving the library untouched, when no
    /// usable word was given.
    pub fn set_word_library<I, S>(&mut self, words: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return false;
        }
        let library = self.library_mut();
        let count = library.dictionary.set_words(&words);
        debug!(words = count, "replaced word library");
        self.save_library();
        true
    }

    /// Replace the dictionary with the words of the file at `path`.
    ///
    /// Unlike configured sources, an explicitly named file that cannot be
    /// read is an error, and the library is left unchanged.
    pub fn load_dictionary_file(&mut self, path: impl AsRef<Path>) -> Result<usize, ScreenError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ScreenError::EmptyInput);
        }
        if !path.is_file() {
            return Err(ScreenError::Configuration {
                path: path.to_path_buf(),
                reason: "file does not exist or is not readable".into(),
            });
        }
        let mut dictionary = self.empty_dictionary();
        read_dictionary_file(&mut dictionary, path)?;
        let count = dictionary.len();
        self.library_mut().dictionary = dictionary;
        debug!(path = %path.display(), words = count, "loaded dictionary file");
        self.save_library();
        Ok(count)
    }

    /// Load the library now instead of on first use. Returns `true` when it
    /// holds at least one word. An already loaded library is kept as is.
    pub fn warmup(&self) -> bool {
        self.with_library(|library| !library.dictionary.is_empty())
    }

    /// Delete the stored snapshot. Returns `true` if none remains.
    pub fn clear_cache(&self) -> bool {
        self.store.clear()
    }

    /// A copy of the compiled library.
    pub fn snapshot(&self) -> Result<Library, ScreenError> {
        self.with_library(|library| {
            if library.dictionary.is_empty() {
                Err(ScreenError::EmptyLibrary)
            } else {
                Ok(library.clone())
            }
        })
    }

    // =========================================================================
    // Whitelist
    // =========================================================================

    /// Whitelist phrases. Phrases are trimmed and normalized. Returns `true`
    /// if any phrase was new.
    pub fn add_whitelist_words<I, S>(&mut self, words: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = self.normalized_entries(words);
        if phrases.is_empty() {
            return false;
        }
        let added = self.library_mut().whitelist.extend(&phrases);
        if added == 0 {
            return false;
        }
        self.save_library();
        true
    }

    /// Remove phrases from the whitelist. Returns `true` if any was removed.
    pub fn remove_whitelist_words<I, S>(&mut self, words: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = self.normalized_entries(words);
        if phrases.is_empty() {
            return false;
        }
        let whitelist = &mut self.library_mut().whitelist;
        let removed = phrases.iter().filter(|p| whitelist.remove(p)).count();
        if removed == 0 {
            return false;
        }
        self.save_library();
        true
    }

    /// Replace the whole whitelist. An empty list clears it.
    ///
    /// Returns `true` when the list was empty or at least one phrase was set.
    pub fn set_whitelist_words<I, S>(&mut self, words: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words.into_iter().map(|w| w.as_ref().to_string()).collect();
        let phrases = self.normalized_entries(&words);
        let whitelist = &mut self.library_mut().whitelist;
        whitelist.clear();
        let added = whitelist.extend(&phrases);
        self.save_library();
        words.is_empty() || added > 0
    }

    /// Empty the whitelist. Returns `false` if it was already empty.
    pub fn clear_whitelist(&mut self) -> bool {
        let whitelist = &mut self.library_mut().whitelist;
        if whitelist.is_empty() {
            return false;
        }
        whitelist.clear();
        self.save_library();
        true
    }

    /// Current whitelist phrases, sorted.
    pub fn whitelist_words(&self) -> Vec<String> {
        self.with_library(|library| library.whitelist.phrases())
    }

    /// Whether `word`, once normalized, is a whitelisted phrase.
    pub fn is_whitelisted(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let normalized = self.normalizer.normalize(word);
        self.with_library(|library| library.whitelist.contains(&normalized))
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Change the emoji strategy. The placeholder is only taken for
    /// [`EmojiStrategy::Replace`].
    pub fn set_emoji_strategy(&mut self, strategy: EmojiStrategy, placeholder: &str) {
        self.normalizer.set_emoji_strategy(strategy);
        self.config.emoji_strategy = strategy;
        if strategy == EmojiStrategy::Replace {
            self.normalizer.set_emoji_placeholder(placeholder);
            self.config.emoji_placeholder = placeholder.to_string();
        }
    }

    /// Turn variant-text folding on or off, loading the variant map on
    /// first enable.
    pub fn set_variant_detection(&mut self, enabled: bool) {
        if enabled && self.normalizer.variant_map().is_empty() {
            let map = VariantMap::load_or_builtin(self.config.variant_map_path.as_deref());
            self.normalizer.set_variant_map(map);
        }
        self.normalizer.set_variant_detection(enabled);
        self.config.detect_variant_text = enabled;
    }

    /// Use the variant map at `path`. Returns `false`, changing nothing, if
    /// the file does not exist.
    pub fn set_variant_map_path(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !path.is_file() {
            return false;
        }
        self.normalizer
            .set_variant_map(VariantMap::load_or_builtin(Some(path)));
        self.config.variant_map_path = Some(path.to_path_buf());
        true
    }

    // =========================================================================
    // Library loading and persistence
    // =========================================================================

    fn with_library<T>(&self, f: impl FnOnce(&Library) -> T) -> T {
        let mut slot = self.library.borrow_mut();
        let library = slot.get_or_insert_with(|| self.load_library());
        f(library)
    }

    fn library_mut(&mut self) -> &mut Library {
        if self.library.get_mut().is_none() {
            let loaded = self.load_library();
            *self.library.get_mut() = Some(loaded);
        }
        self.library.get_mut().get_or_insert_with(Library::default)
    }

    /// Build the library from the snapshot when caching is on and a usable
    /// one exists, else from the configured dictionary files. The configured
    /// whitelist is merged with the snapshot's.
    fn load_library(&self) -> Library {
        let mut whitelist = Whitelist::from_phrases(&self.config.whitelist);

        if self.config.enable_cache {
            if let Some(mut cached) = self.store.load() {
                whitelist.extend(cached.whitelist.iter());
                cached.whitelist = whitelist;
                cached
                    .dictionary
                    .set_prefix_index_enabled(self.config.enable_prefix_index);
                cached
                    .dictionary
                    .set_prefix_scan_max_len(self.config.prefix_index_max_len);
                return cached;
            }
        }

        let mut dictionary = self.empty_dictionary();
        self.read_sources(&mut dictionary);
        debug!(words = dictionary.len(), "built word library");
        let library = Library::new(dictionary, whitelist);
        if !library.dictionary.is_empty() {
            self.persist(&library);
        }
        library
    }

    fn empty_dictionary(&self) -> Dictionary {
        Dictionary::new(self.config.enable_prefix_index)
            .with_prefix_scan_max_len(self.config.prefix_index_max_len)
    }

    /// Fill `dictionary` from the configured files.
    ///
    /// In append mode the default dictionary is read first, then the user
    /// dictionary; in override mode an existing user dictionary replaces the
    /// default one. Unreadable files are logged and skipped.
    fn read_sources(&self, dictionary: &mut Dictionary) {
        let user = existing_file(self.config.word_path.as_deref());
        let default = existing_file(self.config.default_word_path.as_deref());
        let sources = match (user, default, self.config.merge_mode) {
            (Some(user), Some(default), MergeMode::Append) => vec![default, user],
            (Some(user), _, _) => vec![user],
            (None, Some(default), _) => vec![default],
            (None, None, _) => {
                debug!("no dictionary source configured");
                return;
            }
        };
        for path in sources {
            if let Err(e) = read_dictionary_file(dictionary, path) {
                warn!(error = %e, "skipping dictionary source");
            }
        }
    }

    /// Write a snapshot of the current library, if caching is enabled.
    fn save_library(&self) {
        if let Some(library) = self.library.borrow().as_ref() {
            self.persist(library);
        }
    }

    fn persist(&self, library: &Library) {
        if !self.config.enable_cache {
            return;
        }
        if let Err(e) = self.store.save(library) {
            warn!(error = %e, "library snapshot not saved");
        }
    }

    /// Trim and normalize entries, dropping ones that end up blank.
    fn normalized_entries<I, S>(&self, entries: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .filter_map(|entry| {
                let entry = entry.as_ref().trim();
                if entry.is_empty() {
                    return None;
                }
                let normalized = self.normalizer.normalize(entry);
                let normalized = normalized.trim();
                (!normalized.is_empty()).then(|| normalized.to_string())
            })
            .collect()
    }
}

fn existing_file(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.is_file())
}

fn read_dictionary_file(dictionary: &mut Dictionary, path: &Path) -> Result<usize, ScreenError> {
    let configuration = |reason: String| ScreenError::Configuration {
        path: path.to_path_buf(),
        reason,
    };
    let file = File::open(path).map_err(|e| configuration(e.to_string()))?;
    dictionary
        .add_words_from_lines(BufReader::new(file))
        .map_err(|e| configuration(e.to_string()))
}

/// Splice `render(match, original)` over each match, last match first so
/// the offsets of earlier matches stay valid.
fn splice_matches<F>(text: &mut Vec<char>, found: &[Match], mut render: F)
where
    F: FnMut(&Match, &[char]) -> Vec<char>,
{
    let mut ordered: Vec<&Match> = found.iter().collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));
    for m in ordered {
        let range = m.offset..m.end();
        let rendered = render(m, &text[range.clone()]);
        text.splice(range, rendered);
    }
}
