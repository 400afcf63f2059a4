// Screen configuration: recognized options with their defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wordguard_automaton::PREFIX_SCAN_MAX_LEN;
use wordguard_core::{EmojiStrategy, MergeMode};

use crate::ScreenError;

/// Default placeholder substituted for emoji under [`EmojiStrategy::Replace`].
pub const DEFAULT_EMOJI_PLACEHOLDER: &str = "[表情]";

/// Default snapshot lifetime: one day.
pub const DEFAULT_CACHE_EXPIRE_SECS: u64 = 86_400;

const CACHE_DIR: &str = "wordguard";
const CACHE_FILE: &str = "wordguard_tree.cache";

/// Options consumed by [`Screen`](crate::handle::Screen).
///
/// Every field has a default, so a JSON config only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// User dictionary, one word per line.
    pub word_path: Option<PathBuf>,
    /// Dictionary shipped with the host application.
    pub default_word_path: Option<PathBuf>,
    /// How the user dictionary combines with the default one.
    pub merge_mode: MergeMode,

    pub enable_cache: bool,
    /// Snapshot lifetime in seconds; 0 keeps snapshots forever.
    pub cache_expire_secs: u64,
    /// Snapshot file. Defaults to a file under the system temp directory.
    pub cache_path: Option<PathBuf>,
    /// Load the library at construction instead of on first use.
    pub preload: bool,

    pub enable_prefix_index: bool,
    /// Texts at or above this many codepoints skip the prefix index.
    pub prefix_index_max_len: usize,

    pub emoji_strategy: EmojiStrategy,
    pub emoji_placeholder: String,
    pub detect_variant_text: bool,
    /// JSON object mapping variant graphemes to canonical forms.
    pub variant_map_path: Option<PathBuf>,

    /// Phrases exempt from detection.
    pub whitelist: Vec<String>,

    /// Request parameters a host middleware screens. Not used by the engine.
    pub http_params: Vec<String>,
    /// Replacement character used by front ends.
    pub replace_char: String,
    /// Whether front ends repeat the replacement per matched character.
    pub repeat_char: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            word_path: None,
            default_word_path: None,
            merge_mode: MergeMode::default(),
            enable_cache: false,
            cache_expire_secs: DEFAULT_CACHE_EXPIRE_SECS,
            cache_path: None,
            preload: false,
            enable_prefix_index: true,
            prefix_index_max_len: PREFIX_SCAN_MAX_LEN,
            emoji_strategy: EmojiStrategy::default(),
            emoji_placeholder: DEFAULT_EMOJI_PLACEHOLDER.to_string(),
            detect_variant_text: false,
            variant_map_path: None,
            whitelist: Vec::new(),
            http_params: vec!["content".into(), "text".into(), "message".into()],
            replace_char: "*".to_string(),
            repeat_char: true,
        }
    }
}

impl ScreenConfig {
    /// Load a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScreenError> {
        let path = path.as_ref();
        let configuration = |reason: String| ScreenError::Configuration {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read_to_string(path).map_err(|e| configuration(e.to_string()))?;
        serde_json::from_str(&data).map_err(|e| configuration(e.to_string()))
    }

    /// The snapshot file, falling back to `<temp>/wordguard/wordguard_tree.cache`.
    pub fn resolved_cache_path(&self) -> PathBuf {
        match &self.cache_path {
            Some(path) => path.clone(),
            None => std::env::temp_dir().join(CACHE_DIR).join(CACHE_FILE),
        }
    }

    /// Snapshot lifetime, `None` when snapshots never expire.
    pub fn cache_max_age(&self) -> Option<Duration> {
        (self.cache_expire_secs > 0).then(|| Duration::from_secs(self.cache_expire_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.merge_mode, MergeMode::Append);
        assert!(config.enable_prefix_index);
        assert_eq!(config.prefix_index_max_len, 10_000);
        assert_eq!(config.emoji_strategy, EmojiStrategy::Ignore);
        assert_eq!(config.emoji_placeholder, "[表情]");
        assert_eq!(config.cache_max_age(), Some(Duration::from_secs(86_400)));
        assert_eq!(config.http_params, vec!["content", "text", "message"]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ScreenConfig = serde_json::from_str(
            r#"{"merge_mode": "override", "emoji_strategy": "replace", "whitelist": ["评估"]}"#,
        )
        .unwrap();
        assert_eq!(config.merge_mode, MergeMode::Override);
        assert_eq!(config.emoji_strategy, EmojiStrategy::Replace);
        assert_eq!(config.whitelist, vec!["评估"]);
        assert!(config.enable_prefix_index);
        assert!(!config.enable_cache);
    }

    #[test]
    fn zero_expiry_never_expires() {
        let config = ScreenConfig {
            cache_expire_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.cache_max_age(), None);
    }

    #[test]
    fn cache_path_fallback() {
        let config = ScreenConfig::default();
        assert!(config.resolved_cache_path().ends_with("wordguard/wordguard_tree.cache"));
        let config = ScreenConfig {
            cache_path: Some(PathBuf::from("/var/cache/wg.cache")),
            ..Default::default()
        };
        assert_eq!(config.resolved_cache_path(), PathBuf::from("/var/cache/wg.cache"));
    }

    #[test]
    fn from_json_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.json");
        std::fs::write(&path, "{ not json").unwrap();
        match ScreenConfig::from_json_file(&path) {
            Err(ScreenError::Configuration { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }

        std::fs::write(&path, r#"{"preload": true}"#).unwrap();
        assert!(ScreenConfig::from_json_file(&path).unwrap().preload);
    }

    #[test]
    fn missing_file_is_configuration_error() {
        assert!(matches!(
            ScreenConfig::from_json_file("/nonexistent/wordguard.json"),
            Err(ScreenError::Configuration { .. })
        ));
    }
}
