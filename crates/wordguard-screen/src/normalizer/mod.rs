// Text normalization applied before matching
//
// Every offset reported downstream refers to the normalized text. The
// transforms are lossy: replace and mark operate on normalized text and the
// original cannot be recovered from it.

pub mod variant;

use std::borrow::Cow;

use wordguard_core::EmojiStrategy;
use wordguard_core::character::{is_emoji, is_variant_noise};

use crate::config::{DEFAULT_EMOJI_PLACEHOLDER, ScreenConfig};

pub use variant::VariantMap;

/// Emoji and variant-text normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNormalizer {
    emoji_strategy: EmojiStrategy,
    emoji_placeholder: String,
    variant_detection: bool,
    variant_map: VariantMap,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            emoji_strategy: EmojiStrategy::default(),
            emoji_placeholder: DEFAULT_EMOJI_PLACEHOLDER.to_string(),
            variant_detection: false,
            variant_map: VariantMap::new(),
        }
    }
}

impl TextNormalizer {
    /// A normalizer that leaves text unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from config, loading the variant map when variant detection is on.
    pub fn from_config(config: &ScreenConfig) -> Self {
        let variant_map = if config.detect_variant_text {
            VariantMap::load_or_builtin(config.variant_map_path.as_deref())
        } else {
            VariantMap::new()
        };
        Self {
            emoji_strategy: config.emoji_strategy,
            emoji_placeholder: config.emoji_placeholder.clone(),
            variant_detection: config.detect_variant_text,
            variant_map,
        }
    }

    pub fn emoji_strategy(&self) -> EmojiStrategy {
        self.emoji_strategy
    }

    pub fn emoji_placeholder(&self) -> &str {
        &self.emoji_placeholder
    }

    pub fn set_emoji_strategy(&mut self, strategy: EmojiStrategy) {
        self.emoji_strategy = strategy;
    }

    pub fn set_emoji_placeholder(&mut self, placeholder: impl Into<String>) {
        self.emoji_placeholder = placeholder.into();
    }

    pub fn variant_detection(&self) -> bool {
        self.variant_detection
    }

    pub fn set_variant_detection(&mut self, enabled: bool) {
        self.variant_detection = enabled;
    }

    pub fn variant_map(&self) -> &VariantMap {
        &self.variant_map
    }

    pub fn set_variant_map(&mut self, map: VariantMap) {
        self.variant_map = map;
    }

    /// Normalize `text`. Borrowed input comes back borrowed when no
    /// transform applies.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(text);
        if text.is_empty() {
            return text;
        }

        match self.emoji_strategy {
            EmojiStrategy::Remove if text.chars().any(is_emoji) => {
                text = Cow::Owned(text.chars().filter(|&c| !is_emoji(c)).collect());
            }
            EmojiStrategy::Replace if text.chars().any(is_emoji) => {
                let mut out = String::with_capacity(text.len());
                for c in text.chars() {
                    if is_emoji(c) {
                        out.push_str(&self.emoji_placeholder);
                    } else {
                        out.push(c);
                    }
                }
                text = Cow::Owned(out);
            }
            _ => {}
        }

        if self.variant_detection && !self.variant_map.is_empty() {
            let kept: Vec<char> = text.chars().filter(|&c| !is_variant_noise(c)).collect();
            text = Cow::Owned(self.variant_map.apply(&kept));
        }
        text
    }
}
