// Length filter: short Latin tokens embedded in Chinese prose

use wordguard_core::character::{char_len, is_cjk_ideograph, is_pure_latin};

use super::{FilterStrategy, find_chars};

/// Longest Latin finding the filter considers.
const MAX_WORD_LEN: usize = 2;

/// Characters inspected on each side of the finding.
const WINDOW: usize = 5;

/// Rejects pure-Latin findings of at most two letters whose first
/// occurrence has a CJK ideograph within five characters on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthFilter;

impl FilterStrategy for LengthFilter {
    fn should_reject(&self, word: &str, content: &str) -> bool {
        if char_len(word) > MAX_WORD_LEN || !is_pure_latin(word) {
            return false;
        }
        let word: Vec<char> = word.chars().collect();
        let content: Vec<char> = content.chars().collect();
        let Some(pos) = find_chars(&content, &word) else {
            return false;
        };
        let end = pos + word.len();
        let before = &content[pos.saturating_sub(WINDOW)..pos];
        let after = &content[end..(end + WINDOW).min(content.len())];
        before.iter().copied().any(is_cjk_ideograph) && after.iter().copied().any(is_cjk_ideograph)
    }

    fn name(&self) -> &str {
        "length_filter"
    }
}
