// Fuzzy matcher: gap-bounded subsequence search for obfuscated words
//
// Catches words split up by filler ("坏x蛋", "b.a.d") that a literal scan
// misses. The search is greedy and never backtracks, so it can miss an
// alignment that a later choice of characters would have allowed.

pub mod cache;

use wordguard_core::character::is_fuzzy_noise;

pub use cache::FuzzyCache;

/// Largest distance allowed between consecutive matched characters, in
/// positions of the stripped text, for a pattern of `pattern_len` chars.
pub fn max_gap(pattern_len: usize) -> usize {
    match pattern_len {
        0..=2 => 4,
        3 => 10,
        4..=5 => 8,
        _ => 12,
    }
}

/// Drop whitespace, separator punctuation and digits from `text`.
pub fn strip_noise(text: &[char]) -> Vec<char> {
    text.iter().copied().filter(|&c| !is_fuzzy_noise(c)).collect()
}

/// Whether `pattern` occurs in order in `text` with bounded gaps.
///
/// `text` is stripped of noise characters first; `pattern` is used as is.
pub fn is_subsequence_match(pattern: &[char], text: &[char]) -> bool {
    let (Some(&first), Some(&last)) = (pattern.first(), pattern.last()) else {
        return false;
    };
    let clean = strip_noise(text);
    if pattern.len() > clean.len() || !clean.contains(&first) || !clean.contains(&last) {
        return false;
    }

    let limit = max_gap(pattern.len());
    let mut pending = pattern.iter().peekable();
    let mut last_hit: Option<usize> = None;
    for (pos, c) in clean.iter().enumerate() {
        let Some(&&want) = pending.peek() else {
            break;
        };
        if *c != want {
            continue;
        }
        if last_hit.is_some_and(|prev| pos - prev > limit) {
            return false;
        }
        last_hit = Some(pos);
        pending.next();
    }
    pending.peek().is_none()
}

/// Subsequence matcher with an instance-owned result memo.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    cache: FuzzyCache,
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher whose memo holds up to `capacity` results.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            cache: FuzzyCache::new(capacity),
        }
    }

    /// Memoized [`is_subsequence_match`].
    pub fn is_match(&mut self, pattern: &[char], text: &[char]) -> bool {
        let key = self.cache.key(pattern, text);
        if let Some(hit) = self.cache.get(key) {
            return hit;
        }
        let matched = is_subsequence_match(pattern, text);
        self.cache.insert(key, matched);
        matched
    }

    /// Convenience wrapper over string slices.
    pub fn is_match_str(&mut self, pattern: &str, text: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        let text: Vec<char> = text.chars().collect();
        self.is_match(&pattern, &text)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn matches(pattern: &str, text: &str) -> bool {
        is_subsequence_match(&chars(pattern), &chars(text))
    }

    // -----------------------------------------------------------------------
    // Gap thresholds
    // -----------------------------------------------------------------------

    #[test]
    fn gap_step_function() {
        assert_eq!(max_gap(1), 4);
        assert_eq!(max_gap(2), 4);
        assert_eq!(max_gap(3), 10);
        assert_eq!(max_gap(4), 8);
        assert_eq!(max_gap(5), 8);
        assert_eq!(max_gap(6), 12);
        assert_eq!(max_gap(40), 12);
    }

    #[test]
    fn single_filler_between_chars() {
        assert!(matches("abc", "axbxc"));
        assert!(matches("坏蛋人", "坏的蛋的人"));
    }

    #[test]
    fn gap_over_threshold_fails() {
        let filler = "x".repeat(10);
        // distance 11 between a and b
        assert!(!matches("abc", &format!("a{filler}bc")));
        let filler = "x".repeat(9);
        // distance exactly 10
        assert!(matches("abc", &format!("a{filler}bc")));
    }

    #[test]
    fn two_char_pattern_uses_tight_gap() {
        assert!(matches("ab", "axxxb"));
        assert!(!matches("ab", "axxxxb"));
    }

    // -----------------------------------------------------------------------
    // Noise and fast rejection
    // -----------------------------------------------------------------------

    #[test]
    fn noise_does_not_count_toward_gap() {
        assert!(matches("ab", "a 1 2 3 . - b"));
        assert!(matches("坏蛋", "坏 * * * 蛋"));
    }

    #[test]
    fn digits_in_pattern_never_match() {
        assert!(!matches("a1", "a1"));
    }

    #[test]
    fn empty_pattern_fails() {
        assert!(!matches("", "anything"));
    }

    #[test]
    fn text_shorter_than_pattern_fails() {
        assert!(!matches("abc", "a b"));
    }

    #[test]
    fn missing_last_char_fails() {
        assert!(!matches("abz", "aabb"));
    }

    #[test]
    fn greedy_alignment_can_miss() {
        // The first 'a' is taken, so 'b' is 11 positions away, although the
        // second 'a' would have been within range.
        let text = format!("a{}ab", "x".repeat(10));
        assert!(!matches("ab", &text));
    }

    // -----------------------------------------------------------------------
    // Memo
    // -----------------------------------------------------------------------

    #[test]
    fn matcher_memoizes() {
        let mut matcher = FuzzyMatcher::new();
        assert!(matcher.is_match_str("坏蛋", "坏x蛋"));
        assert!(matcher.is_match_str("坏蛋", "坏x蛋"));
        assert!(!matcher.is_match_str("坏蛋", "好人"));
        assert_eq!(matcher.cache_len(), 2);
        matcher.clear_cache();
        assert_eq!(matcher.cache_len(), 0);
    }
}
