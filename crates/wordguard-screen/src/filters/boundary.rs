// Boundary filter: single-character findings must stand alone somewhere

use wordguard_core::character::is_word_char;

use super::FilterStrategy;

/// Rejects a single-character finding unless at least one occurrence of the
/// character has no CJK ideograph or Latin letter next to it. Text edges
/// count as standalone. Longer words pass untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryFilter;

impl BoundaryFilter {
    fn occurs_standalone(target: char, content: &[char]) -> bool {
        content.iter().enumerate().any(|(i, &c)| {
            if c != target {
                return false;
            }
            let before_ok = i == 0 || !is_word_char(content[i - 1]);
            let after_ok = content.get(i + 1).is_none_or(|&next| !is_word_char(next));
            before_ok && after_ok
        })
    }
}

impl FilterStrategy for BoundaryFilter {
    fn should_reject(&self, word: &str, content: &str) -> bool {
        let mut chars = word.chars();
        let (Some(single), None) = (chars.next(), chars.next()) else {
            return false;
        };
        let content: Vec<char> = content.chars().collect();
        !Self::occurs_standalone(single, &content)
    }

    fn name(&self) -> &str {
        "boundary_filter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejects(word: &str, content: &str) -> bool {
        BoundaryFilter.should_reject(word, content)
    }

    #[test]
    fn embedded_single_char_rejected() {
        // 日 only appears inside 今日
        assert!(rejects("日", "今日天气"));
        assert!(rejects("x", "abxcd"));
    }

    #[test]
    fn standalone_occurrence_accepted() {
        assert!(!rejects("日", "今日, 日!"));
        assert!(!rejects("x", "x"));
        assert!(!rejects("操", "1操2"));
    }

    #[test]
    fn edges_count_as_standalone() {
        assert!(!rejects("x", "x 1"));
        assert!(!rejects("x", "1 x"));
        assert!(rejects("x", "xa"));
    }

    #[test]
    fn absent_char_rejected() {
        assert!(rejects("x", "nothing here"));
    }

    #[test]
    fn multi_char_words_pass() {
        assert!(!rejects("坏蛋", "坏蛋糕"));
        assert!(!rejects("", "abc"));
    }
}
