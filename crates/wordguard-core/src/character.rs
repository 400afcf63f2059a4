// Character classification used by normalization, fuzzy matching and the
// false-positive filters.

// ---------------------------------------------------------------------------
// Emoji ranges
// ---------------------------------------------------------------------------

/// Codepoint ranges treated as emoji by the normalizer.
///
/// Emoticons, miscellaneous symbols and pictographs, transport and map
/// symbols, miscellaneous symbols, and dingbats.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
];

// ---------------------------------------------------------------------------
// Character type classification
// ---------------------------------------------------------------------------

/// Coarse character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    Unknown,
    /// CJK unified ideograph (U+4E00..U+9FFF).
    Ideograph,
    /// ASCII Latin letter.
    Latin,
    Digit,
    Whitespace,
    Separator,
    Emoji,
}

/// Returns the character type for a given character.
///
/// The checks run from the most specific class to the least; a character
/// that is both whitespace and a separator reports `Whitespace`.
pub fn get_char_type(c: char) -> CharType {
    if is_cjk_ideograph(c) {
        return CharType::Ideograph;
    }
    if is_latin_letter(c) {
        return CharType::Latin;
    }
    if is_digit(c) {
        return CharType::Digit;
    }
    if is_whitespace(c) {
        return CharType::Whitespace;
    }
    if is_separator(c) {
        return CharType::Separator;
    }
    if is_emoji(c) {
        return CharType::Emoji;
    }
    CharType::Unknown
}

/// Check whether a character is a CJK unified ideograph.
pub fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Check whether a character is an ASCII Latin letter (`a-z`, `A-Z`).
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Check whether a character is a decimal digit, ASCII or full-width.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{FF10}'..='\u{FF19}').contains(&c)
}

/// Check whether a character falls into one of the emoji ranges.
pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Check whether a character is a whitespace character.
pub fn is_whitespace(c: char) -> bool {
    let cp = c as u32;
    (0x09..=0x0D).contains(&cp)
        || cp == 0x20
        || cp == 0x85
        || cp == 0xA0
        || cp == 0x1680
        || cp == 0x180E
        || (0x2000..=0x200A).contains(&cp)
        || cp == 0x2028
        || cp == 0x2029
        || cp == 0x202F
        || cp == 0x205F
        || cp == 0x3000
}

/// Check whether a character belongs to the fixed separator set stripped
/// before variant mapping: `. - _ * + ~ ! @ # $ % ^ &`.
pub fn is_separator(c: char) -> bool {
    matches!(
        c,
        '.' | '-' | '_' | '*' | '+' | '~' | '!' | '@' | '#' | '$' | '%' | '^' | '&'
    )
}

/// Whitespace or separator: the characters deleted by variant normalization.
pub fn is_variant_noise(c: char) -> bool {
    is_whitespace(c) || is_separator(c)
}

/// Whitespace, separator or digit: the characters ignored by fuzzy matching.
pub fn is_fuzzy_noise(c: char) -> bool {
    is_variant_noise(c) || is_digit(c)
}

/// Check whether a character counts as a word neighbour for boundary
/// detection (an ideograph or a Latin letter).
pub fn is_word_char(c: char) -> bool {
    is_cjk_ideograph(c) || is_latin_letter(c)
}

/// Check whether a whole string consists only of ASCII Latin letters.
///
/// Returns `false` for the empty string.
pub fn is_pure_latin(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_latin_letter)
}

/// Return the codepoint length of a string.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- CharType tests --

    #[test]
    fn char_type_ideographs() {
        assert_eq!(get_char_type('中'), CharType::Ideograph);
        assert_eq!(get_char_type('\u{4E00}'), CharType::Ideograph);
        assert_eq!(get_char_type('\u{9FFF}'), CharType::Ideograph);
    }

    #[test]
    fn char_type_latin() {
        assert_eq!(get_char_type('a'), CharType::Latin);
        assert_eq!(get_char_type('Z'), CharType::Latin);
        // Accented letters are not ASCII Latin
        assert_eq!(get_char_type('\u{00E4}'), CharType::Unknown);
    }

    #[test]
    fn char_type_digits() {
        assert_eq!(get_char_type('0'), CharType::Digit);
        assert_eq!(get_char_type('\u{FF15}'), CharType::Digit); // full-width 5
    }

    #[test]
    fn char_type_whitespace_before_separator() {
        assert_eq!(get_char_type(' '), CharType::Whitespace);
        assert_eq!(get_char_type('\u{3000}'), CharType::Whitespace);
        assert_eq!(get_char_type('*'), CharType::Separator);
    }

    #[test]
    fn char_type_emoji() {
        assert_eq!(get_char_type('\u{1F600}'), CharType::Emoji);
        assert_eq!(get_char_type('\u{2764}'), CharType::Emoji); // heavy black heart
        assert_eq!(get_char_type('\u{1F9E0}'), CharType::Unknown); // outside ranges
    }

    // -- Noise sets --

    #[test]
    fn variant_noise_excludes_digits() {
        assert!(is_variant_noise('.'));
        assert!(is_variant_noise('\t'));
        assert!(!is_variant_noise('1'));
        assert!(!is_variant_noise('?'));
    }

    #[test]
    fn fuzzy_noise_includes_digits() {
        assert!(is_fuzzy_noise('1'));
        assert!(is_fuzzy_noise('&'));
        assert!(!is_fuzzy_noise('a'));
        assert!(!is_fuzzy_noise('字'));
    }

    #[test]
    fn word_char_classification() {
        assert!(is_word_char('字'));
        assert!(is_word_char('q'));
        assert!(!is_word_char('，'));
        assert!(!is_word_char('3'));
    }

    #[test]
    fn pure_latin() {
        assert!(is_pure_latin("abc"));
        assert!(is_pure_latin("ABc"));
        assert!(!is_pure_latin(""));
        assert!(!is_pure_latin("ab1"));
        assert!(!is_pure_latin("a字"));
    }

    #[test]
    fn char_len_counts_codepoints() {
        assert_eq!(char_len("坏蛋"), 2);
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len(""), 0);
    }
}
