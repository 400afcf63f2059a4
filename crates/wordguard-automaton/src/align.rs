// Match alignment: reduce independently found matches to trie-scan output

use wordguard_core::{Match, MatchType};

/// Re-derive trie-scan-equivalent output from matches found independently
/// per word.
///
/// Matches are sorted by offset, ties broken by length (ascending for
/// `Min`, descending for `Max`). A left-to-right sweep then keeps a match
/// only if it starts at or after the end of the last kept match.
///
/// Given every occurrence of every dictionary word, the result is exactly
/// what [`Automaton::scan`](crate::trie::Automaton) produces for the same
/// text and match type.
pub fn align(mut matches: Vec<Match>, match_type: MatchType) -> Vec<Match> {
    matches.sort_by(|a, b| {
        a.offset.cmp(&b.offset).then_with(|| match match_type {
            MatchType::Min => a.length.cmp(&b.length),
            MatchType::Max => b.length.cmp(&a.length),
        })
    });

    let mut aligned = Vec::with_capacity(matches.len());
    // Offsets are unsigned, so a cursor at 0 accepts the first match.
    let mut covered_until = 0;
    for m in matches {
        if m.offset >= covered_until {
            covered_until = m.end();
            aligned.push(m);
        }
    }
    aligned
}
