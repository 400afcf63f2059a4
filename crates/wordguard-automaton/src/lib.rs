//! Multi-pattern dictionary matching engine.
//!
//! # Architecture
//!
//! - [`node`] -- Trie node with a typed child-edge map and terminal flag
//! - [`trie`] -- The [`Automaton`](trie::Automaton): insertion and min/max scanning
//! - [`prefix`] -- First-character word buckets used as a scan accelerator
//! - [`align`] -- Reconciles independently found matches to trie-scan semantics
//! - [`dictionary`] -- Automaton plus optional prefix index, with scan dispatch
//! - [`source`] -- Lazy line-oriented dictionary reader
//! - [`format`] -- Flat, versioned serde representation of the automaton

pub mod align;
pub mod dictionary;
pub mod format;
pub mod node;
pub mod prefix;
pub mod source;
pub mod trie;

use wordguard_core::{Match, MatchType};

pub use dictionary::Dictionary;
pub use prefix::PrefixIndex;
pub use trie::Automaton;

/// Error type for dictionary building and snapshot decoding.
#[derive(Debug, thiserror::Error)]
pub enum AutomatonError {
    #[error("failed to read dictionary source: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot format mismatch: expected version {expected}, got {actual}")]
    SnapshotFormat { expected: u32, actual: u32 },
    #[error("corrupt snapshot: {0}")]
    SnapshotCorrupt(String),
}

/// Texts at or above this many codepoints bypass the prefix index and use
/// the plain trie walk.
pub const PREFIX_SCAN_MAX_LEN: usize = 10_000;

/// Trait for dictionary scanners, abstracting over the trie walk and the
/// prefix-index search.
///
/// Every implementation must return non-overlapping matches sorted by
/// offset, chosen with the leftmost-first rule and the shortest (`Min`) or
/// longest (`Max`) word at each chosen position.
pub trait Scanner {
    /// Find dictionary words in `text` (a codepoint slice).
    fn scan(&self, text: &[char], match_type: MatchType) -> Vec<Match>;
}
