//! Shared types for wordguard.
//!
//! - [`character`] -- Character classes used by normalization and filters
//! - [`enums`] -- Matching and normalization option enums
//! - [`matches`] -- The [`Match`](matches::Match) record produced by scans

pub mod character;
pub mod enums;
pub mod matches;

pub use enums::{EmojiStrategy, MatchType, MergeMode};
pub use matches::Match;
