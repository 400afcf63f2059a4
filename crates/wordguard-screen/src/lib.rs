//! Sensitive-word screening on top of the wordguard matching engine.
//!
//! # Architecture
//!
//! - [`config`] -- `ScreenConfig`, the recognized options and their defaults
//! - [`normalizer`] -- Emoji handling and variant-text folding applied before matching
//! - [`whitelist`] -- Direct and contextual exemption of matches
//! - [`fuzzy`] -- Gap-bounded subsequence matcher for obfuscated words (feature `fuzzy`)
//! - [`filters`] -- Heuristic false-positive filters for fuzzy findings (feature `fuzzy`)
//! - [`store`] -- Snapshot persistence of the compiled library (feature `store`)
//! - [`handle`] -- The `Screen` composition root exposing every operation (feature `handle`)

use std::path::PathBuf;

use wordguard_automaton::AutomatonError;

pub mod config;
pub mod normalizer;
pub mod whitelist;

#[cfg(feature = "fuzzy")]
pub mod filters;
#[cfg(feature = "fuzzy")]
pub mod fuzzy;
#[cfg(feature = "handle")]
pub mod handle;
#[cfg(feature = "store")]
pub mod store;

pub use config::ScreenConfig;
#[cfg(feature = "handle")]
pub use handle::Screen;
pub use normalizer::{TextNormalizer, VariantMap};
pub use whitelist::Whitelist;

/// Error type for screening operations.
///
/// Detection never fails: only entry points given an explicit argument the
/// caller is responsible for (a dictionary path, a snapshot request) return
/// these.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    /// An explicitly named file is missing, unreadable or malformed.
    #[error("cannot use {}: {reason}", path.display())]
    Configuration { path: PathBuf, reason: String },

    /// An entry point that needs content received none.
    #[error("input is empty")]
    EmptyInput,

    /// The operation needs at least one dictionary word.
    #[error("word library is empty")]
    EmptyLibrary,

    /// The library could not be materialized or persisted.
    #[error("system error: {0}")]
    System(String),
}

impl From<AutomatonError> for ScreenError {
    fn from(e: AutomatonError) -> Self {
        ScreenError::System(e.to_string())
    }
}
