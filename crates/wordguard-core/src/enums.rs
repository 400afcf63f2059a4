// Shared enums: MatchType, EmojiStrategy, MergeMode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing one of the option enums from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Scanning rule applied when several dictionary words start at the same
/// position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Shortest match: stop at the first terminal node reached.
    #[default]
    Min,
    /// Longest match: report the last terminal node on the live edge path.
    Max,
}

impl FromStr for MatchType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(ParseEnumError::new("match type", other)),
        }
    }
}

/// How emoji codepoints are treated before matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiStrategy {
    /// Leave emoji in place.
    #[default]
    Ignore,
    /// Treat emoji as ordinary characters (same effect as `Ignore`).
    Include,
    /// Delete every emoji codepoint.
    Remove,
    /// Substitute each emoji codepoint with the configured placeholder.
    Replace,
}

impl EmojiStrategy {
    /// Whether this strategy leaves the text untouched.
    pub fn is_passthrough(self) -> bool {
        matches!(self, Self::Ignore | Self::Include)
    }
}

impl FromStr for EmojiStrategy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "include" => Ok(Self::Include),
            "remove" => Ok(Self::Remove),
            "replace" => Ok(Self::Replace),
            other => Err(ParseEnumError::new("emoji strategy", other)),
        }
    }
}

impl fmt::Display for EmojiStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ignore => "ignore",
            Self::Include => "include",
            Self::Remove => "remove",
            Self::Replace => "replace",
        };
        f.write_str(name)
    }
}

/// How a user dictionary combines with the default dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Use only the user dictionary.
    Override,
    /// Load the default dictionary, then append user words not already present.
    #[default]
    Append,
}

impl FromStr for MergeMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "override" => Ok(Self::Override),
            "append" => Ok(Self::Append),
            other => Err(ParseEnumError::new("merge mode", other)),
        }
    }
}
