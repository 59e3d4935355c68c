//! Character-level filters applied before tokenization.

use regex::Regex;

use crate::error::{Result, SentiraError};

/// Marker token substituted for user mentions.
pub const MENTION_MARKER: &str = "@user";

/// Trait for filters that rewrite raw text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Rewrite the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A char filter that replaces `@handle`-shaped mentions with a single
/// generic marker token.
///
/// Collapsing mentions keeps the vocabulary from filling up with one-off
/// user handles while preserving the "someone was addressed" signal.
pub struct MentionCharFilter {
    pattern: Regex,
}

impl MentionCharFilter {
    /// Create a new mention filter.
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"@[A-Za-z0-9_]+")
            .map_err(|e| SentiraError::analysis(format!("invalid mention pattern: {e}")))?;
        Ok(MentionCharFilter { pattern })
    }
}

impl CharFilter for MentionCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern.replace_all(input, MENTION_MARKER).into_owned()
    }

    fn name(&self) -> &'static str {
        "mention"
    }
}
