//! Tokenizer implementations and the policy set the vectorizer selects from.
//!
//! Two policies are available: [`TokenizerPolicy::Default`] segments on
//! Unicode word boundaries and lowercases, while [`TokenizerPolicy::Social`]
//! keeps mentions, hashtags, and emoticons intact and is configured by
//! [`SocialOptions`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Result, SentiraError};

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Options for the social-media tokenizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialOptions {
    /// Keep the original casing instead of lowercasing tokens.
    pub preserve_case: bool,
    /// Collapse character runs longer than three ("sooooo" -> "sooo").
    pub reduce_repeated: bool,
}

impl Default for SocialOptions {
    fn default() -> Self {
        SocialOptions {
            preserve_case: false,
            reduce_repeated: true,
        }
    }
}

/// The fixed set of tokenization policies a vectorizer can be configured with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerPolicy {
    /// Unicode word segmentation, lowercased.
    Default,
    /// Social-media aware tokenization.
    Social(SocialOptions),
}

impl TokenizerPolicy {
    /// Build a fresh tokenizer instance for this policy.
    pub fn build(&self) -> Result<Box<dyn Tokenizer>> {
        match self {
            TokenizerPolicy::Default => Ok(Box::new(WordTokenizer::new())),
            TokenizerPolicy::Social(options) => Ok(Box::new(SocialTokenizer::new(*options)?)),
        }
    }

    /// Get the name of this policy (for logging and reports).
    pub fn name(&self) -> &'static str {
        match self {
            TokenizerPolicy::Default => "default",
            TokenizerPolicy::Social(_) => "social",
        }
    }
}

/// Default tokenizer: Unicode word boundaries, lowercased output.
#[derive(Clone, Debug, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new word tokenizer.
    pub fn new() -> Self {
        WordTokenizer
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.unicode_words().map(|w| w.to_lowercase()).collect())
    }

    fn name(&self) -> &'static str {
        "word"
    }
}

/// Social-media tokenizer keeping mentions, hashtags, contractions, and
/// simple emoticons as single tokens.
pub struct SocialTokenizer {
    options: SocialOptions,
    pattern: Regex,
}

impl SocialTokenizer {
    /// Create a new social tokenizer with the given options.
    pub fn new(options: SocialOptions) -> Result<Self> {
        let pattern = Regex::new(r"@\w+|#\w+|\w+(?:'\w+)?|[:;=8][-o*'^]?[\)\(\[\]dDpP3/\\|]")
            .map_err(|e| SentiraError::analysis(format!("invalid token pattern: {e}")))?;
        Ok(SocialTokenizer { options, pattern })
    }

    /// Options this tokenizer was configured with.
    pub fn options(&self) -> SocialOptions {
        self.options
    }

    /// Collapse any character run longer than three down to three.
    fn reduce_repeated(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last: Option<char> = None;
        let mut run = 0;
        for c in text.chars() {
            if Some(c) == last {
                run += 1;
            } else {
                last = Some(c);
                run = 1;
            }
            if run <= 3 {
                out.push(c);
            }
        }
        out
    }
}

impl Tokenizer for SocialTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let text = if self.options.reduce_repeated {
            Self::reduce_repeated(text)
        } else {
            text.to_string()
        };

        let tokens = self
            .pattern
            .find_iter(&text)
            .map(|m| {
                if self.options.preserve_case {
                    m.as_str().to_string()
                } else {
                    m.as_str().to_lowercase()
                }
            })
            .collect();

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "social"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenizer() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("Hello, World! It's fine.").unwrap();
        assert_eq!(tokens, vec!["hello", "world", "it's", "fine"]);
    }

    #[test]
    fn test_social_tokenizer_keeps_handles_and_hashtags() {
        let tokenizer = SocialTokenizer::new(SocialOptions::default()).unwrap();
        let tokens = tokenizer.tokenize("@Alice loves #Rust :)").unwrap();
        assert_eq!(tokens, vec!["@alice", "loves", "#rust", ":)"]);
    }

    #[test]
    fn test_social_tokenizer_preserve_case() {
        let options = SocialOptions {
            preserve_case: true,
            reduce_repeated: false,
        };
        let tokenizer = SocialTokenizer::new(options).unwrap();
        let tokens = tokenizer.tokenize("SO Good").unwrap();
        assert_eq!(tokens, vec!["SO", "Good"]);
    }

    #[test]
    fn test_reduce_repeated_caps_runs_at_three() {
        let tokenizer = SocialTokenizer::new(SocialOptions::default()).unwrap();
        let tokens = tokenizer.tokenize("soooooo goooood").unwrap();
        assert_eq!(tokens, vec!["sooo", "goood"]);
    }

    #[test]
    fn test_policy_builds_matching_tokenizer() {
        let default = TokenizerPolicy::Default.build().unwrap();
        assert_eq!(default.name(), "word");

        let social = TokenizerPolicy::Social(SocialOptions::default())
            .build()
            .unwrap();
        assert_eq!(social.name(), "social");
    }
}
