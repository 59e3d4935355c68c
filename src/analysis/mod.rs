//! Text analysis: normalization and tokenization.
//!
//! Analysis runs in a fixed order: char filters normalize raw text, then a
//! tokenizer splits the result into tokens. The vectorizer consumes the
//! token stream; nothing downstream ever sees unnormalized text.

pub mod char_filter;
pub mod tokenizer;

pub use char_filter::{CharFilter, MENTION_MARKER, MentionCharFilter};
pub use tokenizer::{SocialOptions, SocialTokenizer, Tokenizer, TokenizerPolicy, WordTokenizer};
