//! Part-of-speech tagging and lemmatization.

mod lemmatizer;
mod tagger;

pub use lemmatizer::{DictionaryLemmatizer, Lemmatizer};
pub use tagger::{LexiconTagger, PosTagger, TaggedWord};
