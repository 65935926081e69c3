//! # Sarv - Dependency Parsing Pipeline for Persian
//!
//! Sarv turns raw Persian text into dependency graphs. Text is normalized,
//! split into sentences, tokenized, POS tagged and optionally lemmatized
//! before a statistical parsing model attaches every word to its head.
//!
//! ## Overview
//!
//! ```text
//! text -> Normalizer -> SentenceSegmenter -> (per sentence, lazily)
//!      -> WordTokenizer -> PosTagger -> Lemmatizer -> ColumnarRecord
//!      -> ParsingModel -> DependencyGraph
//! ```
//!
//! Every stage is a trait, so any of them can be swapped out. The parsing
//! model comes from a [`ParsingEngine`] and is loaded from disk the first time
//! a sentence is parsed, then reused for the lifetime of the
//! [`DependencyParser`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sarv::{Config, DependencyParser, TaggedWord};
//!
//! let parser = DependencyParser::with_config(engine, Config::default());
//!
//! // Raw text: one result per sentence, computed as the iterator advances.
//! for result in parser.parse_text("علی به مدرسه رفت. او کتاب خواند.") {
//!     match result {
//!         Ok(graph) => println!("{}", graph.to_conll().join("\n")),
//!         Err(err) => eprintln!("{}", err),
//!     }
//! }
//!
//! // Pre-tagged input.
//! let graph = parser.parse_tagged_sentence(&[
//!     TaggedWord::new("من", "PRO"),
//!     TaggedWord::new("رفتم", "V"),
//! ])?;
//! ```
//!
//! ## Modules
//!
//! - [`text`] - Normalization, sentence segmentation and word tokenization
//! - [`tagging`] - POS tagging and lemmatization
//! - [`parser`] - Columnar records, the model handle, sentence streams and the facade

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod parser;
pub mod tagging;
pub mod text;

// Re-export commonly used types
pub use config::{Config, NormalizerConfig, ParserConfig, TaggerConfig, TokenizerConfig};
pub use error::{Result, SarvError};
pub use parser::{
    build_record, ColumnarRecord, DependencyEdge, DependencyGraph, DependencyParser,
    DependencyParserBuilder, GraphToken, ModelHandle, ParsingEngine, ParsingModel, RecordLine,
    SentenceStream,
};
pub use tagging::{DictionaryLemmatizer, Lemmatizer, LexiconTagger, PosTagger, TaggedWord};
pub use text::{
    Normalizer, PersianNormalizer, PersianWordTokenizer, RegexSentenceSegmenter,
    SentenceSegmenter, WordTokenizer,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default location of the parsing model.
pub const DEFAULT_MODEL_PATH: &str = "resources/langModel.mco";

/// Placeholder for an unknown lemma, tag or column value.
pub const UNKNOWN: &str = "_";
