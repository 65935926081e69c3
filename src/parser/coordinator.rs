//! The parsing pipeline facade.

use crate::config::Config;
use crate::error::{Result, SarvError};
use crate::parser::graph::DependencyGraph;
use crate::parser::model::{ModelHandle, ParsingEngine};
use crate::parser::record::{build_record, ColumnarRecord};
use crate::parser::stream::SentenceStream;
use crate::tagging::{Lemmatizer, LexiconTagger, PosTagger, TaggedWord};
use crate::text::{
    Normalizer, PersianNormalizer, PersianWordTokenizer, RegexSentenceSegmenter,
    SentenceSegmenter, WordTokenizer,
};
use rayon::prelude::*;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Dependency parser for raw or pre-tagged text.
///
/// Composes a normalizer, sentence segmenter, word tokenizer, POS tagger and
/// lemmatizer with a lazily loaded parsing model. The model is loaded at most
/// once, on the first parse through any entry point, and is shared by every
/// stream created from this parser.
///
/// # Example
///
/// ```rust,ignore
/// use sarv::DependencyParser;
///
/// let parser = DependencyParser::builder(my_engine).build();
/// for graph in parser.parse_text("او به مدرسه رفت. کتاب را خواند.") {
///     println!("{:?}", graph?.edges());
/// }
/// ```
pub struct DependencyParser {
    normalizer: Option<Arc<dyn Normalizer>>,
    segmenter: Arc<dyn SentenceSegmenter>,
    word_tokenizer: Arc<dyn WordTokenizer>,
    tagger: Arc<dyn PosTagger>,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
    model: ModelHandle,
}

impl DependencyParser {
    /// Starts building a parser around `engine`.
    pub fn builder(engine: impl ParsingEngine + 'static) -> DependencyParserBuilder {
        DependencyParserBuilder::new(Arc::new(engine))
    }

    /// Creates a parser with default collaborators for `config`.
    pub fn with_config(engine: impl ParsingEngine + 'static, config: Config) -> Self {
        Self::builder(engine).with_config(config).build()
    }

    /// Returns the normalizer, if one is installed.
    pub fn normalizer(&self) -> Option<&dyn Normalizer> {
        self.normalizer.as_deref()
    }

    /// Returns the sentence segmenter.
    pub fn segmenter(&self) -> &dyn SentenceSegmenter {
        self.segmenter.as_ref()
    }

    /// Returns the word tokenizer.
    pub fn word_tokenizer(&self) -> &dyn WordTokenizer {
        self.word_tokenizer.as_ref()
    }

    /// Returns the POS tagger.
    pub fn tagger(&self) -> &dyn PosTagger {
        self.tagger.as_ref()
    }

    /// Returns the lemmatizer, if one is installed.
    pub fn lemmatizer(&self) -> Option<&dyn Lemmatizer> {
        self.lemmatizer.as_deref()
    }

    /// Replaces the normalizer.
    pub fn set_normalizer(&mut self, normalizer: impl Normalizer + 'static) {
        self.normalizer = Some(Arc::new(normalizer));
    }

    /// Removes the normalizer; text is then segmented as given.
    pub fn clear_normalizer(&mut self) {
        self.normalizer = None;
    }

    /// Replaces the sentence segmenter.
    pub fn set_segmenter(&mut self, segmenter: impl SentenceSegmenter + 'static) {
        self.segmenter = Arc::new(segmenter);
    }

    /// Replaces the word tokenizer.
    pub fn set_word_tokenizer(&mut self, tokenizer: impl WordTokenizer + 'static) {
        self.word_tokenizer = Arc::new(tokenizer);
    }

    /// Replaces the POS tagger.
    pub fn set_tagger(&mut self, tagger: impl PosTagger + 'static) {
        self.tagger = Arc::new(tagger);
    }

    /// Replaces the lemmatizer.
    pub fn set_lemmatizer(&mut self, lemmatizer: impl Lemmatizer + 'static) {
        self.lemmatizer = Some(Arc::new(lemmatizer));
    }

    /// Removes the lemmatizer; lemma columns are then left unknown.
    pub fn clear_lemmatizer(&mut self) {
        self.lemmatizer = None;
    }

    /// Returns true once the parsing model has been loaded.
    pub fn model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    /// Returns the handle of the parsing model.
    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Parses raw text, one graph per sentence.
    ///
    /// Normalization runs now; segmentation and everything after it run as
    /// the returned stream is consumed.
    pub fn parse_text(&self, text: &str) -> SentenceStream<'_> {
        let text = match self.normalizer() {
            Some(normalizer) => normalizer.normalize(text),
            None => text.to_string(),
        };
        SentenceStream::from_text(self, text)
    }

    /// Parses pre-segmented sentences, one graph per sentence.
    pub fn parse_sentences<I, S>(&self, sentences: I) -> SentenceStream<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SentenceStream::from_sentences(self, sentences.into_iter().map(Into::into).collect())
    }

    /// Tokenizes, tags and parses one sentence.
    pub fn parse_sentence(&self, sentence: &str) -> Result<DependencyGraph> {
        let words = self.word_tokenizer.tokenize(sentence)?;
        let tagged = self.tagger.batch_tag(&words)?;
        if tagged.len() != words.len() {
            return Err(SarvError::Parse(format!(
                "tagger returned {} tags for {} words",
                tagged.len(),
                words.len()
            )));
        }
        self.parse_tagged_sentence(&tagged)
    }

    /// Parses a sentence that has already been tagged.
    pub fn parse_tagged_sentence(&self, sentence: &[TaggedWord]) -> Result<DependencyGraph> {
        let record = build_record(sentence, self.lemmatizer());
        self.parse_record(&record)
    }

    /// Parses many tagged sentences in parallel.
    ///
    /// The outer result fails only if the model cannot be loaded; each
    /// sentence has its own result, in input order.
    ///
    /// Sentences are spread over the rayon global thread pool. This is the
    /// only entry point that uses threads of its own; everything else runs on
    /// the calling thread. The engine's models must therefore tolerate
    /// concurrent `parse` calls, which their `Send + Sync` bound already
    /// requires.
    pub fn parse_tagged_batch(
        &self,
        sentences: &[Vec<TaggedWord>],
    ) -> Result<Vec<Result<DependencyGraph>>> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }
        self.model.get()?;

        Ok(sentences
            .par_iter()
            .map(|sentence| self.parse_tagged_sentence(sentence))
            .collect())
    }

    /// Parses a columnar record, loading the model if necessary.
    ///
    /// Every other entry point ends here. A record whose fields contain tab,
    /// newline or carriage return characters fails with [`SarvError::Parse`]
    /// before it reaches the model.
    pub fn parse_record(&self, record: &ColumnarRecord) -> Result<DependencyGraph> {
        record.validate()?;
        self.model.parse(record)
    }
}

impl fmt::Debug for DependencyParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyParser")
            .field("normalizer", &self.normalizer.is_some())
            .field("lemmatizer", &self.lemmatizer.is_some())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DependencyParser`].
///
/// Collaborators that are not supplied are constructed from the
/// configuration when [`DependencyParserBuilder::build`] runs: a
/// [`RegexSentenceSegmenter`], a [`PersianWordTokenizer`] and a
/// [`LexiconTagger`]. The normalizer is a [`PersianNormalizer`] only when
/// `config.parser.normalize` is set; the lemmatizer stays absent.
pub struct DependencyParserBuilder {
    engine: Arc<dyn ParsingEngine>,
    config: Config,
    model_path: Option<PathBuf>,
    normalizer: Option<Arc<dyn Normalizer>>,
    segmenter: Option<Arc<dyn SentenceSegmenter>>,
    word_tokenizer: Option<Arc<dyn WordTokenizer>>,
    tagger: Option<Arc<dyn PosTagger>>,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
}

impl DependencyParserBuilder {
    /// Creates a builder with default configuration.
    pub fn new(engine: Arc<dyn ParsingEngine>) -> Self {
        Self {
            engine,
            config: Config::default(),
            model_path: None,
            normalizer: None,
            segmenter: None,
            word_tokenizer: None,
            tagger: None,
            lemmatizer: None,
        }
    }

    /// Sets the configuration used for default collaborators and the model path.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Overrides the model path from the configuration.
    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Installs a normalizer.
    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    /// Installs a sentence segmenter.
    pub fn with_segmenter(mut self, segmenter: impl SentenceSegmenter + 'static) -> Self {
        self.segmenter = Some(Arc::new(segmenter));
        self
    }

    /// Installs a word tokenizer.
    pub fn with_word_tokenizer(mut self, tokenizer: impl WordTokenizer + 'static) -> Self {
        self.word_tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Installs a POS tagger.
    pub fn with_tagger(mut self, tagger: impl PosTagger + 'static) -> Self {
        self.tagger = Some(Arc::new(tagger));
        self
    }

    /// Installs a lemmatizer.
    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Some(Arc::new(lemmatizer));
        self
    }

    /// Builds the parser. No resource is read until the first parse.
    pub fn build(self) -> DependencyParser {
        let Config {
            normalizer: normalizer_config,
            tokenizer: tokenizer_config,
            tagger: tagger_config,
            parser: parser_config,
        } = self.config;

        let normalizer = self.normalizer.or_else(|| {
            parser_config
                .normalize
                .then(|| Arc::new(PersianNormalizer::new(normalizer_config)) as Arc<dyn Normalizer>)
        });
        let model_path = self.model_path.unwrap_or(parser_config.model_path);

        DependencyParser {
            normalizer,
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Arc::new(RegexSentenceSegmenter::new())),
            word_tokenizer: self
                .word_tokenizer
                .unwrap_or_else(|| Arc::new(PersianWordTokenizer::new(tokenizer_config))),
            tagger: self
                .tagger
                .unwrap_or_else(|| Arc::new(LexiconTagger::new(tagger_config))),
            lemmatizer: self.lemmatizer,
            model: ModelHandle::new(self.engine, model_path),
        }
    }
}
