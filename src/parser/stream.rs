//! Lazy per-sentence parsing.
//!
//! A [`SentenceStream`] does no work until it is pulled. Each call to
//! `next` tokenizes, tags, lemmatizes and parses exactly one sentence, so a
//! consumer that stops early never pays for the rest of the document.

use crate::error::{Result, SarvError};
use crate::parser::coordinator::DependencyParser;
use crate::parser::graph::DependencyGraph;
use std::iter::FusedIterator;

/// Input of a stream that has not been pulled yet.
#[derive(Debug)]
enum Source {
    /// Normalized text, segmented on the first pull.
    Text(String),
    /// Sentences supplied by the caller.
    Sentences(Vec<String>),
}

#[derive(Debug)]
enum State {
    NotStarted(Source),
    Producing {
        sentences: std::vec::IntoIter<String>,
        index: usize,
    },
    Exhausted,
}

/// Iterator of dependency graphs, one per sentence, in sentence order.
///
/// A sentence that fails to parse yields `Err(SarvError::Sentence { index, .. })`
/// and the stream carries on with the next sentence. Use
/// [`SentenceStream::skip_failures`] to log and drop failed sentences instead.
#[derive(Debug)]
pub struct SentenceStream<'p> {
    parser: &'p DependencyParser,
    state: State,
}

impl<'p> SentenceStream<'p> {
    pub(crate) fn from_text(parser: &'p DependencyParser, text: String) -> Self {
        Self {
            parser,
            state: State::NotStarted(Source::Text(text)),
        }
    }

    pub(crate) fn from_sentences(parser: &'p DependencyParser, sentences: Vec<String>) -> Self {
        Self {
            parser,
            state: State::NotStarted(Source::Sentences(sentences)),
        }
    }

    /// Returns true once the stream has been started.
    pub fn is_started(&self) -> bool {
        !matches!(self.state, State::NotStarted(_))
    }

    /// Number of sentences not yet produced.
    ///
    /// `None` before the first pull of a text stream, because the text has
    /// not been segmented yet.
    pub fn sentences_remaining(&self) -> Option<usize> {
        match &self.state {
            State::NotStarted(Source::Text(_)) => None,
            State::NotStarted(Source::Sentences(sentences)) => Some(sentences.len()),
            State::Producing { sentences, .. } => Some(sentences.len()),
            State::Exhausted => Some(0),
        }
    }

    /// Drops failed sentences, logging each failure at `warn` level.
    pub fn skip_failures(self) -> impl Iterator<Item = DependencyGraph> + 'p {
        self.filter_map(|result| match result {
            Ok(graph) => Some(graph),
            Err(err) => {
                log::warn!("Skipping sentence: {}", err);
                None
            }
        })
    }
}

impl Iterator for SentenceStream<'_> {
    type Item = Result<DependencyGraph>;

    fn next(&mut self) -> Option<Self::Item> {
        let (mut sentences, index) = match std::mem::replace(&mut self.state, State::Exhausted) {
            State::NotStarted(Source::Text(text)) => {
                (self.parser.segmenter().segment(&text).into_iter(), 0)
            }
            State::NotStarted(Source::Sentences(sentences)) => (sentences.into_iter(), 0),
            State::Producing { sentences, index } => (sentences, index),
            State::Exhausted => return None,
        };

        let sentence = sentences.next()?;
        let result = self
            .parser
            .parse_sentence(&sentence)
            .map_err(|err| SarvError::Sentence {
                index,
                source: Box::new(err),
            });
        log::debug!("Sentence {} parsed (ok = {})", index, result.is_ok());

        self.state = State::Producing {
            sentences,
            index: index + 1,
        };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.sentences_remaining() {
            Some(remaining) => (remaining, Some(remaining)),
            None => (0, None),
        }
    }
}

impl FusedIterator for SentenceStream<'_> {}
