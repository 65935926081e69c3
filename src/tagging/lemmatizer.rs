//! Lemmatization.

use crate::error::Result;
use crate::tagging::tagger::load_lexicon;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Maps a word to its lemma.
pub trait Lemmatizer: Send + Sync {
    /// Returns the lemma of `word`. `tag` is the word's POS tag when known.
    fn lemmatize(&self, word: &str, tag: Option<&str>) -> String;
}

impl<F> Lemmatizer for F
where
    F: Fn(&str, Option<&str>) -> String + Send + Sync,
{
    fn lemmatize(&self, word: &str, tag: Option<&str>) -> String {
        self(word, tag)
    }
}

/// Inflectional suffixes tried, longest first, when a word has no entry.
const SUFFIXES: &[&str] = &["هایی", "های", "ها", "ترین", "تر"];

/// Suffixes are separated from their stem by a zero-width non-joiner or not at all.
const ZWNJ: char = '\u{200C}';

/// Dictionary lemmatizer with suffix stripping.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    forms: HashMap<String, String>,
    lemmas: HashSet<String>,
}

impl DictionaryLemmatizer {
    /// Creates a lemmatizer from `(word, lemma)` pairs.
    pub fn from_entries<I, W, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, L)>,
        W: Into<String>,
        L: Into<String>,
    {
        let forms: HashMap<String, String> = entries
            .into_iter()
            .map(|(w, l)| (w.into(), l.into()))
            .collect();
        let lemmas = forms.values().cloned().collect();
        Self { forms, lemmas }
    }

    /// Loads a `word<TAB>lemma` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_entries(load_lexicon(path.as_ref())?))
    }

    /// Adds a known lemma that is its own base form.
    pub fn add_lemma(&mut self, lemma: impl Into<String>) {
        self.lemmas.insert(lemma.into());
    }

    /// Returns the number of word forms in the dictionary.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns true if the dictionary has no word forms.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    fn strip_suffix(&self, word: &str) -> Option<String> {
        SUFFIXES.iter().find_map(|suffix| {
            let stem = word.strip_suffix(suffix)?;
            let stem = stem.trim_end_matches(ZWNJ);
            if stem.is_empty() {
                return None;
            }
            if let Some(lemma) = self.forms.get(stem) {
                return Some(lemma.clone());
            }
            self.lemmas.contains(stem).then(|| stem.to_string())
        })
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize(&self, word: &str, _tag: Option<&str>) -> String {
        if let Some(lemma) = self.forms.get(word) {
            return lemma.clone();
        }
        self.strip_suffix(word).unwrap_or_else(|| word.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lemmatizer() -> DictionaryLemmatizer {
        DictionaryLemmatizer::from_entries([("running", "run"), ("کتاب", "کتاب"), ("رفتم", "رفت#رو")])
    }

    #[test]
    fn test_dictionary_lookup() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("running", Some("VB")), "run");
        assert_eq!(lem.lemmatize("رفتم", None), "رفت#رو");
    }

    #[test]
    fn test_suffix_stripping() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("کتاب\u{200C}ها", None), "کتاب");
        assert_eq!(lem.lemmatize("کتابهای", None), "کتاب");
    }

    #[test]
    fn test_unknown_word_is_its_own_lemma() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("ناشناخته", None), "ناشناخته");
        assert_eq!(lem.lemmatize("ها", None), "ها");
    }

    #[test]
    fn test_add_lemma() {
        let mut lem = DictionaryLemmatizer::default();
        assert!(lem.is_empty());
        lem.add_lemma("بزرگ");
        assert_eq!(lem.lemmatize("بزرگترین", None), "بزرگ");
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "کتاب‌ها\tکتاب").unwrap();
        let lem = DictionaryLemmatizer::load(file.path()).unwrap();
        assert_eq!(lem.len(), 1);
        assert_eq!(lem.lemmatize("کتاب‌ها", None), "کتاب");
    }

    #[test]
    fn test_closure_lemmatizer() {
        let lower = |word: &str, _tag: Option<&str>| word.to_lowercase();
        assert_eq!(Lemmatizer::lemmatize(&lower, "Run", None), "run");
    }
}
