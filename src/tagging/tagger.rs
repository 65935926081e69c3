//! Part-of-speech tagging.

use crate::config::TaggerConfig;
use crate::error::{Result, SarvError};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A word with its part-of-speech tag, if one was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedWord {
    /// The word form.
    pub word: String,
    /// The part-of-speech tag.
    pub tag: Option<String>,
}

impl TaggedWord {
    /// Creates a tagged word.
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: Some(tag.into()),
        }
    }

    /// Creates a word without a tag.
    pub fn untagged(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: None,
        }
    }
}

impl<W: Into<String>, T: Into<String>> From<(W, T)> for TaggedWord {
    fn from((word, tag): (W, T)) -> Self {
        Self::new(word, tag)
    }
}

/// Assigns tags to a whole sentence at once, since tags may depend on context.
pub trait PosTagger: Send + Sync {
    /// Tags `words`, returning exactly one entry per word, in the same order.
    fn batch_tag(&self, words: &[String]) -> Result<Vec<TaggedWord>>;
}

impl<F> PosTagger for F
where
    F: Fn(&[String]) -> Result<Vec<TaggedWord>> + Send + Sync,
{
    fn batch_tag(&self, words: &[String]) -> Result<Vec<TaggedWord>> {
        self(words)
    }
}

/// Dictionary tagger backed by a `word<TAB>tag` lexicon.
///
/// The lexicon is read on the first call to [`PosTagger::batch_tag`]. Words
/// missing from it are tagged `NUM` when numeric, `PUNC` when punctuation,
/// and otherwise receive the configured fallback tag.
#[derive(Debug)]
pub struct LexiconTagger {
    config: TaggerConfig,
    lexicon: OnceCell<HashMap<String, String>>,
}

impl LexiconTagger {
    /// Creates a new tagger with the given configuration.
    pub fn new(config: TaggerConfig) -> Self {
        Self {
            config,
            lexicon: OnceCell::new(),
        }
    }

    /// Creates a tagger with default configuration.
    pub fn default_config() -> Self {
        Self::new(TaggerConfig::default())
    }

    /// Creates a tagger from an in-memory lexicon.
    pub fn from_entries<I, W, T>(entries: I, fallback_tag: Option<String>) -> Self
    where
        I: IntoIterator<Item = (W, T)>,
        W: Into<String>,
        T: Into<String>,
    {
        let lexicon = entries
            .into_iter()
            .map(|(w, t)| (w.into(), t.into()))
            .collect();
        Self {
            config: TaggerConfig {
                lexicon_path: None,
                fallback_tag,
            },
            lexicon: OnceCell::with_value(lexicon),
        }
    }

    fn lexicon(&self) -> Result<&HashMap<String, String>> {
        self.lexicon.get_or_try_init(|| match &self.config.lexicon_path {
            Some(path) => load_lexicon(path),
            None => Ok(HashMap::new()),
        })
    }

    fn tag_word(&self, lexicon: &HashMap<String, String>, word: &str) -> Option<String> {
        if let Some(tag) = lexicon.get(word) {
            return Some(tag.clone());
        }
        if word.chars().any(|c| c.is_numeric())
            && word.chars().all(|c| c.is_numeric() || c == '.' || c == '/' || c == '٫')
        {
            return Some("NUM".to_string());
        }
        if !word.is_empty() && word.chars().all(is_punctuation) {
            return Some("PUNC".to_string());
        }
        self.config.fallback_tag.clone()
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::default_config()
    }
}

impl PosTagger for LexiconTagger {
    fn batch_tag(&self, words: &[String]) -> Result<Vec<TaggedWord>> {
        let lexicon = self.lexicon()?;
        Ok(words
            .iter()
            .map(|word| TaggedWord {
                word: word.clone(),
                tag: self.tag_word(lexicon, word),
            })
            .collect())
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '،' | '؛' | '؟' | '«' | '»' | '…')
}

/// Reads a tab-separated `word<TAB>tag` file; blank lines are skipped.
pub(crate) fn load_lexicon(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|e| SarvError::resource(path, e))?;

    let mut entries = HashMap::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        match (fields.next(), fields.next()) {
            (Some(key), Some(value)) if !key.is_empty() => {
                entries.insert(key.to_string(), value.trim().to_string());
            }
            _ => {
                return Err(SarvError::resource(
                    path,
                    format!("malformed entry on line {}", line_no + 1),
                ))
            }
        }
    }

    log::info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lexicon_lookup_and_rules() {
        let tagger = LexiconTagger::from_entries([("کتاب", "N"), ("خواندم", "V")], None);
        let tagged = tagger.batch_tag(&words(&["کتاب", "را", "۱۲", "خواندم", "."])).unwrap();

        assert_eq!(tagged.len(), 5);
        assert_eq!(tagged[0], TaggedWord::new("کتاب", "N"));
        assert_eq!(tagged[1], TaggedWord::untagged("را"));
        assert_eq!(tagged[2].tag.as_deref(), Some("NUM"));
        assert_eq!(tagged[3].tag.as_deref(), Some("V"));
        assert_eq!(tagged[4].tag.as_deref(), Some("PUNC"));
    }

    #[test]
    fn test_fallback_tag() {
        let tagger = LexiconTagger::default_config();
        let tagged = tagger.batch_tag(&words(&["ناشناخته"])).unwrap();
        assert_eq!(tagged[0].tag.as_deref(), Some("N"));
    }

    #[test]
    fn test_lexicon_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "رفتم\tV").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "به\tP").unwrap();

        let tagger = LexiconTagger::new(TaggerConfig {
            lexicon_path: Some(file.path().to_path_buf()),
            fallback_tag: None,
        });
        let tagged = tagger.batch_tag(&words(&["به", "رفتم"])).unwrap();
        assert_eq!(tagged[0].tag.as_deref(), Some("P"));
        assert_eq!(tagged[1].tag.as_deref(), Some("V"));
    }

    #[test]
    fn test_malformed_lexicon() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "no-tab-here").unwrap();
        let err = load_lexicon(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_missing_lexicon_fails_on_first_use() {
        let tagger = LexiconTagger::new(TaggerConfig {
            lexicon_path: Some("/nonexistent/lexicon.tsv".into()),
            fallback_tag: None,
        });
        let err = tagger.batch_tag(&words(&["x"])).unwrap_err();
        assert!(matches!(err, SarvError::ResourceLoad { .. }));
    }

    #[test]
    fn test_tagged_word_from_tuple() {
        let tw: TaggedWord = ("Hello", "NN").into();
        assert_eq!(tw.word, "Hello");
        assert_eq!(tw.tag.as_deref(), Some("NN"));
    }
}
