//! Word tokenization.

use crate::config::TokenizerConfig;
use crate::error::{Result, SarvError};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Splits one sentence into word tokens.
pub trait WordTokenizer: Send + Sync {
    /// Returns the tokens of `sentence`, in order.
    ///
    /// Fails with [`SarvError::ResourceLoad`] when backing data is missing.
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>>;
}

impl<F> WordTokenizer for F
where
    F: Fn(&str) -> Result<Vec<String>> + Send + Sync,
{
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>> {
        self(sentence)
    }
}

/// Number runs and punctuation that become tokens of their own.
static DETACHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\d+(?:[.٫/:]\d+)*|[؟!?:.،؛«»\[\](){}"])"#).unwrap());

/// Future-tense auxiliaries that attach to the following verb.
static BEFORE_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "خواهم", "خواهی", "خواهد", "خواهیم", "خواهید", "خواهند",
        "نخواهم", "نخواهی", "نخواهد", "نخواهیم", "نخواهید", "نخواهند",
    ]
    .into_iter()
    .collect()
});

/// Auxiliaries that attach to a preceding past participle.
static AFTER_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ام", "ای", "است", "ایم", "اید", "اند",
        "بودم", "بودی", "بود", "بودیم", "بودید", "بودند",
        "باشم", "باشی", "باشد", "باشیم", "باشید", "باشند",
        "شدم", "شدی", "شد", "شدیم", "شدید", "شدند",
        "شوم", "شوی", "شود", "شویم", "شوید", "شوند",
        "شده",
    ]
    .into_iter()
    .collect()
});

/// Word tokenizer for Persian text.
///
/// Punctuation and number runs are detached into their own tokens, then the
/// sentence is split on whitespace. Zero-width non-joiners and other
/// in-word marks such as `-` or `'` stay inside their word. Multi-part verb
/// forms are joined with `_` when `join_verb_parts` is set.
#[derive(Debug)]
pub struct PersianWordTokenizer {
    config: TokenizerConfig,
    participles: OnceCell<HashSet<String>>,
}

impl PersianWordTokenizer {
    /// Creates a new tokenizer with the given configuration.
    ///
    /// The verb list is read on first use, not here.
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            config,
            participles: OnceCell::new(),
        }
    }

    /// Creates a tokenizer with default configuration.
    pub fn default_config() -> Self {
        Self::new(TokenizerConfig::default())
    }

    /// Detaches punctuation and numbers, then splits `sentence` on whitespace.
    pub fn split_words(sentence: &str) -> Vec<String> {
        DETACHED
            .replace_all(sentence, " ${1} ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn participles(&self) -> Result<&HashSet<String>> {
        self.participles.get_or_try_init(|| match &self.config.verbs_path {
            Some(path) => load_participles(path),
            None => Ok(HashSet::new()),
        })
    }

    /// Joins auxiliaries onto the verb they belong to.
    pub fn join_verb_parts(&self, tokens: Vec<String>) -> Result<Vec<String>> {
        let participles = self.participles()?;
        let mut result: Vec<String> = Vec::with_capacity(tokens.len());

        for token in tokens.into_iter().rev() {
            let attaches = match result.last() {
                Some(next) => {
                    BEFORE_VERBS.contains(token.as_str())
                        || (participles.contains(&token) && starts_with_after_verb(next))
                }
                None => false,
            };

            if attaches {
                if let Some(next) = result.last_mut() {
                    *next = format!("{}_{}", token, next);
                    continue;
                }
            }
            result.push(token);
        }

        result.reverse();
        Ok(result)
    }
}

impl Default for PersianWordTokenizer {
    fn default() -> Self {
        Self::default_config()
    }
}

impl WordTokenizer for PersianWordTokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>> {
        let tokens = Self::split_words(sentence);
        if self.config.join_verb_parts {
            self.join_verb_parts(tokens)
        } else {
            Ok(tokens)
        }
    }
}

fn starts_with_after_verb(token: &str) -> bool {
    let head = token.split('_').next().unwrap_or(token);
    AFTER_VERBS.contains(head)
}

/// Reads `past#present` lines and derives past participles (`past` + `ه`),
/// including their negated forms.
fn load_participles(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| SarvError::resource(path, e))?;

    let mut participles = HashSet::new();
    for line in content.lines() {
        let past = line.split('#').next().unwrap_or("").trim();
        if past.is_empty() {
            continue;
        }
        participles.insert(format!("{}ه", past));
        participles.insert(format!("ن{}ه", past));
    }

    log::info!("Loaded {} verb participles from {}", participles.len(), path.display());
    Ok(participles)
}
