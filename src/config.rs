//! Configuration for the Sarv parsing pipeline.

use crate::error::{Result, SarvError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the parsing pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text normalizer configuration.
    pub normalizer: NormalizerConfig,

    /// Word tokenizer configuration.
    pub tokenizer: TokenizerConfig,

    /// POS tagger configuration.
    pub tagger: TaggerConfig,

    /// Parsing model configuration.
    pub parser: ParserConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SarvError::resource(path, e))?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Text normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Apply Unicode canonical composition (NFC).
    /// Default: true.
    pub unicode_normalize: bool,

    /// Map Arabic yeh and kaf to their Persian forms.
    /// Default: true.
    pub persian_characters: bool,

    /// Map Latin and Arabic-Indic digits to Persian digits.
    /// Default: true.
    pub persian_digits: bool,

    /// Strip Arabic diacritics (harakat).
    /// Default: true.
    pub remove_diacritics: bool,

    /// Fix spacing around punctuation marks.
    /// Default: true.
    pub punctuation_spacing: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            unicode_normalize: true,
            persian_characters: true,
            persian_digits: true,
            remove_diacritics: true,
            punctuation_spacing: true,
        }
    }
}

/// Word tokenizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Verb list used to recognise past participles (`past#present` per line).
    /// Default: None (only auxiliaries are joined).
    pub verbs_path: Option<PathBuf>,

    /// Join multi-token verb forms with `_`.
    /// Default: true.
    pub join_verb_parts: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            verbs_path: None,
            join_verb_parts: true,
        }
    }
}

/// POS tagger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Tag lexicon (`word<TAB>tag` per line).
    /// Default: None.
    pub lexicon_path: Option<PathBuf>,

    /// Tag assigned to words the lexicon and rules do not cover.
    /// Default: `N`.
    pub fallback_tag: Option<String>,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            lexicon_path: None,
            fallback_tag: Some("N".to_string()),
        }
    }
}

/// Parsing model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Path of the pre-trained parsing model.
    /// Default: `resources/langModel.mco`.
    pub model_path: PathBuf,

    /// Install the default normalizer when none is supplied.
    /// Default: false.
    pub normalize: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(crate::DEFAULT_MODEL_PATH),
            normalize: false,
        }
    }
}
