//! Text normalization applied before sentence segmentation.

use crate::config::NormalizerConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Canonicalizes raw text before it is segmented.
pub trait Normalizer: Send + Sync {
    /// Returns the normalized form of `text`.
    fn normalize(&self, text: &str) -> String;
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, text: &str) -> String {
        self(text)
    }
}

static HORIZONTAL_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{00A0}]+").unwrap());

static SPACE_BEFORE_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([.،؛:!؟?»)\]}])").unwrap());

static SPACE_AFTER_OPENING: Lazy<Regex> = Lazy::new(|| Regex::new(r"([«(\[{])[ \t]+").unwrap());

static MISSING_SPACE_AFTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([،؛:!؟?])(\p{L})").unwrap());

/// Normalizer for Persian text.
#[derive(Debug, Clone)]
pub struct PersianNormalizer {
    config: NormalizerConfig,
}

impl PersianNormalizer {
    /// Creates a new normalizer with the given configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Creates a normalizer with default configuration.
    pub fn default_config() -> Self {
        Self::new(NormalizerConfig::default())
    }

    /// Maps a single character, or drops it when it is a diacritic.
    fn map_char(&self, c: char) -> Option<char> {
        if self.config.remove_diacritics && ('\u{064B}'..='\u{0652}').contains(&c) {
            return None;
        }

        if self.config.persian_characters {
            match c {
                'ي' | 'ى' => return Some('ی'),
                'ك' => return Some('ک'),
                _ => {}
            }
        }

        if self.config.persian_digits {
            let offset = match c {
                '0'..='9' => Some(c as u32 - '0' as u32),
                '\u{0660}'..='\u{0669}' => Some(c as u32 - 0x0660),
                _ => None,
            };
            if let Some(offset) = offset {
                return char::from_u32(0x06F0 + offset);
            }
        }

        Some(c)
    }
}

impl Default for PersianNormalizer {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Normalizer for PersianNormalizer {
    fn normalize(&self, text: &str) -> String {
        let mut result: String = if self.config.unicode_normalize {
            text.nfc().filter_map(|c| self.map_char(c)).collect()
        } else {
            text.chars().filter_map(|c| self.map_char(c)).collect()
        };

        result = HORIZONTAL_SPACE.replace_all(&result, " ").into_owned();

        if self.config.punctuation_spacing {
            result = SPACE_BEFORE_CLOSING.replace_all(&result, "$1").into_owned();
            result = SPACE_AFTER_OPENING.replace_all(&result, "$1").into_owned();
            result = MISSING_SPACE_AFTER.replace_all(&result, "$1 $2").into_owned();
        }

        result.trim().to_string()
    }
}
