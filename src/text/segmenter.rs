//! Sentence segmentation.
//!
//! The default segmenter is regex based: a run of sentence terminators
//! (`.`, `!`, `?`, `؟`, `⸮`) followed by whitespace closes a sentence, and so
//! does a blank line. Decimal points and abbreviations glued to the next
//! character are left alone.

use once_cell::sync::Lazy;
use regex::Regex;

/// Splits normalized text into sentences, in reading order.
pub trait SentenceSegmenter: Send + Sync {
    /// Returns the sentences of `text`.
    fn segment(&self, text: &str) -> Vec<String>;
}

impl<F> SentenceSegmenter for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn segment(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<end>[!.?⸮؟]+)[ \t\r\n]+|\n[ \t\r]*\n").unwrap());

/// Regex-based sentence segmenter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSentenceSegmenter;

impl RegexSentenceSegmenter {
    /// Creates a new segmenter.
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSegmenter for RegexSentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for caps in BOUNDARY.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            // Terminators stay with their sentence; a blank line is dropped.
            let end = caps.name("end").map_or(whole.start(), |m| m.end());
            push_trimmed(&mut sentences, &text[start..end]);
            start = whole.end();
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentences() {
        let sentences = RegexSentenceSegmenter.segment("Hello world. This is a test.");
        assert_eq!(sentences, vec!["Hello world.", "This is a test."]);
    }

    #[test]
    fn test_persian_question_mark() {
        let sentences = RegexSentenceSegmenter.segment("جدا کردن ساده است؟ تقریبا!");
        assert_eq!(sentences, vec!["جدا کردن ساده است؟", "تقریبا!"]);
    }

    #[test]
    fn test_terminator_runs() {
        let sentences = RegexSentenceSegmenter.segment("واقعا؟! بله...   باشد");
        assert_eq!(sentences, vec!["واقعا؟!", "بله...", "باشد"]);
    }

    #[test]
    fn test_floating_point() {
        let sentences = RegexSentenceSegmenter.segment("The value was 3.14. Then it changed.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.14"));
    }

    #[test]
    fn test_blank_line_boundary() {
        let sentences = RegexSentenceSegmenter.segment("عنوان\n\nمتن اصلی.");
        assert_eq!(sentences, vec!["عنوان", "متن اصلی."]);
    }

    #[test]
    fn test_empty_input() {
        assert!(RegexSentenceSegmenter.segment("").is_empty());
        assert!(RegexSentenceSegmenter.segment("   \n ").is_empty());
    }

    #[test]
    fn test_no_ending_punctuation() {
        let sentences = RegexSentenceSegmenter.segment("No ending punctuation here");
        assert_eq!(sentences, vec!["No ending punctuation here"]);
    }
}
