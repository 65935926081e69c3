//! Columnar (CoNLL-style) records fed to the parsing model.
//!
//! Each token becomes one tab-separated line:
//!
//! ```text
//! index  word  lemma  tag  tag  _
//! ```
//!
//! The tag is written twice because the record format carries separate
//! coarse and fine tag columns and only one tagger is wired in.

use crate::error::{Result, SarvError};
use crate::tagging::{Lemmatizer, TaggedWord};
use crate::UNKNOWN;
use std::fmt;

/// One token of a columnar record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    /// 1-based position in the sentence.
    pub index: usize,
    /// Word form.
    pub word: String,
    /// Lemma, or [`UNKNOWN`].
    pub lemma: String,
    /// POS tag, or [`UNKNOWN`].
    pub tag: String,
}

impl fmt::Display for RecordLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.index, self.word, self.lemma, self.tag, self.tag, UNKNOWN
        )
    }
}

/// A sentence in columnar form, one [`RecordLine`] per token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnarRecord {
    lines: Vec<RecordLine>,
}

impl ColumnarRecord {
    /// Returns the record lines in sentence order.
    pub fn lines(&self) -> &[RecordLine] {
        &self.lines
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the record has no tokens.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Checks that every word, lemma and tag fits in a single column.
    ///
    /// A tab, newline or carriage return inside a field would shift or split
    /// the line, so such records are rejected with [`SarvError::Parse`].
    pub fn validate(&self) -> Result<()> {
        for line in &self.lines {
            let fields = [("word", &line.word), ("lemma", &line.lemma), ("tag", &line.tag)];
            for (column, value) in fields {
                if value.contains(['\t', '\n', '\r']) {
                    return Err(SarvError::Parse(format!(
                        "token {} has a {} containing a column or line separator: {:?}",
                        line.index, column, value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Serializes each token to its tab-separated line.
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }

    /// Parses tab-separated lines back into a record.
    ///
    /// Lines need at least the index, word, lemma and tag columns; indices
    /// must run 1, 2, 3, ... without gaps.
    pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let mut parsed = Vec::with_capacity(lines.len());

        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 4 {
                return Err(SarvError::Parse(format!(
                    "expected at least 4 columns, got {} in {:?}",
                    fields.len(),
                    line
                )));
            }

            let index: usize = fields[0]
                .parse()
                .map_err(|_| SarvError::Parse(format!("invalid token index {:?}", fields[0])))?;
            if index != i + 1 {
                return Err(SarvError::Parse(format!(
                    "token index {} out of sequence, expected {}",
                    index,
                    i + 1
                )));
            }

            parsed.push(RecordLine {
                index,
                word: fields[1].to_string(),
                lemma: fields[2].to_string(),
                tag: fields[3].to_string(),
            });
        }

        Ok(Self { lines: parsed })
    }
}

impl fmt::Display for ColumnarRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Builds the columnar record for a tagged sentence.
///
/// Indices are dense and 1-based. A missing tag, or a missing lemmatizer,
/// leaves [`UNKNOWN`] in the corresponding column.
pub fn build_record(tokens: &[TaggedWord], lemmatizer: Option<&dyn Lemmatizer>) -> ColumnarRecord {
    let lines = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let tag = token.tag.as_deref();
            RecordLine {
                index: i + 1,
                word: token.word.clone(),
                lemma: lemmatizer
                    .map(|l| l.lemmatize(&token.word, tag))
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                tag: tag.unwrap_or(UNKNOWN).to_string(),
            }
        })
        .collect();

    ColumnarRecord { lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_lemmatizer() {
        let tokens = vec![TaggedWord::new("Hello", "NN"), TaggedWord::new("world", "NN")];
        let record = build_record(&tokens, None);

        assert_eq!(
            record.to_lines(),
            vec!["1\tHello\t_\tNN\tNN\t_", "2\tworld\t_\tNN\tNN\t_"]
        );
    }

    #[test]
    fn test_record_with_lemmatizer() {
        let lemmatizer = |word: &str, _tag: Option<&str>| {
            if word == "running" {
                "run".to_string()
            } else {
                word.to_string()
            }
        };
        let tokens: Vec<TaggedWord> = ["a", "b", "c", "d"]
            .iter()
            .map(|w| TaggedWord::new(*w, "X"))
            .chain(std::iter::once(TaggedWord::new("running", "VB")))
            .collect();

        let record = build_record(&tokens, Some(&lemmatizer));
        assert_eq!(record.lines()[4].to_string(), "5\trunning\trun\tVB\tVB\t_");
    }

    #[test]
    fn test_missing_tag_keeps_column() {
        let tokens = vec![TaggedWord::untagged("x"), TaggedWord::new("y", "N")];
        let record = build_record(&tokens, None);

        assert_eq!(record.to_lines()[0], "1\tx\t_\t_\t_\t_");
        assert_eq!(record.lines()[1].index, 2);
    }

    #[test]
    fn test_lemmatizer_receives_tag() {
        let lemmatizer = |word: &str, tag: Option<&str>| format!("{}/{}", word, tag.unwrap_or("?"));
        let tokens = vec![TaggedWord::new("w", "V"), TaggedWord::untagged("u")];
        let record = build_record(&tokens, Some(&lemmatizer));

        assert_eq!(record.lines()[0].lemma, "w/V");
        assert_eq!(record.lines()[1].lemma, "u/?");
    }

    #[test]
    fn test_empty_sentence() {
        let record = build_record(&[], None);
        assert!(record.is_empty());
        assert_eq!(record.to_string(), "");
    }

    #[test]
    fn test_display_record() {
        let record = build_record(&[TaggedWord::new("a", "N")], None);
        assert_eq!(record.to_string(), "1\ta\t_\tN\tN\t_\n");
    }

    #[test]
    fn test_validate_rejects_separators_in_fields() {
        let record = build_record(&[TaggedWord::new("a\tb", "N")], None);
        assert!(matches!(record.validate(), Err(SarvError::Parse(_))));

        let record = build_record(&[TaggedWord::new("a", "N\r")], None);
        assert!(matches!(record.validate(), Err(SarvError::Parse(_))));

        let lemmatizer = |word: &str, _tag: Option<&str>| format!("{}\n", word);
        let tokens = vec![TaggedWord::new("ok", "N"), TaggedWord::new("x", "N")];
        let record = build_record(&tokens, Some(&lemmatizer));
        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("token 1 has a lemma"));
    }

    #[test]
    fn test_validate_accepts_plain_fields() {
        let tokens = vec![TaggedWord::new("می\u{200C}رود", "V"), TaggedWord::untagged("x y")];
        assert!(build_record(&tokens, None).validate().is_ok());
    }

    #[test]
    fn test_parse_lines() {
        let record = ColumnarRecord::parse_lines(&["1\tمن\t_\tPRO\tPRO\t_", "2\tرفتم\tرفت\tV\tV\t_"]).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.lines()[1].lemma, "رفت");
        assert_eq!(record.to_lines()[1], "2\tرفتم\tرفت\tV\tV\t_");
    }

    #[test]
    fn test_parse_lines_rejects_gaps() {
        let err = ColumnarRecord::parse_lines(&["1\ta\t_\tN", "3\tb\t_\tN"]).unwrap_err();
        assert!(matches!(err, SarvError::Parse(_)));
    }

    #[test]
    fn test_parse_lines_rejects_short_lines() {
        assert!(ColumnarRecord::parse_lines(&["1\ta"]).is_err());
        assert!(ColumnarRecord::parse_lines(&["x\ta\t_\tN"]).is_err());
    }
}
