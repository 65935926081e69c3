//! Text preprocessing: normalization, sentence segmentation and word tokenization.

mod normalizer;
mod segmenter;
mod tokenizer;

pub use normalizer::{Normalizer, PersianNormalizer};
pub use segmenter::{RegexSentenceSegmenter, SentenceSegmenter};
pub use tokenizer::{PersianWordTokenizer, WordTokenizer};
