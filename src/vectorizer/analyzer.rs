use super::{stop_words::StopWords, token::TokenFrequency};

/// Turns raw text into terms.
///
/// Text is lowercased, split on every character that is neither alphanumeric
/// nor `_`, and runs shorter than two characters are dropped. Stop words are
/// removed last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Analyzer {
    pub stop_words: StopWords,
}

impl Analyzer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// French stop words, the default for CV matching.
    pub fn french() -> Self {
        Self::new(StopWords::French)
    }

    /// Lowercased terms in document order.
    pub fn terms(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !is_word_char(c))
            .filter(|tok| tok.chars().nth(1).is_some())
            .filter(|tok| !self.stop_words.contains(tok))
            .map(str::to_string)
            .collect()
    }

    /// Term counts of one document.
    pub fn term_frequency(&self, text: &str) -> TokenFrequency {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&self.terms(text));
        freq
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
