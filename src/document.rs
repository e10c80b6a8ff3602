use serde::{Deserialize, Serialize};

use crate::{
    error::{MatchError, Result},
    vectorizer::analyzer::Analyzer,
};

/// A decoded document: an identifier (usually the file name) and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fails with `EmptyDocument` when no term survives the analyzer.
    pub fn ensure_terms(&self, analyzer: &Analyzer) -> Result<()> {
        if analyzer.terms(&self.text).is_empty() {
            return Err(MatchError::EmptyDocument { id: self.id.clone() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_terms_rejects_stop_word_only_text() {
        let analyzer = Analyzer::french();
        assert!(Document::new("a", "Data engineer").ensure_terms(&analyzer).is_ok());
        assert_eq!(
            Document::new("b", "  le la de ").ensure_terms(&analyzer),
            Err(MatchError::EmptyDocument { id: "b".into() })
        );
    }
}
