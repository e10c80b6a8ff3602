use indexmap::IndexMap;

use crate::vectorizer::token::TokenFrequency;

/// Document frequencies of the documents a feature space is fitted on.
///
/// Only the number of documents and, per token, the number of documents
/// containing it are kept. A corpus is built for one comparison and dropped
/// with it; nothing is shared between comparisons.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: u64,
    token_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from a set of documents
    pub fn from_docs<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a TokenFrequency>,
    {
        let mut corpus = Self::new();
        for doc in docs {
            corpus.add_doc(doc);
        }
        corpus
    }

    /// Add a document's distinct tokens to the corpus
    pub fn add_doc(&mut self, doc: &TokenFrequency) {
        self.add_set(&doc.token_set_ref_str());
    }

    /// Add one document given as a set of distinct tokens
    pub fn add_set<T>(&mut self, tokens: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for token in tokens {
            *self.token_counts.entry(token.as_ref().into()).or_insert(0) += 1;
        }
    }

    /// Number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `token`
    #[inline]
    pub fn get_token_count(&self, token: &str) -> u64 {
        self.token_counts.get(token).copied().unwrap_or(0)
    }

    /// All tokens in dictionary order. This order defines the feature axes.
    pub fn sorted_vocabulary(&self) -> Vec<&str> {
        let mut vocab: Vec<&str> = self.token_counts.keys().map(|k| k.as_ref()).collect();
        vocab.sort_unstable();
        vocab
    }
}
