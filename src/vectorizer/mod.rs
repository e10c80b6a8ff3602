pub mod analyzer;
pub mod compute;
pub mod corpus;
pub mod evaluate;
pub mod hashing;
pub mod stop_words;
pub mod tfidf;
pub mod token;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::{MatchError, Result},
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        analyzer::Analyzer,
        corpus::Corpus,
        hashing::{hashed_vec, DEFAULT_HASH_FEATURES},
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
    },
};

/// How text becomes a numeric vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum VectorizationMode {
    /// Counts weighted by smoothed inverse document frequency
    #[default]
    FrequencyWeighted,
    /// Raw occurrence counts
    RawCount,
    /// Counts in a fixed-size hashed feature space
    Hashed,
}

impl VectorizationMode {
    pub const ALL: [VectorizationMode; 3] = [
        VectorizationMode::FrequencyWeighted,
        VectorizationMode::RawCount,
        VectorizationMode::Hashed,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            VectorizationMode::FrequencyWeighted => "tfidf",
            VectorizationMode::RawCount => "count",
            VectorizationMode::Hashed => "hashing",
        }
    }
}

impl FromStr for VectorizationMode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tfidf" => Ok(VectorizationMode::FrequencyWeighted),
            "count" => Ok(VectorizationMode::RawCount),
            "hashing" => Ok(VectorizationMode::Hashed),
            _ => Err(MatchError::invalid_config(format!(
                "unknown vectorizer `{s}`, choose 'tfidf', 'count' or 'hashing'"
            ))),
        }
    }
}

impl TryFrom<String> for VectorizationMode {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<VectorizationMode> for &'static str {
    fn from(mode: VectorizationMode) -> Self {
        mode.tag()
    }
}

impl fmt::Display for VectorizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A configured text-to-vector transformer.
///
/// It holds no fitted state: every call to `fit_transform_pair` builds a
/// fresh feature space from the two texts it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vectorizer {
    mode: VectorizationMode,
    analyzer: Analyzer,
    hash_features: usize,
}

impl Vectorizer {
    pub fn new(mode: VectorizationMode) -> Self {
        Self {
            mode,
            analyzer: Analyzer::french(),
            hash_features: DEFAULT_HASH_FEATURES,
        }
    }

    /// Parse a mode tag and build the vectorizer.
    pub fn from_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(tag.parse()?))
    }

    /// Number of buckets used by the hashed mode.
    pub fn with_hash_features(mut self, n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(MatchError::invalid_config("hash_features must be at least 1"));
        }
        self.hash_features = n_features;
        Ok(self)
    }

    pub fn mode(&self) -> VectorizationMode {
        self.mode
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn hash_features(&self) -> usize {
        self.hash_features
    }

    /// Fit a feature space on exactly `doc_a` and `doc_b`, then project both.
    pub fn fit_transform_pair(&self, doc_a: &str, doc_b: &str) -> FeatureSpace {
        let freq_a = self.analyzer.term_frequency(doc_a);
        let freq_b = self.analyzer.term_frequency(doc_b);
        let space = match self.mode {
            VectorizationMode::Hashed => FeatureSpace {
                vocabulary: Vec::new(),
                vectors: (
                    hashed_vec(&freq_a, self.hash_features),
                    hashed_vec(&freq_b, self.hash_features),
                ),
            },
            VectorizationMode::RawCount => {
                let (vocabulary, _) = pair_vocabulary(&freq_a, &freq_b);
                let dims = vocab_refs(&vocabulary);
                let vectors = (
                    DefaultTFIDFEngine::tf_vec(&freq_a, &dims),
                    DefaultTFIDFEngine::tf_vec(&freq_b, &dims),
                );
                FeatureSpace { vocabulary, vectors }
            }
            VectorizationMode::FrequencyWeighted => {
                let (vocabulary, corpus) = pair_vocabulary(&freq_a, &freq_b);
                let dims = vocab_refs(&vocabulary);
                let idf = DefaultTFIDFEngine::idf_vec(&corpus, &dims);
                let vectors = (
                    DefaultTFIDFEngine::tf_idf_vec(&freq_a, &dims, &idf),
                    DefaultTFIDFEngine::tf_idf_vec(&freq_b, &dims, &idf),
                );
                FeatureSpace { vocabulary, vectors }
            }
        };
        trace!(
            mode = %self.mode,
            dims = space.dim(),
            terms_a = freq_a.token_sum(),
            terms_b = freq_b.token_sum(),
            nnz_a = space.vectors.0.nnz(),
            nnz_b = space.vectors.1.nnz(),
            "fitted pair feature space"
        );
        space
    }

    /// Presence/absence encoding of the pair, independent of the mode.
    pub fn binary_pair(&self, doc_a: &str, doc_b: &str) -> FeatureSpace {
        let freq_a = self.analyzer.term_frequency(doc_a);
        let freq_b = self.analyzer.term_frequency(doc_b);
        let (vocabulary, _) = pair_vocabulary(&freq_a, &freq_b);
        let dims = vocab_refs(&vocabulary);
        let presence = |freq: &TokenFrequency| {
            let mut vec = DefaultTFIDFEngine::tf_vec(freq, &dims);
            vec.map_values(|_| 1.0);
            vec
        };
        let vectors = (presence(&freq_a), presence(&freq_b));
        FeatureSpace { vocabulary, vectors }
    }
}

/// Factory: the vectorizer for a mode tag (`tfidf`, `count` or `hashing`).
///
/// Unknown tags fail before any text is touched.
pub fn get_vectorizer(mode: &str) -> Result<Vectorizer> {
    Vectorizer::from_tag(mode)
}

/// Project two texts into a feature space fitted on just those two texts.
pub fn fit_transform_pair(
    doc_a_text: &str,
    doc_b_text: &str,
    vectorizer: &Vectorizer,
) -> (ZeroSpVec<f64>, ZeroSpVec<f64>) {
    vectorizer.fit_transform_pair(doc_a_text, doc_b_text).vectors
}

/// The coordinate system two documents share for one comparison.
#[derive(Debug, Clone)]
pub struct FeatureSpace {
    /// Axis labels in axis order. Empty for the hashed mode.
    pub vocabulary: Vec<Box<str>>,
    pub vectors: (ZeroSpVec<f64>, ZeroSpVec<f64>),
}

impl FeatureSpace {
    /// Dimensionality shared by both vectors.
    pub fn dim(&self) -> usize {
        self.vectors.0.len()
    }
}

fn pair_vocabulary(freq_a: &TokenFrequency, freq_b: &TokenFrequency) -> (Vec<Box<str>>, Corpus) {
    let corpus = Corpus::from_docs([freq_a, freq_b]);
    let vocabulary = corpus.sorted_vocabulary().into_iter().map(Box::from).collect();
    (vocabulary, corpus)
}

fn vocab_refs(vocabulary: &[Box<str>]) -> Vec<&str> {
    vocabulary.iter().map(|t| t.as_ref()).collect()
}
