//! This crate scores candidate CVs against a job description.
//! Both texts are projected into a feature space fitted on just that pair,
//! then compared with cosine similarity, euclidean distance or jaccard similarity.
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod utils;
pub mod vectorizer;

/// Vectorizer
/// A configured text-to-vector transformer built from a `VectorizationMode`.
/// It holds no fitted state; each pair of texts gets a fresh feature space.
///
/// `get_vectorizer` is the tag-based factory (`tfidf`, `count`, `hashing`).
/// `fit_transform_pair` projects two texts into their shared feature space.
pub use vectorizer::{fit_transform_pair, get_vectorizer, FeatureSpace, VectorizationMode, Vectorizer};

/// Similarity Method
/// The scoring algorithms applied to a vectorized pair:
/// - Cosine: angle between the vectors, in [0, 1]
/// - Euclidean: distance between the vectors, smaller is closer
/// - Jaccard: shared terms over all terms, on a presence/absence encoding
///
/// `score_texts` is the full pipeline and always computes Jaccard from the two texts.
/// `score` works on vectors already built; its Jaccard uses their non-zero entries,
/// which differs from `score_texts` when hashed terms collide.
pub use vectorizer::evaluate::scoring::{score, score_texts, SimilarityMethod};

/// Batch scoring
/// - `BatchScorer`: scores many candidates against one reference, optionally in parallel
/// - `ScoreResults`: the entries in candidate order, with sorting and table rendering
/// - `ScoreResult`: one entry, holding either a score or the candidate's error
pub use vectorizer::evaluate::batch::{
    score_batch, score_raw_batch, BatchScorer, ScoreOutcome, ScoreResult, ScoreResults,
};

/// Token Frequency structure
/// Counts token occurrences within one document.
pub use vectorizer::token::TokenFrequency;

pub use config::ScoringConfig;
pub use document::Document;
pub use error::MatchError;
pub use loader::{decode_text, RawDocument};
