use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{MatchError, Result},
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        compute::compare::{Compare, DefaultCompare},
        Vectorizer,
    },
};

/// Scoring algorithm applied to a vectorized pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SimilarityMethod {
    /// Cosine similarity
    /// Considers only direction, in [0, 1]
    #[default]
    Cosine,
    /// Euclidean distance
    /// Unbounded, smaller means closer
    Euclidean,
    /// Jaccard similarity
    /// Shared terms over all terms, always on a presence/absence encoding
    Jaccard,
}

impl SimilarityMethod {
    pub const ALL: [SimilarityMethod; 3] = [
        SimilarityMethod::Cosine,
        SimilarityMethod::Euclidean,
        SimilarityMethod::Jaccard,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            SimilarityMethod::Cosine => "cosine",
            SimilarityMethod::Euclidean => "euclidean",
            SimilarityMethod::Jaccard => "jaccard",
        }
    }

    /// Human readable name used in result tables
    pub fn label(&self) -> &'static str {
        match self {
            SimilarityMethod::Cosine => "Cosine Similarity",
            SimilarityMethod::Euclidean => "Euclidean Distance",
            SimilarityMethod::Jaccard => "Jaccard Similarity",
        }
    }

    /// Euclidean is a distance, the others are similarities.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, SimilarityMethod::Euclidean)
    }
}

impl FromStr for SimilarityMethod {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        SimilarityMethod::ALL
            .into_iter()
            .find(|m| s == m.tag() || s == m.label())
            .ok_or_else(|| {
                MatchError::invalid_config(format!(
                    "unknown similarity method `{s}`, choose 'cosine', 'euclidean' or 'jaccard'"
                ))
            })
    }
}

impl TryFrom<String> for SimilarityMethod {
    type Error = MatchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SimilarityMethod> for &'static str {
    fn from(method: SimilarityMethod) -> Self {
        method.tag()
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Score two aligned vectors.
///
/// Jaccard here works on the non-zero support of the given vectors, so hashed
/// vectors count colliding terms once. Use [`score_texts`] to get Jaccard on
/// the binary encoding of the raw texts.
pub fn score(vector_a: &ZeroSpVec<f64>, vector_b: &ZeroSpVec<f64>, method: SimilarityMethod) -> f64 {
    debug_assert_eq!(vector_a.len(), vector_b.len(), "vectors from different feature spaces");
    let (a, b) = (vector_a.raw_iter(), vector_b.raw_iter());
    match method {
        SimilarityMethod::Cosine => DefaultCompare::cosine_similarity(a, b),
        SimilarityMethod::Euclidean => DefaultCompare::euclidean_distance(a, b),
        SimilarityMethod::Jaccard => DefaultCompare::jaccard_index(a, b),
    }
}

/// Full pair pipeline: fit a feature space on the two texts and score it.
///
/// Jaccard ignores the vectorizer mode and re-derives a presence/absence
/// encoding with the vectorizer's analyzer.
pub fn score_texts(doc_a: &str, doc_b: &str, vectorizer: &Vectorizer, method: SimilarityMethod) -> f64 {
    let space = match method {
        SimilarityMethod::Jaccard => vectorizer.binary_pair(doc_a, doc_b),
        SimilarityMethod::Cosine | SimilarityMethod::Euclidean => vectorizer.fit_transform_pair(doc_a, doc_b),
    };
    score(&space.vectors.0, &space.vectors.1, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::VectorizationMode;

    const EPS: f64 = 1e-9;

    #[test]
    fn parses_tags_and_labels() {
        assert_eq!("cosine".parse::<SimilarityMethod>().unwrap(), SimilarityMethod::Cosine);
        assert_eq!("Euclidean Distance".parse::<SimilarityMethod>().unwrap(), SimilarityMethod::Euclidean);
        assert_eq!("Jaccard Similarity".parse::<SimilarityMethod>().unwrap(), SimilarityMethod::Jaccard);
        for bad in ["manhattan", " JACCARD ", "Cosine", "cosine similarity", "euclidean\n"] {
            assert!(
                matches!(bad.parse::<SimilarityMethod>(), Err(MatchError::InvalidConfiguration { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn direction_per_method() {
        assert!(SimilarityMethod::Cosine.higher_is_better());
        assert!(SimilarityMethod::Jaccard.higher_is_better());
        assert!(!SimilarityMethod::Euclidean.higher_is_better());
    }

    #[test]
    fn count_cosine_of_overlapping_texts() {
        let v = Vectorizer::new(VectorizationMode::RawCount);
        let s = score_texts(
            "senior machine learning engineer",
            "machine learning engineer data science",
            &v,
            SimilarityMethod::Cosine,
        );
        // 3 shared terms, norms 2 and sqrt(5)
        assert!((s - 3.0 / (2.0 * 5_f64.sqrt())).abs() < EPS);
    }

    #[test]
    fn jaccard_ignores_mode_and_counts() {
        let a = "python python python sql";
        let b = "python spark";
        for mode in VectorizationMode::ALL {
            let v = Vectorizer::new(mode);
            let s = score_texts(a, b, &v, SimilarityMethod::Jaccard);
            assert!((s - 1.0 / 3.0).abs() < EPS, "{mode}: {s}");
        }
    }

    #[test]
    fn jaccard_on_texts_is_immune_to_hash_collisions() {
        // one bucket: every term collides
        let v = Vectorizer::new(VectorizationMode::Hashed).with_hash_features(1).unwrap();
        let (a, b) = ("rust java", "rust python");
        let space = v.fit_transform_pair(a, b);
        assert_eq!(score(&space.vectors.0, &space.vectors.1, SimilarityMethod::Jaccard), 1.0);
        assert!((score_texts(a, b, &v, SimilarityMethod::Jaccard) - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn stop_words_only_scores_zero() {
        let v = Vectorizer::new(VectorizationMode::FrequencyWeighted);
        let text = "le la les de des et";
        assert_eq!(score_texts(text, text, &v, SimilarityMethod::Cosine), 0.0);
        assert_eq!(score_texts(text, text, &v, SimilarityMethod::Jaccard), 0.0);
        assert_eq!(score_texts(text, text, &v, SimilarityMethod::Euclidean), 0.0);
    }

    #[test]
    fn euclidean_on_normalised_disjoint_vectors() {
        let v = Vectorizer::new(VectorizationMode::FrequencyWeighted);
        let d = score_texts("rust", "java", &v, SimilarityMethod::Euclidean);
        assert!((d - 2_f64.sqrt()).abs() < EPS);
    }
}
