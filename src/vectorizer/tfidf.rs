use crate::{utils::math::vector::ZeroSpVec, vectorizer::{corpus::Corpus, token::TokenFrequency}};

/// Term weighting used by the vocabulary-based modes.
///
/// `token_dim_sample` is the ordered vocabulary of the feature space; element
/// `i` of every produced vector belongs to `token_dim_sample[i]`.
pub trait TFIDFEngine {
    /// IDF vector
    /// # Arguments
    /// * `corpus` - the documents the feature space is fitted on
    /// * `token_dim_sample` - feature axes
    /// # Returns
    /// * `Vec<f64>` - one weight per axis
    fn idf_vec(corpus: &Corpus, token_dim_sample: &[&str]) -> Vec<f64>;

    /// TF vector of one document
    fn tf_vec(freq: &TokenFrequency, token_dim_sample: &[&str]) -> ZeroSpVec<f64>;

    /// TF-IDF vector of one document, L2-normalised
    fn tf_idf_vec(freq: &TokenFrequency, token_dim_sample: &[&str], idf_vec: &[f64]) -> ZeroSpVec<f64> {
        let mut tf_idf = ZeroSpVec::with_capacity(freq.token_num());
        for (token, idf) in token_dim_sample.iter().zip(idf_vec) {
            tf_idf.push(freq.token_count(token) as f64 * idf);
        }
        tf_idf.l2_normalize();
        tf_idf
    }
}

/// Default engine
/// TF is the raw occurrence count.
/// IDF is smoothed as if one extra document contained every term:
/// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus, token_dim_sample: &[&str]) -> Vec<f64> {
        let doc_num = corpus.get_doc_num() as f64;
        token_dim_sample
            .iter()
            .map(|token| {
                let doc_freq = corpus.get_token_count(token) as f64;
                ((1.0 + doc_num) / (1.0 + doc_freq)).ln() + 1.0
            })
            .collect()
    }

    fn tf_vec(freq: &TokenFrequency, token_dim_sample: &[&str]) -> ZeroSpVec<f64> {
        let mut tf_vec = ZeroSpVec::with_capacity(freq.token_num());
        for token in token_dim_sample {
            tf_vec.push(freq.token_count(token) as f64);
        }
        tf_vec
    }
}
