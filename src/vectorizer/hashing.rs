use std::collections::BTreeMap;

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::{utils::math::vector::ZeroSpVec, vectorizer::token::TokenFrequency};

/// 2^20 buckets.
pub const DEFAULT_HASH_FEATURES: usize = 1 << 20;

const HASH_SEED: u64 = 0;

/// Bucket of a token in a hashed feature space of `n_features` axes.
#[inline]
pub fn bucket(token: &str, n_features: usize) -> usize {
    (xxh3_64_with_seed(token.as_bytes(), HASH_SEED) % n_features as u64) as usize
}

/// Hashed count vector of one document, L2-normalised.
///
/// Colliding tokens add their counts; there is no alternating sign, so a
/// collision can never cancel a count.
pub fn hashed_vec(freq: &TokenFrequency, n_features: usize) -> ZeroSpVec<f64> {
    debug_assert!(n_features > 0);
    let mut buckets: BTreeMap<usize, f64> = BTreeMap::new();
    for (token, count) in freq.iter() {
        *buckets.entry(bucket(token, n_features)).or_insert(0.0) += count as f64;
    }
    let mut vec = ZeroSpVec::with_capacity(buckets.len());
    for (index, value) in buckets {
        vec.raw_push(index, value);
    }
    vec.set_len(n_features);
    vec.l2_normalize();
    vec
}
