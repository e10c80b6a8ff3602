//! Scoring configuration.
//!
//! ```json
//! {
//!   "mode": "tfidf",
//!   "method": "cosine",
//!   "parallel": false,
//!   "hash_features": 1048576,
//!   "round_digits": 4
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults above.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{MatchError, Result},
    vectorizer::{evaluate::scoring::SimilarityMethod, hashing::DEFAULT_HASH_FEATURES, VectorizationMode, Vectorizer},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub mode: VectorizationMode,
    pub method: SimilarityMethod,
    /// Score candidates on the rayon pool
    pub parallel: bool,
    /// Buckets of the hashed feature space
    pub hash_features: usize,
    /// Decimals shown in result tables
    pub round_digits: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: VectorizationMode::FrequencyWeighted,
            method: SimilarityMethod::Cosine,
            parallel: false,
            hash_features: DEFAULT_HASH_FEATURES,
            round_digits: 4,
        }
    }
}

impl ScoringConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MatchError::invalid_config(format!("config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| MatchError::invalid_config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hash_features == 0 {
            return Err(MatchError::invalid_config("hash_features must be at least 1"));
        }
        if self.round_digits > 15 {
            return Err(MatchError::invalid_config("round_digits must be at most 15"));
        }
        Ok(())
    }

    /// The vectorizer described by this config.
    pub fn vectorizer(&self) -> Result<Vectorizer> {
        Vectorizer::new(self.mode).with_hash_features(self.hash_features)
    }
}
