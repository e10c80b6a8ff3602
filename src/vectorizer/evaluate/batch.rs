use std::fmt::{self, Debug, Display};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::ScoringConfig,
    document::Document,
    error::{MatchError, Result},
    loader::RawDocument,
    vectorizer::{
        evaluate::scoring::{score_texts, SimilarityMethod},
        VectorizationMode, Vectorizer,
    },
};

/// Score or per-document failure of one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOutcome {
    Score(f64),
    Failed(MatchError),
}

/// One scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub id: String,
    pub outcome: ScoreOutcome,
    pub mode: VectorizationMode,
    pub method: SimilarityMethod,
}

impl ScoreResult {
    pub fn score(&self) -> Option<f64> {
        match self.outcome {
            ScoreOutcome::Score(s) => Some(s),
            ScoreOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&MatchError> {
        match &self.outcome {
            ScoreOutcome::Score(_) => None,
            ScoreOutcome::Failed(e) => Some(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.score().is_some()
    }
}

/// Results of a batch, in candidate order
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResults {
    pub list: Vec<ScoreResult>,
}

impl ScoreResults {
    pub fn new(list: Vec<ScoreResult>) -> Self {
        ScoreResults { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreResult> {
        self.list.iter()
    }

    /// Scores in candidate order, `None` for failed entries
    pub fn scores(&self) -> Vec<Option<f64>> {
        self.list.iter().map(ScoreResult::score).collect()
    }

    /// Best match first, following each entry's method direction.
    /// Failed entries go last, keeping their relative order.
    pub fn sort_by_relevance(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| match (a.score(), b.score()) {
            (Some(sa), Some(sb)) => {
                if a.method.higher_is_better() {
                    sb.total_cmp(&sa)
                } else {
                    sa.total_cmp(&sb)
                }
            }
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        self
    }

    /// Table view with scores rounded to `digits` decimals
    pub fn table(&self, digits: usize) -> ResultTable<'_> {
        ResultTable { results: self, digits }
    }
}

impl IntoIterator for ScoreResults {
    type Item = ScoreResult;
    type IntoIter = std::vec::IntoIter<ScoreResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl Debug for ScoreResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "ScoreResults [")?;
            for entry in &self.list {
                match &entry.outcome {
                    ScoreOutcome::Score(s) => writeln!(f, "    {:?}: {:.6} ({}, {})", entry.id, s, entry.mode, entry.method)?,
                    ScoreOutcome::Failed(e) => writeln!(f, "    {:?}: error: {} ({}, {})", entry.id, e, entry.mode, entry.method)?,
                }
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl Display for ScoreResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.table(4), f)
    }
}

/// Tabular rendering of `ScoreResults`
pub struct ResultTable<'a> {
    results: &'a ScoreResults,
    digits: usize,
}

impl Display for ResultTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id_width = self.results.iter().map(|r| r.id.chars().count()).max().unwrap_or(0).max(2);
        writeln!(f, "{:<id_width$}  {:>12}  {:<10}  {}", "CV", "score", "vectorizer", "method")?;
        for entry in self.results.iter() {
            let score = match &entry.outcome {
                ScoreOutcome::Score(s) => format!("{:.*}", self.digits, s),
                ScoreOutcome::Failed(_) => "-".to_string(),
            };
            write!(f, "{:<id_width$}  {:>12}  {:<10}  {}", entry.id, score, entry.mode, entry.method.label())?;
            if let Some(err) = entry.error() {
                write!(f, "  error: {err}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Scores every candidate against one reference text.
///
/// Each candidate gets its own feature space, so entries never influence one
/// another and may run in parallel. Output order always follows input order.
#[derive(Debug, Clone)]
pub struct BatchScorer {
    vectorizer: Vectorizer,
    method: SimilarityMethod,
    parallel: bool,
}

impl BatchScorer {
    pub fn new(vectorizer: Vectorizer, method: SimilarityMethod) -> Self {
        Self { vectorizer, method, parallel: false }
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.vectorizer()?, config.method).with_parallel(config.parallel))
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    pub fn method(&self) -> SimilarityMethod {
        self.method
    }

    /// Score already decoded candidates.
    pub fn score_documents(&self, reference_text: &str, candidates: &[Document]) -> ScoreResults {
        self.run(candidates, |doc| (doc.id().to_string(), Ok(self.score_one(doc.text(), reference_text))))
    }

    /// Decode then score raw candidates. A candidate that cannot be decoded
    /// gets a failed entry; the others are scored normally.
    pub fn score_raw(&self, reference_text: &str, candidates: &[RawDocument]) -> ScoreResults {
        self.run(candidates, |raw| {
            let outcome = raw.decode().map(|doc| self.score_one(doc.text(), reference_text));
            (raw.id.clone(), outcome)
        })
    }

    /// Score candidates decoded upstream. `Err` entries are carried over as
    /// failed results.
    pub fn score_decoded(&self, reference_text: &str, candidates: &[(String, Result<Document>)]) -> ScoreResults {
        self.run(candidates, |(id, doc)| {
            let outcome = match doc {
                Ok(doc) => Ok(self.score_one(doc.text(), reference_text)),
                Err(err) => Err(err.clone()),
            };
            (id.clone(), outcome)
        })
    }

    #[inline]
    fn score_one(&self, candidate_text: &str, reference_text: &str) -> f64 {
        score_texts(candidate_text, reference_text, &self.vectorizer, self.method)
    }

    fn run<T, F>(&self, candidates: &[T], eval: F) -> ScoreResults
    where
        T: Sync,
        F: Fn(&T) -> (String, Result<f64>) + Sync,
    {
        let entry = |candidate: &T| {
            let (id, outcome) = eval(candidate);
            self.to_result(id, outcome)
        };
        let list = if self.parallel {
            candidates.par_iter().map(entry).collect()
        } else {
            candidates.iter().map(entry).collect()
        };
        ScoreResults::new(list)
    }

    fn to_result(&self, id: String, outcome: Result<f64>) -> ScoreResult {
        let mode = self.vectorizer.mode();
        let outcome = match outcome {
            Ok(score) => {
                debug!(candidate = %id, %mode, method = %self.method, score, "scored candidate");
                ScoreOutcome::Score(score)
            }
            Err(err) => {
                warn!(candidate = %id, error = %err, "candidate skipped");
                ScoreOutcome::Failed(err)
            }
        };
        ScoreResult { id, outcome, mode, method: self.method }
    }
}

/// Score `candidate_documents` against `reference_text`.
///
/// Mode and method are given by tag and checked before any scoring starts.
pub fn score_batch(
    reference_text: &str,
    candidate_documents: &[Document],
    mode: &str,
    method: &str,
) -> Result<ScoreResults> {
    let vectorizer = Vectorizer::from_tag(mode)?;
    let method: SimilarityMethod = method.parse()?;
    Ok(BatchScorer::new(vectorizer, method).score_documents(reference_text, candidate_documents))
}

/// `score_batch` for candidates that still have to be decoded.
pub fn score_raw_batch(
    reference_text: &str,
    raw_candidates: &[RawDocument],
    mode: &str,
    method: &str,
) -> Result<ScoreResults> {
    let vectorizer = Vectorizer::from_tag(mode)?;
    let method: SimilarityMethod = method.parse()?;
    Ok(BatchScorer::new(vectorizer, method).score_raw(reference_text, raw_candidates))
}
