use cv_matcher::{
    score_batch, score_raw_batch, score_texts, BatchScorer, Document, MatchError, RawDocument, ScoreOutcome,
    ScoringConfig, SimilarityMethod, VectorizationMode, Vectorizer,
};

const JOB: &str = "machine learning engineer data science";
const CV: &str = "senior machine learning engineer";

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn shared_terms_give_partial_cosine() {
    let vectorizer = Vectorizer::new(VectorizationMode::RawCount);
    let score = score_texts(CV, JOB, &vectorizer, SimilarityMethod::Cosine);
    assert!(score > 0.0 && score < 1.0, "score = {score}");
    // three shared terms, norms sqrt(4) and sqrt(5)
    assert!(approx(score, 3.0 / (2.0 * 5f64.sqrt())));
}

#[test]
fn jaccard_counts_distinct_terms() {
    for mode in VectorizationMode::ALL {
        let vectorizer = Vectorizer::new(mode);
        let score = score_texts(CV, JOB, &vectorizer, SimilarityMethod::Jaccard);
        assert!(approx(score, 0.5), "{mode}: {score}");
    }
}

#[test]
fn identical_texts_are_a_perfect_match() {
    let text = "Développeur Rust confirmé, tokio, serde et PostgreSQL.";
    for mode in VectorizationMode::ALL {
        let vectorizer = Vectorizer::new(mode);
        assert!(approx(score_texts(text, text, &vectorizer, SimilarityMethod::Cosine), 1.0), "{mode}");
        assert!(approx(score_texts(text, text, &vectorizer, SimilarityMethod::Euclidean), 0.0), "{mode}");
        assert!(approx(score_texts(text, text, &vectorizer, SimilarityMethod::Jaccard), 1.0), "{mode}");
    }
}

#[test]
fn unreadable_candidate_is_isolated() {
    let raws = vec![
        RawDocument::new("alice.txt", CV),
        RawDocument::new("broken.bin", vec![0x00_u8, 0xff, 0x10, 0x02]),
        RawDocument::new("bob.txt", "comptable paie gestion"),
    ];
    let results = score_raw_batch(JOB, &raws, "count", "cosine").unwrap();

    assert_eq!(results.len(), 3);
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["alice.txt", "broken.bin", "bob.txt"]);
    assert!(results.list[0].score().unwrap() > 0.0);
    assert!(matches!(
        results.list[1].outcome,
        ScoreOutcome::Failed(MatchError::DecodeFailure { .. })
    ));
    assert_eq!(results.list[2].score(), Some(0.0));
}

#[test]
fn pdf_candidates_are_reported_not_scored() {
    let raws = vec![
        RawDocument::new("cv.pdf", b"%PDF-1.7 ...".to_vec()),
        RawDocument::new("cv.txt", CV),
    ];
    let results = score_raw_batch(JOB, &raws, "tfidf", "cosine").unwrap();
    assert!(results.list[0].error().is_some());
    assert!(results.list[1].is_ok());
}

#[test]
fn unknown_tags_fail_before_scoring() {
    let docs = vec![Document::new("a", CV)];
    let err = score_batch(JOB, &docs, "bogus", "cosine").unwrap_err();
    match err {
        MatchError::InvalidConfiguration { message } => {
            for tag in ["tfidf", "count", "hashing"] {
                assert!(message.contains(tag), "{message}");
            }
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(matches!(
        score_batch(JOB, &docs, "tfidf", "manhattan"),
        Err(MatchError::InvalidConfiguration { .. })
    ));
}

#[test]
fn config_file_drives_the_scorer() {
    let config = ScoringConfig::from_json_str(r#"{"mode": "hashing", "method": "euclidean", "hash_features": 4096}"#)
        .unwrap();
    let scorer = BatchScorer::from_config(&config).unwrap();
    assert_eq!(scorer.vectorizer().hash_features(), 4096);
    assert_eq!(scorer.method(), SimilarityMethod::Euclidean);

    let results = scorer.score_documents(JOB, &[Document::new("same", JOB), Document::new("other", CV)]);
    assert!(approx(results.list[0].score().unwrap(), 0.0));
    assert!(results.list[1].score().unwrap() > 0.0);
}
