use cv_matcher::{
    fit_transform_pair, get_vectorizer, score, score_batch, score_texts, BatchScorer, Document, MatchError,
    SimilarityMethod, VectorizationMode, Vectorizer,
};

const TEXTS: [&str; 6] = [
    "Ingénieur logiciel Rust, expérience en systèmes distribués et Kafka",
    "Data scientist python pandas scikit-learn, apprentissage automatique",
    "Comptable confirmé, paie, fiscalité et gestion des clients",
    "Développeur backend Rust tokio axum PostgreSQL",
    "",
    "le la les de des et",
];

#[test]
fn factory_accepts_exactly_three_tags() {
    for tag in ["tfidf", "count", "hashing"] {
        let vectorizer = get_vectorizer(tag).unwrap();
        assert_eq!(vectorizer.mode().tag(), tag);
    }
    for tag in ["bogus", "", "TF-IDF", "binary", "TFIDF", " count ", "Hashing\n"] {
        assert!(matches!(get_vectorizer(tag), Err(MatchError::InvalidConfiguration { .. })), "{tag:?}");
    }
}

#[test]
fn scores_stay_in_range() {
    for mode in VectorizationMode::ALL {
        let vectorizer = Vectorizer::new(mode);
        for a in TEXTS {
            for b in TEXTS {
                let cos = score_texts(a, b, &vectorizer, SimilarityMethod::Cosine);
                let jac = score_texts(a, b, &vectorizer, SimilarityMethod::Jaccard);
                let dist = score_texts(a, b, &vectorizer, SimilarityMethod::Euclidean);
                assert!((0.0..=1.0).contains(&cos), "{mode} cosine {cos}");
                assert!((0.0..=1.0).contains(&jac), "{mode} jaccard {jac}");
                assert!(dist >= 0.0 && dist.is_finite(), "{mode} euclidean {dist}");
            }
        }
    }
}

#[test]
fn stop_word_only_text_scores_zero_cosine() {
    for mode in VectorizationMode::ALL {
        let vectorizer = Vectorizer::new(mode);
        assert_eq!(score_texts(TEXTS[5], TEXTS[0], &vectorizer, SimilarityMethod::Cosine), 0.0);
        assert_eq!(score_texts("", "", &vectorizer, SimilarityMethod::Cosine), 0.0);
        assert_eq!(score_texts("", "", &vectorizer, SimilarityMethod::Jaccard), 0.0);
    }
}

#[test]
fn cosine_euclidean_and_jaccard_are_symmetric() {
    for mode in VectorizationMode::ALL {
        let vectorizer = Vectorizer::new(mode);
        for method in SimilarityMethod::ALL {
            let ab = score_texts(TEXTS[0], TEXTS[3], &vectorizer, method);
            let ba = score_texts(TEXTS[3], TEXTS[0], &vectorizer, method);
            assert!((ab - ba).abs() < 1e-12, "{mode} {method}");
        }
    }
}

#[test]
fn scoring_is_deterministic() {
    for mode in VectorizationMode::ALL {
        let vectorizer = Vectorizer::new(mode);
        let (a1, b1) = fit_transform_pair(TEXTS[0], TEXTS[3], &vectorizer);
        let (a2, b2) = fit_transform_pair(TEXTS[0], TEXTS[3], &vectorizer);
        for method in SimilarityMethod::ALL {
            assert_eq!(score(&a1, &b1, method), score(&a2, &b2, method));
        }
    }
}

#[test]
fn each_candidate_is_scored_independently() {
    let reference = TEXTS[3];
    let docs: Vec<Document> = TEXTS.iter().enumerate().map(|(i, t)| Document::new(format!("cv{i}"), *t)).collect();
    let forward = score_batch(reference, &docs, "tfidf", "cosine").unwrap();

    let reversed: Vec<Document> = docs.iter().rev().cloned().collect();
    let backward = score_batch(reference, &reversed, "tfidf", "cosine").unwrap();

    for entry in forward.iter() {
        let twin = backward.iter().find(|r| r.id == entry.id).unwrap();
        assert_eq!(entry.score(), twin.score(), "{}", entry.id);
    }
    let rev_ids: Vec<&str> = backward.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<&str> = reversed.iter().map(Document::id).collect();
    assert_eq!(rev_ids, expected);
}

#[test]
fn parallel_batches_keep_input_order() {
    let docs: Vec<Document> = (0..64)
        .map(|i| Document::new(format!("cv{i:02}"), TEXTS[i % TEXTS.len()]))
        .collect();
    for mode in VectorizationMode::ALL {
        let scorer = BatchScorer::new(Vectorizer::new(mode), SimilarityMethod::Cosine);
        let sequential = scorer.score_documents(TEXTS[0], &docs);
        let parallel = scorer.clone().with_parallel(true).score_documents(TEXTS[0], &docs);
        assert_eq!(sequential, parallel, "{mode}");
        assert_eq!(parallel.list[63].id, "cv63");
    }
}
