use melosync::mood::{MOOD_COUNT, Mood};
use melosync::recommend::{normalize_scores, rank_by_target, recommend};

// Helper function to build a probability vector that assigns `p` to the
// target mood and spreads the remainder over the other three classes
fn probs_for(target: Mood, p: f64) -> [f64; MOOD_COUNT] {
    let rest = (1.0 - p) / 3.0;
    let mut probs = [rest; MOOD_COUNT];
    probs[target.code()] = p;
    probs
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_rank_by_target_sorts_descending() {
    let target = Mood::HappyExcited;
    let probabilities = vec![
        probs_for(target, 0.2),
        probs_for(target, 0.8),
        probs_for(target, 0.5),
    ];
    let track_ids = ids(&["t1", "t2", "t3"]);

    let ranked = rank_by_target(&probabilities, &track_ids, target);

    assert_eq!(ranked[0].0, "t2");
    assert_eq!(ranked[1].0, "t3");
    assert_eq!(ranked[2].0, "t1");
    assert!(ranked[0].1 >= ranked[1].1 && ranked[1].1 >= ranked[2].1);
}

#[test]
fn test_rank_by_target_ties_keep_input_order() {
    let target = Mood::RelaxChill;
    let probabilities = vec![
        probs_for(target, 0.4),
        probs_for(target, 0.4),
        probs_for(target, 0.4),
    ];
    let track_ids = ids(&["a", "b", "c"]);

    let ranked = rank_by_target(&probabilities, &track_ids, target);

    // stable sort: equal probabilities preserve input order
    assert_eq!(ranked[0].0, "a");
    assert_eq!(ranked[1].0, "b");
    assert_eq!(ranked[2].0, "c");
}

#[test]
fn test_normalize_scores_empty() {
    assert!(normalize_scores(&[]).is_empty());
}

#[test]
fn test_normalize_scores_single_candidate_is_fifty() {
    // Scenario B: a single candidate cannot be normalized meaningfully
    let scored = normalize_scores(&[("t1".to_string(), 0.3)]);
    assert_eq!(scored.len(), 1);
    assert_close(scored[0].1, 50.0);
}

#[test]
fn test_normalize_scores_all_equal_is_fifty() {
    // Scenario C: max == min collapses every score to 50.0
    let ranked = vec![
        ("a".to_string(), 0.4),
        ("b".to_string(), 0.4),
        ("c".to_string(), 0.4),
    ];
    let scored = normalize_scores(&ranked);

    assert_eq!(scored.len(), 3);
    for (_, score) in &scored {
        assert_close(*score, 50.0);
    }
    // order preserved as input order
    assert_eq!(scored[0].0, "a");
    assert_eq!(scored[1].0, "b");
    assert_eq!(scored[2].0, "c");
}

#[test]
fn test_normalize_scores_bounds() {
    let ranked = vec![
        ("hi".to_string(), 0.9),
        ("mid1".to_string(), 0.7),
        ("mid2".to_string(), 0.3),
        ("lo".to_string(), 0.1),
    ];
    let scored = normalize_scores(&ranked);

    // max scores 100, min scores 0, everything inside [0,100]
    assert_close(scored[0].1, 100.0);
    assert_close(scored[3].1, 0.0);
    for (_, score) in &scored {
        assert!(*score >= 0.0 && *score <= 100.0);
    }
}

#[test]
fn test_recommend_scenario_a() {
    // candidates (t1, 0.9), (t2, 0.5), (t3, 0.1) → scores 100/50/0
    let target = Mood::HappyExcited;
    let probabilities = vec![
        probs_for(target, 0.9),
        probs_for(target, 0.5),
        probs_for(target, 0.1),
    ];
    let track_ids = ids(&["t1", "t2", "t3"]);

    let result = recommend(&probabilities, &track_ids, target, None, 0.0);

    assert_eq!(result.len(), 3);
    assert_eq!(result[0].track_id, "t1");
    assert_eq!(result[1].track_id, "t2");
    assert_eq!(result[2].track_id, "t3");
    assert_close(result[0].transition_score, 100.0);
    assert_close(result[1].transition_score, 50.0);
    assert_close(result[2].transition_score, 0.0);
    assert_eq!(result[0].rank, 1);
    assert_eq!(result[1].rank, 2);
    assert_eq!(result[2].rank, 3);
}

#[test]
fn test_recommend_scenario_d_top_k_after_rescale() {
    // top_k truncates the already-rescaled ranking, so t1/t2 keep the
    // scores they had over the full candidate set
    let target = Mood::HappyExcited;
    let probabilities = vec![
        probs_for(target, 0.9),
        probs_for(target, 0.5),
        probs_for(target, 0.1),
    ];
    let track_ids = ids(&["t1", "t2", "t3"]);

    let result = recommend(&probabilities, &track_ids, target, Some(2), 0.0);

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].track_id, "t1");
    assert_eq!(result[1].track_id, "t2");
    assert_close(result[0].transition_score, 100.0);
    assert_close(result[1].transition_score, 50.0);
}

#[test]
fn test_recommend_scenario_e_min_score_filter() {
    let target = Mood::HappyExcited;
    let probabilities = vec![
        probs_for(target, 0.9),
        probs_for(target, 0.5),
        probs_for(target, 0.1),
    ];
    let track_ids = ids(&["t1", "t2", "t3"]);

    let result = recommend(&probabilities, &track_ids, target, None, 60.0);

    // only t1 (score 100) survives; rank restarts at 1 after the filter
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].track_id, "t1");
    assert_eq!(result[0].rank, 1);
}

#[test]
fn test_recommend_top_k_exceeding_candidates_returns_all() {
    let target = Mood::TiredSad;
    let probabilities = vec![probs_for(target, 0.6), probs_for(target, 0.2)];
    let track_ids = ids(&["x", "y"]);

    let result = recommend(&probabilities, &track_ids, target, Some(50), 0.0);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_recommend_empty_candidates() {
    let result = recommend(&[], &[], Mood::RelaxChill, Some(10), 0.0);
    assert!(result.is_empty());
}

#[test]
fn test_recommend_is_deterministic() {
    // scoring the same request twice yields identical output
    let target = Mood::AngryFrustrated;
    let probabilities = vec![
        probs_for(target, 0.3),
        probs_for(target, 0.3),
        probs_for(target, 0.7),
        probs_for(target, 0.5),
    ];
    let track_ids = ids(&["a", "b", "c", "d"]);

    let first = recommend(&probabilities, &track_ids, target, None, 0.0);
    let second = recommend(&probabilities, &track_ids, target, None, 0.0);

    assert_eq!(first.len(), second.len());
    for (lhs, rhs) in first.iter().zip(second.iter()) {
        assert_eq!(lhs.rank, rhs.rank);
        assert_eq!(lhs.track_id, rhs.track_id);
        assert_close(lhs.transition_score, rhs.transition_score);
    }
    // the tied pair (a, b) keeps its input order in both runs
    assert_eq!(first[2].track_id, "a");
    assert_eq!(first[3].track_id, "b");
}
