//! Transition scoring: ranking tracks by how likely they move a listener
//! toward a target mood.
//!
//! Takes the per-track probability vectors produced by a mood classifier,
//! extracts the probability mass assigned to the target mood, ranks the
//! candidates, rescales probabilities onto a 0-100 transition score and
//! applies the caller's top-K and minimum-score cuts. Rescaling happens
//! over the full candidate set before truncation, so a top-K prefix keeps
//! the scores it had in the full ranking.

use crate::{
    mood::{MOOD_COUNT, Mood},
    types::Recommendation,
};

/// Pairs each track with its probability of transitioning to `target`,
/// sorted descending by probability.
///
/// `probabilities` and `track_ids` must be row-aligned. The sort is stable:
/// tracks with equal probability keep their input order, which makes the
/// whole pipeline deterministic for a fixed input.
pub fn rank_by_target(
    probabilities: &[[f64; MOOD_COUNT]],
    track_ids: &[String],
    target: Mood,
) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = track_ids
        .iter()
        .zip(probabilities.iter())
        .map(|(id, probs)| (id.clone(), probs[target.code()]))
        .collect();

    // stable sort, descending by probability
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// Rescales transition probabilities onto a 0-100 score over the candidate
/// set.
///
/// `score = (p - min) / (max - min) * 100`, so the most likely candidate
/// scores 100 and the least likely 0. Degenerate sets cannot be normalized
/// meaningfully: a single candidate, or a set where every probability is
/// equal, scores 50.0 for every entry. An empty input yields an empty
/// output. Order is preserved.
pub fn normalize_scores(ranked: &[(String, f64)]) -> Vec<(String, f64)> {
    if ranked.is_empty() {
        return Vec::new();
    }
    if ranked.len() == 1 {
        return vec![(ranked[0].0.clone(), 50.0)];
    }

    let min = ranked.iter().map(|(_, p)| *p).fold(f64::INFINITY, f64::min);
    let max = ranked
        .iter()
        .map(|(_, p)| *p)
        .fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return ranked.iter().map(|(id, _)| (id.clone(), 50.0)).collect();
    }

    ranked
        .iter()
        .map(|(id, p)| (id.clone(), (p - min) / (max - min) * 100.0))
        .collect()
}

/// Runs the full transition scorer over row-aligned probability vectors.
///
/// Ranks by target-mood probability, rescales to 0-100 over the full
/// candidate set, then truncates to at most `top_k` entries (everything
/// when `top_k` is `None` or exceeds the candidate count) and drops
/// entries scoring below `min_score`. Returns 1-based ranked records.
///
/// An empty candidate set is a valid empty result, not an error.
pub fn recommend(
    probabilities: &[[f64; MOOD_COUNT]],
    track_ids: &[String],
    target: Mood,
    top_k: Option<usize>,
    min_score: f64,
) -> Vec<Recommendation> {
    let ranked = rank_by_target(probabilities, track_ids, target);
    let mut scored = normalize_scores(&ranked);

    if let Some(k) = top_k {
        scored.truncate(k);
    }

    scored
        .into_iter()
        .filter(|(_, score)| *score >= min_score)
        .enumerate()
        .map(|(i, (track_id, transition_score))| Recommendation {
            rank: i + 1,
            track_id,
            transition_score,
        })
        .collect()
}
