use tabled::Table;

use crate::{
    error, features, info,
    management::{ModelManager, TokenManager},
    model::{ModelError, MoodClassifier},
    mood::Mood,
    recommend as scorer, soundstat, spotify, success,
    types::{Recommendation, RecommendationTableRow},
    utils,
};

/// Failure modes of a recommendation request.
///
/// An empty candidate set is not an error: the pipeline returns an empty
/// recommendation list for it, and callers present that as "no candidates
/// found" rather than a failure.
#[derive(Debug)]
pub enum PipelineError {
    /// Missing model artifact or credentials. Fatal, never retried.
    Config(String),
    /// Malformed request data, rejected before any model invocation.
    InvalidInput(String),
    /// The playlist source could not be reached at all.
    Upstream(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Config(msg) => write!(f, "configuration error: {}", msg),
            PipelineError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            PipelineError::Upstream(msg) => write!(f, "upstream error: {}", msg),
        }
    }
}

impl From<ModelError> for PipelineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ShapeMismatch { .. } => PipelineError::InvalidInput(err.to_string()),
            other => PipelineError::Config(other.to_string()),
        }
    }
}

/// Runs the full scoring pipeline for one mood transition request.
///
/// Lists the playlist's tracks, resolves their audio features (cache
/// first, then SoundStat), normalizes them into the fixed feature schema,
/// predicts per-class transition probabilities with the model trained for
/// `current_mood` and scores the candidates toward `target_mood`.
///
/// Tracks whose features cannot be fetched are dropped along the way; if
/// nothing survives, the result is an empty list, not an error. Scoring
/// the same request twice against the same model yields identical output.
pub async fn run_pipeline(
    playlist: &str,
    current_mood: Mood,
    target_mood: Mood,
    top_k: Option<usize>,
    min_score: f64,
) -> Result<Vec<Recommendation>, PipelineError> {
    let mut token_mgr = TokenManager::load().await.map_err(|e| {
        PipelineError::Config(format!(
            "failed to load token, please run melosync auth ({})",
            e
        ))
    })?;

    let playlist_id = utils::extract_playlist_id(playlist);
    if playlist_id.is_empty() {
        return Err(PipelineError::InvalidInput(
            "empty playlist URL or id".to_string(),
        ));
    }

    let token = token_mgr.get_valid_token().await;
    let track_ids = spotify::playlist::get_playlist_track_ids(&playlist_id, &token)
        .await
        .map_err(|e| PipelineError::Upstream(format!("failed to list playlist tracks: {}", e)))?;

    if track_ids.is_empty() {
        return Err(PipelineError::InvalidInput(format!(
            "playlist {} contains no tracks",
            playlist_id
        )));
    }

    info!("Found {} tracks in playlist {}", track_ids.len(), playlist_id);

    // load the model up front so a missing artifact fails before any fetch
    let mut model_mgr = ModelManager::new();
    let model = model_mgr.load(current_mood).await?;

    let tracks = soundstat::fetch_tracks(&track_ids).await;
    if tracks.len() < track_ids.len() {
        info!(
            "{} of {} tracks had complete feature data",
            tracks.len(),
            track_ids.len()
        );
    }

    let matrix = features::build_feature_matrix(&tracks);
    if matrix.is_empty() {
        // total fetch failure is "no candidates", not a hard failure
        return Ok(Vec::new());
    }

    let probabilities = model.predict_proba(&matrix)?;

    Ok(scorer::recommend(
        &probabilities,
        &matrix.track_ids,
        target_mood,
        top_k,
        min_score,
    ))
}

/// Scores a playlist for a mood transition and prints the ranked result.
pub async fn recommend(
    playlist: String,
    current_mood: Mood,
    target_mood: Mood,
    top_k: Option<usize>,
    min_score: f64,
) {
    info!(
        "Scoring transition {} → {}",
        current_mood, target_mood
    );

    let recommendations =
        match run_pipeline(&playlist, current_mood, target_mood, top_k, min_score).await {
            Ok(recommendations) => recommendations,
            Err(e) => error!("Recommendation failed: {}", e),
        };

    if recommendations.is_empty() {
        info!("No candidates found. Try another playlist or a lower minimum score.");
        return;
    }

    let table_rows: Vec<RecommendationTableRow> = recommendations
        .iter()
        .map(|r| RecommendationTableRow {
            rank: r.rank,
            track_id: r.track_id.clone(),
            score: format!("{:.2}", r.transition_score),
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);

    success!("Scored {} candidates.", recommendations.len());
}
