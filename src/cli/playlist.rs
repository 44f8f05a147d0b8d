use chrono::Utc;

use crate::{
    cli::run_pipeline, error, info, mood::Mood, spotify, success, types::Recommendation, warning,
};

/// Creates a Spotify playlist from the tracks that survive a mood
/// transition scoring request.
///
/// Runs the scoring pipeline, truncates the surviving candidates to
/// `max_tracks` and pushes them into a newly created private playlist.
/// When a playlist with the target name already exists, nothing is
/// created. An empty candidate set leaves no playlist behind and is
/// reported as such, distinct from a pipeline failure.
pub async fn playlist(
    source_playlist: String,
    current_mood: Mood,
    target_mood: Mood,
    min_score: f64,
    max_tracks: usize,
    name: Option<String>,
) {
    let playlist_name = name.unwrap_or_else(|| {
        format!(
            "Mood Transition: {} → {} - {}",
            current_mood,
            target_mood,
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        )
    });

    let playlist_exists = match spotify::playlist::exists(&playlist_name).await {
        Ok(exists) => exists,
        Err(e) => {
            warning!("Failed to check if playlist exists: {}", e);
            false
        }
    };

    if playlist_exists {
        info!("Playlist {} already exists", playlist_name);
        return;
    }

    let recommendations: Vec<Recommendation> =
        match run_pipeline(&source_playlist, current_mood, target_mood, None, min_score).await {
            Ok(recommendations) => recommendations,
            Err(e) => error!("Recommendation failed: {}", e),
        };

    if recommendations.is_empty() {
        info!("No candidates found, playlist was not created.");
        return;
    }

    info!(
        "{} tracks scored at least {:.1}, keeping at most {}",
        recommendations.len(),
        min_score,
        max_tracks
    );

    let uris: Vec<String> = recommendations
        .iter()
        .take(max_tracks)
        .map(|r| format!("spotify:track:{}", r.track_id))
        .collect();

    let playlist_id = match spotify::playlist::create(playlist_name.clone()).await {
        Ok(resp) => {
            success!("Playlist {} created.", playlist_name);
            resp.id
        }
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    // the API accepts at most 100 track URIs per request
    for chunk in uris.chunks(100) {
        match spotify::playlist::add_tracks(playlist_id.clone(), chunk.to_vec()).await {
            Ok(_) => {}
            Err(e) => warning!("Failed to add tracks to playlist: {}", e),
        };
    }

    success!(
        "Added {} tracks: https://open.spotify.com/playlist/{}",
        uris.len(),
        playlist_id
    );
}
