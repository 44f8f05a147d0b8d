use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts a playlist id from a Spotify playlist URL or returns the input
/// unchanged when it already looks like a bare id.
///
/// Handles `https://open.spotify.com/playlist/{id}?si=...` by taking the
/// last path segment and stripping the query string.
pub fn extract_playlist_id(input: &str) -> String {
    let last_segment = input.rsplit('/').next().unwrap_or(input);
    last_segment
        .split('?')
        .next()
        .unwrap_or(last_segment)
        .to_string()
}

/// Removes duplicate track ids while preserving first-seen order.
pub fn dedup_track_ids(track_ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    track_ids.retain(|id| seen.insert(id.clone()));
}
