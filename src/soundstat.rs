//! SoundStat audio feature API client.
//!
//! SoundStat derives per-track audio features (tempo, key, energy, segment
//! and beat statistics, ...) from a Spotify track id. This module fetches
//! those payloads with a write-once local cache in front of the API:
//! features for a given track never change, so a cached payload is served
//! without any network call.
//!
//! Uncached ids are fetched in chunks of ten concurrent requests with a
//! short pause between chunks to keep the API happy. Rate limiting is
//! handled by respecting the `Retry-After` header on 429 responses, and
//! transient 502 errors are retried after a fixed delay; both retry paths
//! share a fixed attempt budget and every request carries a timeout, so a
//! fetch completes or errors in bounded time. A track whose fetch fails
//! is dropped from the batch with a warning; it never aborts the batch.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{config, management::FeatureCacheManager, types::TrackInfo, warning};

/// How many track fetches run concurrently per chunk.
const FETCH_CHUNK_SIZE: usize = 10;

/// Pause between fetch chunks.
const CHUNK_PAUSE: Duration = Duration::from_secs(1);

/// Per-request timeout; a stalled connection errors out instead of hanging.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry budget shared by the 429 and 502 handling of one fetch.
const MAX_FETCH_RETRIES: u32 = 5;

/// Fetches the SoundStat payload for a single track id.
///
/// Sends the API key via the `X-API-Key` header. A 429 response is handled
/// by waiting for the advertised `Retry-After` delay (up to 120 seconds;
/// longer delays produce a warning and give up on the track), a 502 is
/// retried after 10 seconds. Retries are capped at [`MAX_FETCH_RETRIES`]
/// and every request carries a [`REQUEST_TIMEOUT`], so a fetch always
/// completes or errors in bounded time. Other HTTP errors are propagated.
pub async fn get_track_info(track_id: &str) -> Result<TrackInfo, reqwest::Error> {
    let api_url = format!(
        "{uri}/track/{id}",
        uri = &config::soundstat_apiurl(),
        id = track_id
    );
    let api_key = config::soundstat_api_key();
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

    let mut attempts: u32 = 0;
    loop {
        let response = client
            .get(&api_url)
            .header("X-API-Key", &api_key)
            .send()
            .await;

        let response = match response {
            Ok(resp) => {
                if resp.status() == StatusCode::TOO_MANY_REQUESTS && attempts < MAX_FETCH_RETRIES {
                    if let Some(retry_after) = resp.headers().get("retry-after") {
                        let retry_after = retry_after
                            .to_str()
                            .unwrap_or("0")
                            .parse::<u64>()
                            .unwrap_or(0);
                        if retry_after <= 120 {
                            attempts += 1;
                            sleep(Duration::from_secs(retry_after)).await;
                            continue; // retry
                        }
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds. Try your best tomorrow again.",
                            retry_after
                        );
                    }
                }

                match resp.error_for_status() {
                    Ok(valid_response) => valid_response,
                    Err(err) => {
                        if let Some(status) = err.status() {
                            if status == StatusCode::BAD_GATEWAY && attempts < MAX_FETCH_RETRIES {
                                attempts += 1;
                                sleep(Duration::from_secs(10)).await;
                                continue; // retry
                            }
                        }
                        return Err(err); // propagate other errors
                    }
                }
            }
            Err(err) => {
                return Err(err);
            } // network, timeout or reqwest error
        };

        let track = response.json::<TrackInfo>().await?;
        return Ok(track);
    }
}

/// Resolves the SoundStat payloads for a batch of track ids, cache-first.
///
/// Cached tracks are loaded from disk; the remainder is fetched from the
/// API in chunks of [`FETCH_CHUNK_SIZE`] concurrent requests with a pause
/// between chunks. Fetch failures are isolated: the failing track is
/// dropped with a warning and the rest of the batch continues. The result
/// keeps the input id order for the tracks that survived, so downstream
/// tie-breaking stays deterministic.
pub async fn fetch_tracks(track_ids: &[String]) -> Vec<TrackInfo> {
    let mut cached: Vec<TrackInfo> = Vec::new();
    let mut to_fetch: Vec<String> = Vec::new();

    for track_id in track_ids {
        if FeatureCacheManager::is_cached(track_id) {
            match FeatureCacheManager::load(track_id).await {
                Ok(track) => cached.push(track),
                Err(_) => to_fetch.push(track_id.clone()),
            }
        } else {
            to_fetch.push(track_id.clone());
        }
    }

    let mut fetched: Vec<TrackInfo> = Vec::new();
    if !to_fetch.is_empty() {
        let pb = ProgressBar::new(to_fetch.len() as u64);
        pb.set_message("Fetching audio features...");
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg} {pos}/{len}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        for chunk in to_fetch.chunks(FETCH_CHUNK_SIZE) {
            let mut handles = Vec::new();
            for track_id in chunk {
                let track_id = track_id.clone();
                let handle =
                    tokio::spawn(async move { (track_id.clone(), get_track_info(&track_id).await) });
                handles.push(handle);
            }

            for handle in handles {
                match handle.await {
                    Ok((_, Ok(track))) => {
                        if let Err(e) = FeatureCacheManager::store(&track).await {
                            warning!("Failed to cache features for {}: {:?}", track.id, e);
                        }
                        fetched.push(track);
                    }
                    Ok((track_id, Err(e))) => {
                        warning!("Dropping track {}: feature fetch failed: {}", track_id, e);
                    }
                    Err(e) => {
                        warning!("Task join error: {}", e);
                    }
                }
                pb.inc(1);
            }

            sleep(CHUNK_PAUSE).await;
        }

        pb.finish_and_clear();
    }

    // restore input order over the union of cached and fetched tracks
    let mut all: Vec<TrackInfo> = cached;
    all.append(&mut fetched);
    let mut ordered = Vec::with_capacity(all.len());
    for track_id in track_ids {
        if let Some(pos) = all.iter().position(|t| &t.id == track_id) {
            ordered.push(all.swap_remove(pos));
        }
    }
    ordered
}
