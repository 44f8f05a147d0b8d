use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config, error,
    management::TokenManager,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        GetUserPlaylistsResponse, PlaylistItemsResponse,
    },
    utils, warning,
};

/// Per-request timeout toward the Spotify API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry budget for transient 502 responses while paging.
const MAX_PAGE_RETRIES: u32 = 5;

fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder().timeout(REQUEST_TIMEOUT).build()
}

/// Retrieves all track ids of a playlist, following pagination.
///
/// Fetches the playlist's items page by page (100 per request, the API
/// maximum) and follows the `next` link until the playlist is exhausted.
/// Entries without a track id (local files, removed tracks) are skipped
/// and duplicate ids are collapsed, preserving first-seen order.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the playlist to list
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<String>)` - Deduplicated track ids in playlist order
/// - `Err(reqwest::Error)` - Network error, API error, or HTTP error
///
/// # Partial Results
///
/// If fetching a follow-up page fails, the pages collected so far are
/// returned with a warning rather than discarding the whole listing.
pub async fn get_playlist_track_ids(
    playlist_id: &str,
    token: &str,
) -> Result<Vec<String>, reqwest::Error> {
    let client = http_client()?;
    let mut api_url = format!(
        "{uri}/playlists/{id}/tracks?limit=100",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let mut track_ids: Vec<String> = Vec::new();
    let mut first_page = true;
    let mut retries: u32 = 0;

    loop {
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY && retries < MAX_PAGE_RETRIES {
                            retries += 1;
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    if first_page {
                        return Err(err);
                    }
                    // keep what we have instead of discarding the listing
                    warning!("Failed to fetch next playlist page: {}", err);
                    break;
                }
            },
            Err(err) => {
                if first_page {
                    return Err(err);
                }
                warning!("Failed to fetch next playlist page: {}", err);
                break;
            }
        };

        let page = response.json::<PlaylistItemsResponse>().await?;
        for item in page.items {
            if let Some(track) = item.track {
                if let Some(id) = track.id {
                    track_ids.push(id);
                }
            }
        }

        first_page = false;
        match page.next {
            Some(next_url) => api_url = next_url,
            None => break,
        }
    }

    utils::dedup_track_ids(&mut track_ids);
    Ok(track_ids)
}

/// Checks whether the authenticated user already owns a playlist with the
/// given name.
pub async fn exists(name: &str) -> Result<bool, reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run melosync auth\n Error: {}",
                e
            );
        }
    };

    let api_url = format!(
        "{uri}/me/playlists?limit=50",
        uri = &config::spotify_apiurl()
    );

    let client = http_client()?;
    let token = token_mgr.get_valid_token().await;
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let playlists = response.json::<GetUserPlaylistsResponse>().await?;
    Ok(playlists.items.iter().any(|p| p.name == name))
}

/// Creates a new private playlist for the configured user.
pub async fn create(name: String) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run melosync auth\n Error: {}",
                e
            );
        }
    };

    let api_url = format!(
        "{uri}/users/{user}/playlists",
        uri = &config::spotify_apiurl(),
        user = &config::spotify_user()
    );

    let request = CreatePlaylistRequest {
        name,
        description: "Mood transition playlist created by melosync.".to_string(),
        public: false,
        collaborative: false,
    };

    let client = http_client()?;
    let token = token_mgr.get_valid_token().await;
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    let playlist = response.json::<CreatePlaylistResponse>().await?;
    Ok(playlist)
}

/// Adds track URIs to a playlist.
///
/// The caller is responsible for chunking: the Spotify API accepts at most
/// 100 URIs per request.
pub async fn add_tracks(
    playlist_id: String,
    uris: Vec<String>,
) -> Result<AddTracksResponse, reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run melosync auth\n Error: {}",
                e
            );
        }
    };

    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let request = AddTracksRequest { uris };

    let client = http_client()?;
    let token = token_mgr.get_valid_token().await;
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    let snapshot = response.json::<AddTracksResponse>().await?;
    Ok(snapshot)
}
