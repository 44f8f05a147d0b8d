//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by
//! MeloSync: the OAuth 2.0 PKCE authentication flow, paginated retrieval
//! of a playlist's tracks, and playlist creation for scored results. It
//! handles all HTTP communication, token refresh, error handling and rate
//! limiting toward Spotify.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Scoring Pipeline)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Playlist Reads (track listing, pagination)
//!     └── Playlist Writes (create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication Strategy
//!
//! The module implements OAuth 2.0 with PKCE (Proof Key for Code
//! Exchange): a cryptographically random code verifier is generated, its
//! SHA256 challenge is sent with the authorization request, a temporary
//! local HTTP server receives the callback, and the authorization code is
//! exchanged for an access token that is persisted for future use. No
//! client secret is ever stored or transmitted.
//!
//! ## Error Handling
//!
//! - 429 Too Many Requests responses are handled by honoring the
//!   `Retry-After` header.
//! - Transient 502 Bad Gateway errors are retried after a fixed delay.
//! - Token expiration is handled transparently with a proactive refresh
//!   (4-minute buffer) through the token manager.
//! - Other HTTP errors are propagated to the caller as `reqwest::Error`.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}/tracks` - playlist track listing with pagination
//! - `GET /me/playlists` - duplicate checking before playlist creation
//! - `POST /users/{user_id}/playlists` - create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - add tracks in batches of 100
//! - `POST /api/token` - token exchange and refresh operations

pub mod auth;
pub mod playlist;
