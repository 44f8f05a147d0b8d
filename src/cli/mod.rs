//! # CLI Module
//!
//! This module provides the command-line interface layer for MeloSync, a
//! tool that scores the tracks of a Spotify playlist by how well they move
//! a listener from a current mood to a target mood. It implements all
//! user-facing CLI commands and coordinates between the scoring pipeline,
//! the external API clients and the local data managers.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Initiates Spotify OAuth authentication flow with PKCE security
//!
//! ### Recommendation Operations
//!
//! - [`recommend`] - Runs the full scoring pipeline for a playlist and a
//!   mood transition and prints the ranked result
//! - [`playlist`] - Runs the pipeline and pushes the surviving tracks into
//!   a newly created Spotify playlist
//!
//! ### Information Commands
//!
//! - [`moods`] - Lists the four moods, their model codes and whether a
//!   trained model artifact is installed for each
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Scoring Pipeline (features → prediction → transition scores)
//!     ↓
//! API Layer (Spotify, SoundStat)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! A recommendation request runs as a sequence of synchronous, stateless
//! computation steps: playlist track listing → feature fetch (cached,
//! concurrent) → feature normalization → per-mood-class probability
//! prediction → transition scoring → optional playlist creation. The only
//! shared state across requests is the read-only model cache and the
//! write-once feature cache.
//!
//! ## Error Handling Philosophy
//!
//! - **Configuration problems** (missing model artifact, missing
//!   credentials) terminate with a clear error message.
//! - **Per-track fetch failures** are logged and the track is dropped; a
//!   single bad track never aborts a batch.
//! - **Empty results** ("no candidates found") are reported as a normal
//!   outcome, distinct from pipeline failure, since the user response
//!   differs (pick another playlist vs. fix the setup and retry).

mod auth;
mod moods;
mod playlist;
mod recommend;

pub use auth::auth;
pub use moods::moods;
pub use playlist::playlist;
pub use recommend::{PipelineError, recommend, run_pipeline};
