//! # API Module
//!
//! This module provides the HTTP endpoints served by MeloSync's local web
//! server. It implements the essential endpoints for OAuth authentication
//! and health monitoring.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`callback`] - Handles OAuth callback requests from Spotify's
//!   authorization server. This endpoint completes the PKCE authentication
//!   flow by exchanging authorization codes for access tokens.
//!
//! ### Monitoring
//!
//! - [`health`] - Provides a health check endpoint that returns application
//!   status and version information.
//!
//! ## Architecture
//!
//! The module is built using the [Axum](https://docs.rs/axum) web framework.
//! Each endpoint is implemented as an async function that can be easily
//! integrated into Axum's routing system.
//!
//! ## Security Considerations
//!
//! - Uses OAuth 2.0 PKCE flow for enhanced security without exposing client secrets
//! - Implements proper state management for temporary authentication data
//! - Handles authentication failures gracefully with appropriate error responses

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
