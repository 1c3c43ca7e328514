//! # API Module
//!
//! HTTP endpoints of the local token-refresh relay.
//!
//! The chat core never talks to the Spotify accounts service directly: a
//! confidential client secret has no place in a user facing client. Instead
//! it calls this relay, which holds the client credentials and performs the
//! OAuth `refresh_token` grant on its behalf.
//!
//! ## Endpoints
//!
//! - [`refresh_token`] - `GET /refresh_token?refresh_token=…` answers
//!   `{ "access_token": …, "refresh_token"?: …, "expires_in"?: … }`.
//!   A missing parameter is a `400`, an upstream failure a `502`.
//! - [`health`] - `GET /health` answers service name and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use moodtunes::{api::RelayState, server::relay_router};
//!
//! let app = relay_router(RelayState::new(token_url, client_id, client_secret));
//! ```

mod health;
mod refresh;

pub use health::health;
pub use refresh::RefreshQuery;
pub use refresh::RelayState;
pub use refresh::refresh_token;
