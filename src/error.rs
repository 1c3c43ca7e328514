use thiserror::Error;

/// Errors surfaced by the recommendation core.
///
/// An empty search result is not an error: callers receive an empty list and
/// render it as a friendly "nothing found" reply.
#[derive(Debug, Error)]
pub enum Error {
    /// No credential is stored. The user has to sign in again.
    #[error("not signed in to Spotify")]
    Unauthenticated,

    /// Spotify rejected the access token. The stored credential has already
    /// been evicted when this reaches the caller.
    #[error("Spotify rejected the access token")]
    Unauthorized,

    /// Non-success status or a response body that does not match the contract.
    #[error("provider error: {0}")]
    Provider(String),

    /// Transport level failure talking to the provider or the refresh relay.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("credential store error: {0}")]
    Store(String),
}

impl Error {
    /// True when the only way forward is sending the user back to sign-in.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
