use reqwest::Client;
use tracing::debug;

use crate::{
    error::{Error, Result},
    spotify::{SpotifyApi, check_status},
    types::RefreshResponse,
};

impl SpotifyApi {
    /// Asks the local refresh relay for a new access token.
    ///
    /// Sends `GET {refresh_url}?refresh_token=…`. The body must carry a
    /// non-empty `access_token`; anything else is an [`Error::Provider`].
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<RefreshResponse> {
        debug!(url = %self.refresh_url, "refreshing access token");

        let response = self
            .http
            .get(&self.refresh_url)
            .query(&[("refresh_token", refresh_token)])
            .send()
            .await?;
        let response = check_status(response)?;

        parse_refresh_response(response).await
    }
}

/// Performs the OAuth `refresh_token` grant against the Spotify accounts
/// service using confidential client credentials.
///
/// This is the upstream half of the refresh relay. The client secret never
/// leaves the relay process.
pub async fn refresh_grant(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<RefreshResponse> {
    let response = http
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Provider(format!(
            "token endpoint answered with status {}",
            status
        )));
    }

    parse_refresh_response(response).await
}

async fn parse_refresh_response(response: reqwest::Response) -> Result<RefreshResponse> {
    let body = response
        .json::<RefreshResponse>()
        .await
        .map_err(|e| Error::Provider(format!("malformed token response: {}", e)))?;

    if body.access_token.trim().is_empty() {
        return Err(Error::Provider(
            "token response carried an empty access token".to_string(),
        ));
    }

    Ok(body)
}
