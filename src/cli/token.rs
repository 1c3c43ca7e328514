use crate::{
    cli::{Context, SIGN_IN_HINT},
    error, info, success, utils, warning,
};

/// Stores the credential obtained by the sign-in flow.
pub async fn token_set(access_token: String, refresh_token: String) {
    let ctx = Context::from_env();

    match ctx.tokens.login(&access_token, &refresh_token).await {
        Ok(_) => success!(
            "Credential stored in {}",
            ctx.config.store_path.display()
        ),
        Err(e) => error!("Failed to store credential: {}", e),
    }
}

pub async fn token_show() {
    let ctx = Context::from_env();

    match ctx.tokens.status().await {
        Ok(Some(credential)) => {
            info!("Issued at: {}", utils::format_millis(credential.issued_at_millis));
            if credential.is_stale() {
                warning!("Access token is stale and will be refreshed on next use");
            } else {
                success!("Access token is valid");
            }
            if credential.refresh_token.is_empty() {
                warning!("No refresh token stored");
            }
        }
        Ok(None) => warning!("{}", SIGN_IN_HINT),
        Err(e) => error!("Failed to read credential: {}", e),
    }
}

pub async fn token_clear() {
    let ctx = Context::from_env();

    match ctx.tokens.logout().await {
        Ok(()) => success!("Signed out"),
        Err(e) => error!("Failed to clear credential: {}", e),
    }
}
