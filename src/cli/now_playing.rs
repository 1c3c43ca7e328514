use crate::{
    cli::{Context, SIGN_IN_HINT, spinner},
    error, info, success,
};

pub async fn now_playing() {
    let ctx = Context::from_env();

    let token = match ctx.tokens.get_valid_access_token().await {
        Ok(token) => token,
        Err(e) if e.requires_reauth() => error!("{}", SIGN_IN_HINT),
        Err(e) => error!("Failed to load credential: {}", e),
    };

    let pb = spinner("Fetching current track...");
    let result = ctx.api.currently_playing(&token).await;
    pb.finish_and_clear();

    match result {
        Ok(Some(track)) if track.is_playing => {
            success!("Now playing: {} - {}", track.name, track.artist)
        }
        Ok(Some(track)) => info!("Paused: {} - {}", track.name, track.artist),
        Ok(None) => info!("Not playing"),
        Err(e) => error!("Failed to fetch current track: {}", e),
    }
}
