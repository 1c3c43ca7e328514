use crate::{
    cli::{Context, SIGN_IN_HINT, print_playlists, spinner},
    error, info, mood, success,
    types::Mood,
    warning,
};

/// Recommends playlists once, either for an explicit mood or for the mood
/// detected in the given text. Without both, the default mood applies.
pub async fn recommend(mood: Option<Mood>, text: Vec<String>) {
    let ctx = Context::from_env();

    let mood = match mood {
        Some(m) => m,
        None => {
            let detected = mood::classify(&text.join(" "));
            info!("Detected mood: {}", detected);
            detected
        }
    };

    let pb = spinner(&format!("Searching {} playlists...", mood));
    let result = ctx.recommender.fetch_playlists(mood).await;
    pb.finish_and_clear();

    match result {
        Ok(playlists) if playlists.is_empty() => {
            warning!("No playlists found for {}. Try another mood!", mood)
        }
        Ok(playlists) => {
            success!("{} playlists for {}", playlists.len(), mood);
            print_playlists(&playlists);
        }
        Err(e) if e.requires_reauth() => error!("{}", SIGN_IN_HINT),
        Err(e) => error!("Failed to fetch playlists: {}", e),
    }
}

pub async fn detect(text: Vec<String>) {
    let mood = mood::classify(&text.join(" "));
    println!("{}", mood);
}
