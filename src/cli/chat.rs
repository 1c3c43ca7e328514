use std::io::Write;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    chat::{ChatSession, TurnOutcome},
    cli::{Context, SIGN_IN_HINT, print_playlists, spinner},
    config::POLL_INTERVAL,
    error, info,
    types::{ConversationMessage, Mood},
    warning,
};

#[derive(Debug, PartialEq)]
enum Input<'a> {
    Text(&'a str),
    Mood(Result<Mood, String>),
    Playing,
    Clear,
    Quit,
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some(("/mood", arg)) => Input::Mood(arg.parse()),
        _ => match line {
            "/mood" => Input::Mood(Err("usage: /mood <happy|sad|energetic|calm|focus>".to_string())),
            "/playing" => Input::Playing,
            "/clear" => Input::Clear,
            "/quit" | "/exit" => Input::Quit,
            text => Input::Text(text),
        },
    }
}

fn print_message(message: Option<&ConversationMessage>) {
    let Some(message) = message else {
        return;
    };

    match message.mood {
        Some(mood) => println!(
            "{} {} {}",
            "bot:".green().bold(),
            message.text,
            format!("[{}]", mood).as_str().dimmed()
        ),
        None => println!("{} {}", "bot:".green().bold(), message.text),
    }
}

fn print_now_playing(session: &ChatSession) {
    match session.now_playing() {
        Some(track) if track.is_playing => info!("Now playing: {} - {}", track.name, track.artist),
        Some(track) => info!("Paused: {} - {}", track.name, track.artist),
        None => info!("Not playing"),
    }
}

/// Interactive chat loop. The session owns the now-playing poll, which is
/// stopped when the loop ends.
pub async fn chat() {
    let ctx = Context::from_env();

    match ctx.tokens.status().await {
        Ok(Some(_)) => {}
        Ok(None) => error!("{}", SIGN_IN_HINT),
        Err(e) => error!("Failed to read credential: {}", e),
    }

    let mut session = ChatSession::new(ctx.recommender.clone());
    session.start_now_playing(POLL_INTERVAL);

    print_message(session.last_message());
    info!("Tell me how you feel, or use /mood <mood>, /playing, /clear, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", ">".blue().bold());
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Failed to read input: {}", e);
                break;
            }
        };

        let outcome = match parse_input(&line) {
            Input::Text("") => continue,
            Input::Quit => break,
            Input::Clear => {
                session.clear();
                print_message(session.last_message());
                continue;
            }
            Input::Playing => {
                print_now_playing(&session);
                continue;
            }
            Input::Mood(Err(e)) => {
                warning!("{}", e);
                continue;
            }
            Input::Mood(Ok(mood)) => {
                let pb = spinner(&format!("Finding {} playlists...", mood));
                let outcome = session.select_mood(mood).await;
                pb.finish_and_clear();
                outcome
            }
            Input::Text(text) => {
                let pb = spinner("Finding playlists...");
                let outcome = session.send_message(text).await;
                pb.finish_and_clear();
                outcome
            }
        };

        print_message(session.last_message());
        match outcome {
            TurnOutcome::Recommended { .. } => print_playlists(session.recommendations()),
            TurnOutcome::ReauthRequired => {
                warning!("{}", SIGN_IN_HINT);
                break;
            }
            TurnOutcome::NoResults { .. } | TurnOutcome::Failed => {}
        }
    }

    session.shutdown().await;
}
