use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodtunes::{cli, config, types::Mood, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chat about how you feel and get playlists for it
    Chat,

    /// Recommend playlists once
    Recommend(RecommendOptions),

    /// Print the mood detected in a sentence
    Detect(DetectOptions),

    /// Show the track currently playing
    NowPlaying,

    /// Manage the stored Spotify credential
    Token(TokenOptions),

    /// Run the local token-refresh relay
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Mood to search for (happy, sad, energetic, calm, focus)
    #[clap(long, conflicts_with = "text")]
    pub mood: Option<Mood>,

    /// Free text to detect the mood from
    pub text: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectOptions {
    #[clap(required = true)]
    pub text: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOptions {
    #[command(subcommand)]
    pub command: TokenSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TokenSubcommand {
    /// Store the credential obtained from signing in
    Set(TokenSetOpts),

    /// Show whether a credential is stored and still fresh
    Show,

    /// Sign out by removing the stored credential
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct TokenSetOpts {
    #[clap(long)]
    pub access_token: String,

    #[clap(long)]
    pub refresh_token: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtunes=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Chat => cli::chat().await,
        Command::Recommend(opt) => cli::recommend(opt.mood, opt.text).await,
        Command::Detect(opt) => cli::detect(opt.text).await,
        Command::NowPlaying => cli::now_playing().await,
        Command::Token(opt) => match opt.command {
            TokenSubcommand::Set(s) => cli::token_set(s.access_token, s.refresh_token).await,
            TokenSubcommand::Show => cli::token_show().await,
            TokenSubcommand::Clear => cli::token_clear().await,
        },
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
