use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use melosync::{cli, config, error, mood::Mood, types::PkceToken};
use tokio::sync::Mutex;

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
    /// Authorize with Spotify API
    Auth,

    /// Score a playlist for a mood transition
    Recommend(RecommendOptions),

    #[clap(about = "Create a playlist from a mood transition scoring")]
    Playlist(PlaylistOptions),

    /// List the mood universe and installed models
    Moods,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Spotify playlist URL or id to score
    #[clap(long)]
    pub playlist: String,

    /// Current mood (e.g. "Tired/Sad" or just "tired")
    #[clap(long)]
    pub from: Mood,

    /// Target mood (e.g. "Happy/Excited" or just "happy")
    #[clap(long)]
    pub to: Mood,

    /// Return at most this many candidates
    #[clap(long)]
    pub top_k: Option<usize>,

    /// Drop candidates scoring below this transition score (0-100)
    #[clap(long, default_value_t = 0.0)]
    pub min_score: f64,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Spotify playlist URL or id to score
    #[clap(long)]
    pub playlist: String,

    /// Current mood
    #[clap(long)]
    pub from: Mood,

    /// Target mood
    #[clap(long)]
    pub to: Mood,

    /// Drop candidates scoring below this transition score (0-100)
    #[clap(long, default_value_t = 45.0)]
    pub min_score: f64,

    /// Maximum number of tracks in the created playlist
    #[clap(long, default_value_t = 100)]
    pub max_tracks: usize,

    /// Name of the created playlist (defaults to a timestamped name)
    #[clap(long)]
    pub name: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Recommend(opt) => {
            cli::recommend(opt.playlist, opt.from, opt.to, opt.top_k, opt.min_score).await
        }
        Command::Playlist(opt) => {
            cli::playlist(
                opt.playlist,
                opt.from,
                opt.to,
                opt.min_score,
                opt.max_tracks,
                opt.name,
            )
            .await
        }
        Command::Moods => cli::moods().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
