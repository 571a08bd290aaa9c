use std::{path::PathBuf, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use songshift::{
    cli, config, utils,
    utils::{OutputMode, Quality},
    warning,
};

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
    /// Download and tag every track of an exported playlist CSV
    Migrate(MigrateOptions),

    /// Resolve a song id, song URL or short link to its download URL
    Resolve(ResolveOptions),

    /// Show the top search match for a track
    Search(SearchOptions),

    /// List the available quality levels
    Levels,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateOptions {
    /// Playlist CSV with "Track name" and "Artist name" columns
    pub playlist: PathBuf,

    /// Quality level to request
    #[clap(long, value_parser = utils::parse_quality)]
    pub quality: Option<Quality>,

    /// Directory downloaded tracks are written to
    #[clap(long)]
    pub download_dir: Option<PathBuf>,

    /// CSV file receiving tracks that could not be resolved
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Discard downloads shorter than this many seconds
    #[clap(long)]
    pub min_duration: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// Song id, music.163.com song URL or 163cn.tv short link
    pub song: String,

    /// Quality level to request
    #[clap(default_value = "lossless", value_parser = utils::parse_quality)]
    pub level: Quality,

    /// Output mode: text, down or json
    #[clap(default_value = "down", value_parser = utils::parse_output_mode)]
    pub mode: OutputMode,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    pub title: String,
    pub artist: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Migrate(opt) => {
            let settings = cli::MigrateSettings {
                playlist: opt.playlist,
                quality: opt.quality.unwrap_or_else(config::default_quality),
                download_dir: opt.download_dir.unwrap_or_else(config::download_dir),
                unresolved_csv: opt.output.unwrap_or_else(config::unresolved_csv),
                min_duration: opt
                    .min_duration
                    .map(Duration::from_secs)
                    .unwrap_or_else(config::min_duration),
            };
            cli::migrate(settings).await
        }
        Command::Resolve(opt) => cli::resolve(opt.song, opt.level, opt.mode).await,
        Command::Search(opt) => cli::search(opt.title, opt.artist).await,
        Command::Levels => cli::levels(),
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
