use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use groovify::{
    cli, config, error,
    types::{GenreFilter, PlaylistFilters},
    utils, warning,
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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a playlist from genre, year and track-count filters
    Generate(GenerateOptions),

    /// Search the track catalog
    Search(SearchOptions),

    /// Show a single track
    Track(TrackOptions),

    /// Serve the playlist HTTP API
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// Genre or comma-separated list of genres
    #[clap(long)]
    genre: Option<String>,

    /// Minimum release year
    #[clap(long, allow_negative_numbers = true)]
    year_start: Option<i32>,

    /// Maximum release year
    #[clap(long, allow_negative_numbers = true)]
    year_end: Option<i32>,

    /// Requested track count
    #[clap(long, allow_negative_numbers = true)]
    count: Option<i32>,

    /// Print the playlist as JSON
    #[clap(long)]
    json: bool,
}

impl GenerateOptions {
    fn filters(&self) -> PlaylistFilters {
        PlaylistFilters {
            genre: self
                .genre
                .as_deref()
                .and_then(utils::parse_genres)
                .map(GenreFilter::Many),
            year_start: self.year_start,
            year_end: self.year_end,
            track_count: self.count,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    query: String,

    /// Number of tracks to return
    #[clap(long, default_value_t = 10)]
    limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Spotify track id
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_new(config::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate(opt) => {
            let filters = opt.filters();
            if filters.is_empty() {
                warning!("No filters given, generating from the default track count");
            }
            cli::generate(filters, opt.json).await
        }
        Command::Search(opt) => cli::search(opt.query, opt.limit).await,
        Command::Track(opt) => cli::track(opt.id).await,
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
