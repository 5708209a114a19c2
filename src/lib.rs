//! Groovify playlist generator library.
//!
//! Generates Spotify playlists from genre, release-year and track-count
//! filters. The pieces, leaves first:
//!
//! - `playlist::validate_filters` - checks filters against the domain rules
//! - `spotify::AccessTokenCache` - client-credentials token with single-flight refresh
//! - `spotify::SpotifyClient` - search, track lookup and recommendations
//! - `playlist::generate_playlist` - validates, gathers candidates, dedupes,
//!   shuffles and truncates
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the playlist front end
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed errors shared by every layer
//! - `playlist` - Filter validation and playlist generation
//! - `server` - HTTP server wiring
//! - `spotify` - Spotify Web API client and token cache
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use groovify::{config::SpotifyConfig, playlist, spotify::SpotifyClient, types::PlaylistFilters};
//!
//! #[tokio::main]
//! async fn main() -> groovify::Res<()> {
//!     groovify::config::load_env().await?;
//!     let client = SpotifyClient::new(SpotifyConfig::from_env());
//!     let filters = PlaylistFilters { track_count: Some(5), ..Default::default() };
//!     let playlist = playlist::generate_playlist(&filters, &client).await?;
//!     println!("{} tracks", playlist.tracks.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod playlist;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for the binary and front-end plumbing.
///
/// Library operations return [`error::Result`]; this boxed variant is used
/// where unrelated error types (I/O, address parsing, library errors) meet.
///
/// # Example
///
/// ```
/// use groovify::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits with code 1.
///
/// Evaluates to `!`, so it can end a `match` arm that would otherwise have to
/// produce a value.
///
/// ```
/// let playlist = match result {
///     Ok(playlist) => playlist,
///     Err(e) => error!("Failed to generate playlist: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
