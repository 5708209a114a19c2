//! # CLI Module
//!
//! Command implementations behind the `groovify` binary. Each command builds
//! its own [`SpotifyClient`](crate::spotify::SpotifyClient) from the
//! environment, runs one operation and prints the outcome with the crate's
//! status macros. Failures end the process through [`error!`](crate::error!).
//!
//! ## Commands
//!
//! - [`generate`] - generate a playlist from genre/year/count filters
//! - [`search`] - keyword search against the track catalog
//! - [`track`] - show a single track
//! - [`serve`] - run the HTTP front end
//!
//! ## Usage
//!
//! ```bash
//! groovify generate --genre rock,indie --year-start 1990 --year-end 2005 --count 20
//! groovify generate --genre jazz --json
//! groovify search "daft punk" --limit 5
//! groovify track 4uLU6hMCjMI75M1A2tKUQC
//! groovify serve
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod generate;
mod search;
mod serve;
mod track;

pub use generate::generate;
pub use search::search;
pub use serve::serve;
pub use track::track;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.to_string());
    pb
}
