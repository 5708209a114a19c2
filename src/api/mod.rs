//! # API Module
//!
//! HTTP endpoints served by `groovify serve`.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, liveness and version information.
//! - [`create_playlist`] - `POST /playlists`, generates a playlist from a JSON
//!   filter body (`genre`, `yearStart`, `yearEnd`, `trackCount`).
//!
//! ## Error mapping
//!
//! | Failure                              | Status |
//! |--------------------------------------|--------|
//! | no filter supplied                   | 400    |
//! | recommendation without seeds         | 400    |
//! | filters fail validation              | 422    |
//! | credentials missing                  | 500    |
//! | Spotify unreachable or returned error| 502    |
//!
//! Validation failures carry the per-field messages under `fields`.

mod health;
mod playlist;

pub use health::health;
pub use playlist::{NO_FILTERS_MESSAGE, create_playlist};
