//! Podcast Sampler Library
//!
//! This library provides the building blocks of a podcast recommendation backend.
//! It looks up the shows a user follows on Spotify, cross-references them with the
//! Listen Notes catalog, and hands back one recommended podcast together with a
//! randomly placed preview clip from one of its episodes.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the recommendation server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error type shared by clients, orchestrator and handlers
//! - `listennotes` - Listen Notes catalog client
//! - `management` - Result caches and session handling
//! - `recommend` - Recommendation orchestration
//! - `server` - Router construction and server startup
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Random selection, preview offsets and PKCE helpers
//!
//! # Example
//!
//! ```
//! use podsampler::{config::Settings, server};
//!
//! #[tokio::main]
//! async fn main() -> podsampler::error::Result<()> {
//!     let _ = podsampler::config::load_env().await;
//!     server::start_api_server(Settings::from_env()?).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod listennotes;
pub mod management;
pub mod recommend;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints a progress or status line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Recommending '{}'", podcast.title);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green check mark, for completed steps such
/// as a bound listener or a finished login.
///
/// ```
/// success!("Signed in {}", principal.id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a red `!` and exits the process with code 1.
///
/// Only the binary uses it, for configuration it cannot start without.
/// Handlers return [`crate::error::PodcastError`] instead.
///
/// ```
/// error!("Cannot read configuration. Err: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line prefixed with a yellow `!`. The process keeps running.
///
/// ```
/// warning!("Token exchange failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
