//! # CLI Module
//!
//! Command implementations behind the `podsampler` binary.
//!
//! - [`serve`] - runs the HTTP server (login flow and recommendation API)
//! - [`recommend`] - prints a single best-of-genre recommendation without
//!   going through Spotify
//!
//! Both commands read their configuration through
//! [`crate::config::Settings::from_env`] and terminate with an error message
//! when it is incomplete.

mod recommend;
mod serve;

pub use recommend::format_seconds;
pub use recommend::recommend;
pub use recommend::table_rows;
pub use serve::serve;
