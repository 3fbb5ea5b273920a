//! Spotify playback for a function-calling assistant
//!
//! This library lets a command layer (typically an LLM function dispatcher)
//! search and control playback on a Spotify account. It performs the
//! implicit-grant login through a short-lived local callback listener, keeps
//! the resulting access token for the lifetime of the process, and exposes
//! playback operations that never issue an illegal transition such as a
//! resume while something is already playing.
//!
//! # Modules
//!
//! - `api` - HTTP handler for the OAuth redirect
//! - `commands` - Function name + arguments to coordinator operation
//! - `config` - Configuration management and environment variables
//! - `coordinator` - Authorization gate and user-facing playback operations
//! - `error` - Error taxonomy
//! - `server` - Local callback listener for one authorization attempt
//! - `spotify` - Authorization flow and Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use songpilot::{config, coordinator::Coordinator};
//!
//! #[tokio::main]
//! async fn main() -> songpilot::Result<()> {
//!     config::load_env().await?;
//!     let coordinator = Coordinator::from_settings(config::Settings::from_env()?);
//!     println!("{}", coordinator.play_track_by_name("Imagine").await);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{AuthError, Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Waiting for the browser login...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary uses this; library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, such as a browser
/// that could not be launched.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
