//! songshift library
//!
//! Migrates an exported playlist (CSV) into tagged local audio files. Each
//! row is searched on NetEase Cloud Music, resolved to a download URL through
//! the signed EAPI endpoint, downloaded, checked for a minimum duration and
//! tagged with ID3 frames. Rows that cannot be resolved are collected into a
//! follow-up CSV.
//!
//! # Modules
//!
//! - `audio` - Downloading, duration probing and ID3 tagging of audio files
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Playlist input, unresolved output, download library, cookies
//! - `migrate` - The per-row search → resolve → download → tag pipeline
//! - `netease` - NetEase Cloud Music client and EAPI request signing
//! - `types` - Data structures and type definitions
//! - `utils` - Quality levels, output modes and small helpers

pub mod audio;
pub mod cli;
pub mod config;
pub mod management;
pub mod migrate;
pub mod netease;
pub mod types;
pub mod utils;

/// Result alias for glue code that mixes several error sources.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching: {} - {}", title, artist);
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
/// # Example
///
/// ```
/// success!("Downloaded {}", file_name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for fatal conditions such as an unreadable input CSV. The
/// process terminates with exit code 1 right after printing.
///
/// # Example
///
/// ```
/// error!("Cannot open playlist {}: {}", path.display(), e);
/// ```
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
/// Used for per-row failures that do not stop a run.
///
/// # Example
///
/// ```
/// warning!("Not found: {} - {}", title, artist);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
