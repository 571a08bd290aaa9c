//! Configuration management for songshift.
//!
//! Configuration values come from environment variables, optionally loaded
//! from a `.env` file in the local data directory. Every value has a default
//! so the tool works without any configuration; command-line flags take
//! precedence over what this module returns.
//!
//! Lookup order:
//! 1. Command-line flags (handled by the caller)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Built-in defaults

use std::{env, path::PathBuf, time::Duration};

use crate::{Res, utils::Quality};

pub const DEFAULT_DOWNLOAD_DIR: &str = "Downloads";
pub const DEFAULT_UNRESOLVED_CSV: &str = "not_found_songs.csv";
pub const DEFAULT_MIN_DURATION_SECS: u64 = 60;
pub const DEFAULT_SEARCH_URL: &str = "https://music.163.com/api/search/get";
pub const DEFAULT_API_URL: &str = "https://interface3.music.163.com";

/// User agent sent to the public search endpoint.
pub const SEARCH_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const APP_DIR: &str = "songshift";

/// Loads environment variables from `songshift/.env` in the local data directory.
///
/// Creates the directory if needed. A missing `.env` file is not an error:
/// all settings fall back to their defaults.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/songshift/.env`
/// - macOS: `~/Library/Application Support/songshift/.env`
/// - Windows: `%LOCALAPPDATA%/songshift/.env`
///
/// # Errors
///
/// Fails if the directory cannot be created or the file exists but cannot
/// be parsed.
pub async fn load_env() -> Res<()> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Returns the application directory inside the local data directory.
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Directory downloaded tracks are written to (`SONGSHIFT_DOWNLOAD_DIR`).
pub fn download_dir() -> PathBuf {
    env::var("SONGSHIFT_DOWNLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOWNLOAD_DIR))
}

/// Output CSV for unresolved rows (`SONGSHIFT_UNRESOLVED_CSV`).
pub fn unresolved_csv() -> PathBuf {
    env::var("SONGSHIFT_UNRESOLVED_CSV")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_UNRESOLVED_CSV))
}

/// Cookie file holding the user's NetEase session (`SONGSHIFT_COOKIE_FILE`).
///
/// Defaults to `cookie.txt` in the application directory.
pub fn cookie_file() -> PathBuf {
    env::var("SONGSHIFT_COOKIE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| app_dir().join("cookie.txt"))
}

/// Default quality level (`SONGSHIFT_QUALITY`), `hires` when unset or invalid.
pub fn default_quality() -> Quality {
    env::var("SONGSHIFT_QUALITY")
        .ok()
        .and_then(|q| q.parse().ok())
        .unwrap_or(Quality::Hires)
}

/// Minimum playback duration of a kept download (`SONGSHIFT_MIN_DURATION`, seconds).
pub fn min_duration() -> Duration {
    let secs = env::var("SONGSHIFT_MIN_DURATION")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_MIN_DURATION_SECS);
    Duration::from_secs(secs)
}

/// Public search endpoint (`NETEASE_SEARCH_URL`).
pub fn search_url() -> String {
    env::var("NETEASE_SEARCH_URL").unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string())
}

/// Base URL of the interface host serving `/eapi` and `/api` (`NETEASE_API_URL`).
pub fn api_url() -> String {
    env::var("NETEASE_API_URL")
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
