//! # CLI Module
//!
//! User-facing commands of songshift. Each command loads what it needs
//! (configuration, cookies, playlist), calls into the library modules and
//! reports through the `info!` / `success!` / `warning!` / `error!` macros.
//!
//! ## Commands
//!
//! - [`migrate`] - Runs the whole playlist migration and writes unresolved rows
//! - [`resolve`] - Resolves one song id, song URL or short link (text, down or json output)
//! - [`search`] - Shows the top search match for a title and artist
//! - [`levels`] - Lists the available quality levels
//!
//! ## Usage
//!
//! ```bash
//! songshift migrate playlist.csv --quality lossless
//! songshift resolve https://music.163.com/song?id=1901371647 hires json
//! songshift search "Blue" "Yung Kai"
//! songshift levels
//! ```
//!
//! Only an unreadable input CSV ends a migration early; every other failure
//! is reported per row.

mod levels;
mod migrate;
mod resolve;
mod search;

pub use levels::levels;
pub use migrate::MigrateSettings;
pub use migrate::migrate;
pub use resolve::resolve;
pub use search::search;

use crate::{
    config,
    management::CookieManager,
    netease::{EapiConfig, NeteaseClient},
    warning,
};

/// Cookie carrying the logged-in session.
const SESSION_COOKIE: &str = "MUSIC_U";

async fn netease_client() -> NeteaseClient {
    let path = config::cookie_file();
    let cookies = match CookieManager::load(&path).await {
        Ok(cookies) => {
            if cookies.get(SESSION_COOKIE).is_none() {
                warning!(
                    "No {} cookie in {}. Higher quality levels need a logged-in account.",
                    SESSION_COOKIE,
                    path.display()
                );
            }
            cookies
        }
        Err(e) => {
            warning!(
                "No session cookies loaded from {}: {}. Higher quality levels need a logged-in account.",
                path.display(),
                e
            );
            CookieManager::new()
        }
    };

    NeteaseClient::new(EapiConfig::default(), cookies)
}
