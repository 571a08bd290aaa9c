mod cookie;
mod library;
mod playlist;
mod unresolved;

pub use cookie::CookieError;
pub use cookie::CookieManager;
pub use library::LibraryManager;
pub use playlist::PlaylistError;
pub use playlist::PlaylistManager;
pub use playlist::RejectedRow;
pub use unresolved::UnresolvedError;
pub use unresolved::UnresolvedManager;
