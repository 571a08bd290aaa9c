//! # Playlist migration pipeline
//!
//! Processes playlist rows one at a time. Each row moves through
//!
//! ```text
//! Searching → Resolving → Downloading → Tagged
//!     └───────────┴────────────┴──→ Unresolved
//! ```
//!
//! and rows whose file already exists end as `Skipped`. The pipeline never
//! stops on a row failure: the row is recorded as unresolved and the next
//! one starts. A tagging failure is the one exception; the file is kept and
//! the row still counts as migrated.
//!
//! Network access and audio inspection sit behind the [`TrackSource`] and
//! [`AudioTagger`] traits. [`NeteaseSource`] and [`Id3Tagger`] are the
//! production implementations.

mod local;
mod netease;

pub use local::Id3Tagger;
pub use netease::NeteaseSource;

use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    config, info,
    management::LibraryManager,
    success,
    types::{PlaylistRow, SearchResult, TrackTags},
    utils::{self, Quality},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Searching,
    Resolving,
    Downloading,
    Tagged,
    Skipped,
    Unresolved,
}

impl fmt::Display for RowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RowState::Searching => "searching",
            RowState::Resolving => "resolving",
            RowState::Downloading => "downloading",
            RowState::Tagged => "tagged",
            RowState::Skipped => "skipped",
            RowState::Unresolved => "unresolved",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MigrateError {
    SearchMiss,
    SearchFailure(String),
    ResolveFailure(String),
    DownloadFailure(String),
    TooShort(Duration),
    InvalidAudio(String),
    TagFailure(String),
}

impl MigrateError {
    /// The state the row was in when this error occurred.
    pub fn stage(&self) -> RowState {
        match self {
            MigrateError::SearchMiss | MigrateError::SearchFailure(_) => RowState::Searching,
            MigrateError::ResolveFailure(_) => RowState::Resolving,
            MigrateError::DownloadFailure(_)
            | MigrateError::TooShort(_)
            | MigrateError::InvalidAudio(_) => RowState::Downloading,
            MigrateError::TagFailure(_) => RowState::Tagged,
        }
    }
}

impl fmt::Display for MigrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrateError::SearchMiss => write!(f, "no search result"),
            MigrateError::SearchFailure(e) => write!(f, "search failed: {e}"),
            MigrateError::ResolveFailure(e) => write!(f, "no download url: {e}"),
            MigrateError::DownloadFailure(e) => write!(f, "{e}"),
            MigrateError::TooShort(d) => write!(f, "too short ({}s)", d.as_secs()),
            MigrateError::InvalidAudio(e) => write!(f, "{e}"),
            MigrateError::TagFailure(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MigrateError {}

/// Finds tracks, resolves their download URL and fetches them.
#[allow(async_fn_in_trait)]
pub trait TrackSource {
    /// Top search match for a title and artist; `Ok(None)` when nothing matched.
    async fn search(&self, title: &str, artist: &str)
    -> Result<Option<SearchResult>, MigrateError>;

    async fn resolve_url(&self, track_id: u64, quality: Quality) -> Result<String, MigrateError>;

    async fn download(&self, url: &str, dest: &Path) -> Result<(), MigrateError>;
}

/// Inspects and tags downloaded files.
pub trait AudioTagger {
    fn duration(&self, path: &Path) -> Result<Duration, MigrateError>;

    fn write_tags(&self, path: &Path, tags: &TrackTags) -> Result<(), MigrateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Migrated { path: PathBuf, tagged: bool },
    Skipped(PathBuf),
}

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub migrated: Vec<PathBuf>,
    pub untagged: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub unresolved: Vec<(PlaylistRow, MigrateError)>,
}

impl MigrationReport {
    pub fn total(&self) -> usize {
        self.migrated.len() + self.untagged.len() + self.skipped.len() + self.unresolved.len()
    }
}

pub struct Migrator<S, T> {
    source: S,
    tagger: T,
    library: LibraryManager,
    quality: Quality,
    min_duration: Duration,
}

impl<S: TrackSource, T: AudioTagger> Migrator<S, T> {
    pub fn new(source: S, tagger: T, library: LibraryManager, quality: Quality) -> Self {
        Self {
            source,
            tagger,
            library,
            quality,
            min_duration: Duration::from_secs(config::DEFAULT_MIN_DURATION_SECS),
        }
    }

    pub fn with_min_duration(mut self, min_duration: Duration) -> Self {
        self.min_duration = min_duration;
        self
    }

    /// Runs every row in order and collects the outcome of each.
    pub async fn run(&self, rows: &[PlaylistRow]) -> MigrationReport {
        let mut report = MigrationReport::default();

        for (index, row) in rows.iter().enumerate() {
            info!(
                "[{}/{}] Searching: {} - {}",
                index + 1,
                rows.len(),
                row.track_name.trim(),
                row.artist_name.trim()
            );

            match self.migrate_row(row).await {
                Ok(RowOutcome::Skipped(path)) => report.skipped.push(path),
                Ok(RowOutcome::Migrated { path, tagged: true }) => report.migrated.push(path),
                Ok(RowOutcome::Migrated {
                    path,
                    tagged: false,
                }) => report.untagged.push(path),
                Err(e) => {
                    warning!(
                        "Unresolved: {} - {} ({} while {})",
                        row.track_name,
                        row.artist_name,
                        e,
                        e.stage()
                    );
                    report.unresolved.push((row.clone(), e));
                }
            }
        }

        report
    }

    pub async fn migrate_row(&self, row: &PlaylistRow) -> Result<RowOutcome, MigrateError> {
        let title = row.track_name.trim();
        let artist = row.artist_name.trim();

        let listed_path = self.library.song_path(title, artist);
        if listed_path.exists() {
            info!("Already downloaded, skipping: {} - {}", title, artist);
            return Ok(RowOutcome::Skipped(listed_path));
        }

        let found = self
            .source
            .search(title, artist)
            .await?
            .ok_or(MigrateError::SearchMiss)?;
        info!("Found: {} - {} ({})", found.name, found.artist, found.track_id);

        let path = self.library.song_path(&found.name, &found.artist);
        if path.exists() {
            info!("Already downloaded, skipping: {} - {}", found.name, found.artist);
            return Ok(RowOutcome::Skipped(path));
        }

        let url = self.source.resolve_url(found.track_id, self.quality).await?;
        if !utils::is_download_url(&url) {
            return Err(MigrateError::ResolveFailure(format!(
                "invalid download url: {url}"
            )));
        }

        self.source.download(&url, &path).await?;

        match self.tagger.duration(&path) {
            Ok(duration) if duration < self.min_duration => {
                self.discard(&path).await;
                return Err(MigrateError::TooShort(duration));
            }
            Ok(_) => {}
            Err(e) => {
                self.discard(&path).await;
                return Err(e);
            }
        }

        let tags = TrackTags {
            title: found.name.clone(),
            artist: found.artist.clone(),
            album: found
                .album
                .clone()
                .or_else(|| Some(row.album.trim().to_string()).filter(|a| !a.is_empty())),
        };

        match self.tagger.write_tags(&path, &tags) {
            Ok(()) => {
                success!("Downloaded: {}", path.display());
                Ok(RowOutcome::Migrated { path, tagged: true })
            }
            Err(e) => {
                warning!("Downloaded without tags: {} ({})", path.display(), e);
                Ok(RowOutcome::Migrated {
                    path,
                    tagged: false,
                })
            }
        }
    }

    async fn discard(&self, path: &Path) {
        if let Err(e) = self.library.remove(path).await {
            warning!("Cannot remove {}: {}", path.display(), e);
        }
    }
}
