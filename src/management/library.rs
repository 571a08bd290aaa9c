use std::{
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use crate::utils;

/// The download directory.
///
/// A track is identified only by its derived file name; if that path exists
/// the track counts as downloaded.
#[derive(Debug, Clone)]
pub struct LibraryManager {
    root: PathBuf,
}

impl LibraryManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn song_path(&self, title: &str, artist: &str) -> PathBuf {
        self.root.join(utils::song_file_name(title, artist))
    }

    pub fn has_song(&self, title: &str, artist: &str) -> bool {
        self.song_path(title, artist).exists()
    }

    pub async fn ensure_dir(&self) -> Result<(), Error> {
        async_fs::create_dir_all(&self.root).await
    }

    /// Removes a file, treating an already missing file as success.
    pub async fn remove(&self, path: &Path) -> Result<(), Error> {
        match async_fs::remove_file(path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
