use std::{
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

use crate::types::PlaylistRow;

#[derive(Debug)]
pub enum UnresolvedError {
    IoError(Error),
    CsvError(csv::Error),
}

impl From<Error> for UnresolvedError {
    fn from(err: Error) -> Self {
        UnresolvedError::IoError(err)
    }
}

impl From<csv::Error> for UnresolvedError {
    fn from(err: csv::Error) -> Self {
        UnresolvedError::CsvError(err)
    }
}

impl fmt::Display for UnresolvedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedError::IoError(e) => write!(f, "{e}"),
            UnresolvedError::CsvError(e) => write!(f, "cannot write CSV: {e}"),
        }
    }
}

impl std::error::Error for UnresolvedError {}

/// Playlist rows that could not be turned into a file.
pub struct UnresolvedManager {
    path: PathBuf,
    rows: Vec<PlaylistRow>,
}

impl UnresolvedManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rows: Vec::new(),
        }
    }

    pub fn add(&mut self, row: PlaylistRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[PlaylistRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// CSV bytes with a header row and one line per unresolved row.
    pub fn to_csv(&self) -> Result<Vec<u8>, UnresolvedError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| UnresolvedError::IoError(e.into_error()))
    }

    /// Writes the CSV file. Returns `false` without touching the disk when
    /// there is nothing to write.
    pub async fn persist(&self) -> Result<bool, UnresolvedError> {
        if self.rows.is_empty() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let data = self.to_csv()?;
        async_fs::write(&self.path, data).await?;
        Ok(true)
    }
}
