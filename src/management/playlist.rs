use std::{
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

use crate::types::PlaylistRow;

const REQUIRED_COLUMNS: [&str; 2] = ["Track name", "Artist name"];
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug)]
pub enum PlaylistError {
    IoError(Error),
    CsvError(csv::Error),
    MissingColumn(String),
}

impl From<Error> for PlaylistError {
    fn from(err: Error) -> Self {
        PlaylistError::IoError(err)
    }
}

impl From<csv::Error> for PlaylistError {
    fn from(err: csv::Error) -> Self {
        PlaylistError::CsvError(err)
    }
}

impl fmt::Display for PlaylistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistError::IoError(e) => write!(f, "{e}"),
            PlaylistError::CsvError(e) => write!(f, "malformed CSV: {e}"),
            PlaylistError::MissingColumn(c) => write!(f, "missing column \"{c}\""),
        }
    }
}

impl std::error::Error for PlaylistError {}

/// A row that failed to parse or lacks a track or artist name.
///
/// `row` holds whatever the known columns contained, decoded lossily, so the
/// row can still be written to the unresolved output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
    pub row: PlaylistRow,
}

/// Rows of an exported playlist CSV.
///
/// Short rows are accepted and missing optional columns take their defaults.
/// Rows that still fail to parse are kept in `rejected` instead of failing
/// the whole file.
pub struct PlaylistManager {
    path: PathBuf,
    rows: Vec<PlaylistRow>,
    rejected: Vec<RejectedRow>,
}

impl PlaylistManager {
    pub async fn load(path: &Path) -> Result<Self, PlaylistError> {
        let data = async_fs::read(path).await?;
        let (rows, rejected) = Self::parse(&data)?;
        Ok(Self {
            path: path.to_path_buf(),
            rows,
            rejected,
        })
    }

    pub fn parse(data: &[u8]) -> Result<(Vec<PlaylistRow>, Vec<RejectedRow>), PlaylistError> {
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(data);

        let headers = reader.byte_headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column.as_bytes()) {
                return Err(PlaylistError::MissingColumn(column.to_string()));
            }
        }

        let mut rows = Vec::new();
        let mut rejected = Vec::new();
        for (index, record) in reader.byte_records().enumerate() {
            let mut record = record?;
            // Missing trailing columns read as empty fields
            while record.len() < headers.len() {
                record.push_field(b"");
            }

            let parsed = record
                .deserialize::<PlaylistRow>(Some(&headers))
                .map_err(|e| e.to_string())
                .and_then(check_required);

            match parsed {
                Ok(row) => rows.push(row),
                Err(reason) => rejected.push(RejectedRow {
                    // +2: one for the header row, one for 1-based numbering
                    line: record
                        .position()
                        .map(|p| p.line())
                        .unwrap_or(index as u64 + 2),
                    reason,
                    row: lossy_row(&headers, &record),
                }),
            }
        }
        Ok((rows, rejected))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[PlaylistRow] {
        &self.rows
    }

    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }
}

fn check_required(row: PlaylistRow) -> Result<PlaylistRow, String> {
    if row.track_name.trim().is_empty() {
        return Err(format!("empty \"{}\"", REQUIRED_COLUMNS[0]));
    }
    if row.artist_name.trim().is_empty() {
        return Err(format!("empty \"{}\"", REQUIRED_COLUMNS[1]));
    }
    Ok(row)
}

fn lossy_row(headers: &csv::ByteRecord, record: &csv::ByteRecord) -> PlaylistRow {
    let field = |name: &str| -> String {
        headers
            .iter()
            .position(|h| h == name.as_bytes())
            .and_then(|i| record.get(i))
            .map(|v| String::from_utf8_lossy(v).into_owned())
            .unwrap_or_default()
    };

    let external_id = field("Apple - id");
    PlaylistRow {
        track_name: field("Track name"),
        artist_name: field("Artist name"),
        album: field("Album"),
        playlist_name: field("Playlist name"),
        kind: field("Type"),
        isrc: field("ISRC"),
        external_id: Some(external_id).filter(|id| !id.is_empty()),
    }
}
