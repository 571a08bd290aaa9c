use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One row of the exported playlist CSV.
///
/// Column names follow the export format; only the track and artist columns
/// are required. The same shape is written back for unresolved rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRow {
    #[serde(rename = "Track name")]
    pub track_name: String,
    #[serde(rename = "Artist name")]
    pub artist_name: String,
    #[serde(rename = "Album", default)]
    pub album: String,
    #[serde(rename = "Playlist name", default)]
    pub playlist_name: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "ISRC", default)]
    pub isrc: String,
    #[serde(rename = "Apple - id", default)]
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub track_id: u64,
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTrack {
    pub track_id: u64,
    pub quality_level: String,
    pub download_url: String,
    pub size: u64,
    pub name: String,
    pub cover_url: String,
    pub album_name: String,
    pub artist_names: String,
    pub lyrics: Option<String>,
    pub translated_lyrics: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
}

// --- search endpoint ---

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub code: Option<i64>,
    pub result: Option<SearchSongs>,
}

impl SearchResponse {
    /// The API's top result, if any.
    pub fn first_match(self) -> Option<SearchResult> {
        let song = self.result?.songs?.into_iter().next()?;
        Some(SearchResult {
            track_id: song.id,
            artist: song
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            album: song.album.map(|a| a.name).filter(|n| !n.is_empty()),
            name: song.name,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSongs {
    pub songs: Option<Vec<SearchSong>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSong {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<NamedEntity>,
    pub album: Option<NamedEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntity {
    #[serde(default)]
    pub name: String,
}

// --- song url (eapi) ---

#[derive(Debug, Clone, Serialize)]
pub struct EapiHeader {
    pub os: String,
    pub appver: String,
    pub osver: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SongUrlPayload {
    pub ids: Vec<String>,
    pub level: String,
    #[serde(rename = "encodeType")]
    pub encode_type: String,
    /// JSON text of an [`EapiHeader`], embedded as a string.
    pub header: String,
    #[serde(rename = "immerseType", skip_serializing_if = "Option::is_none")]
    pub immerse_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongUrlResponse {
    pub code: Option<i64>,
    #[serde(default)]
    pub data: Vec<SongUrl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongUrl {
    pub id: u64,
    pub url: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub level: Option<String>,
}

// --- song detail ---

#[derive(Debug, Clone, Deserialize)]
pub struct SongDetailResponse {
    pub code: Option<i64>,
    #[serde(default)]
    pub songs: Vec<SongDetail>,
}

impl SongDetailResponse {
    /// Artist names: each song's artists joined with `/`, songs joined with `, `.
    pub fn artist_names(&self) -> String {
        self.songs
            .iter()
            .filter(|s| !s.ar.is_empty())
            .map(|s| {
                s.ar.iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongDetail {
    pub name: String,
    #[serde(default)]
    pub ar: Vec<NamedEntity>,
    #[serde(default)]
    pub al: DetailAlbum,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "picUrl", default)]
    pub pic_url: Option<String>,
}

// --- lyrics ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LyricResponse {
    pub lrc: Option<LyricBody>,
    pub tlyric: Option<LyricBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LyricBody {
    pub lyric: Option<String>,
}

/// Payload printed by `resolve` in json mode.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTrackJson {
    pub status: u16,
    pub name: String,
    pub pic: String,
    pub ar_name: String,
    pub al_name: String,
    pub level: String,
    pub size: String,
    pub url: String,
    pub lyric: String,
    pub tlyric: String,
}

// --- tables ---

#[derive(Tabled)]
pub struct QualityTableRow {
    pub level: String,
    pub label: String,
    pub membership: String,
}

#[derive(Tabled)]
pub struct SearchTableRow {
    pub id: u64,
    pub name: String,
    pub artist: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct UnresolvedTableRow {
    pub track: String,
    pub artist: String,
    pub reason: String,
}
