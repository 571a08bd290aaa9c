use crate::{
    types::{LyricResponse, ResolvedTrack, ResolvedTrackJson},
    utils::{self, OutputMode, Quality},
    warning,
};

use super::{NeteaseClient, NeteaseError, link};

/// Prefix of the single line printed in `down` mode.
pub const DOWNLOAD_URL_MARKER: &str = "Download URL: ";

const NO_LYRIC: &str = "No lyrics";
const NO_TRANSLATED_LYRIC: &str = "No translated lyrics";

impl NeteaseClient {
    /// Resolves a song id, song URL or short link into a downloadable track.
    ///
    /// Fails when the service returns no URL for the requested level. Lyrics
    /// are optional: a failed lyric call only produces a warning.
    pub async fn resolve(
        &self,
        input: &str,
        quality: Quality,
    ) -> Result<ResolvedTrack, NeteaseError> {
        let id = link::resolve_link(input).await?;
        let song = self.song_url(&id, quality).await?;
        let url = song.url.clone().ok_or_else(|| {
            NeteaseError::Unavailable(format!("no {} url for song {}", quality, song.id))
        })?;

        let detail = self.song_detail(song.id).await?;
        let artist_names = detail.artist_names();
        let first = detail
            .songs
            .into_iter()
            .next()
            .ok_or_else(|| NeteaseError::Unavailable(format!("no details for song {}", song.id)))?;

        let lyric = match self.lyric(song.id).await {
            Ok(lyric) => lyric,
            Err(e) => {
                warning!("Cannot load lyrics for {}: {}", song.id, e);
                LyricResponse::default()
            }
        };

        Ok(ResolvedTrack {
            track_id: song.id,
            quality_level: song.level.unwrap_or_else(|| quality.to_string()),
            download_url: url,
            size: song.size,
            name: first.name,
            cover_url: first.al.pic_url.unwrap_or_default(),
            album_name: first.al.name,
            artist_names,
            lyrics: lyric.lrc.and_then(|l| l.lyric),
            translated_lyrics: lyric.tlyric.and_then(|l| l.lyric),
        })
    }
}

pub fn to_json(track: &ResolvedTrack) -> ResolvedTrackJson {
    ResolvedTrackJson {
        status: 200,
        name: track.name.clone(),
        pic: track.cover_url.clone(),
        ar_name: track.artist_names.clone(),
        al_name: track.album_name.clone(),
        level: utils::quality_label(&track.quality_level).to_string(),
        size: utils::format_size(track.size),
        url: utils::https_url(&track.download_url),
        lyric: track
            .lyrics
            .clone()
            .unwrap_or_else(|| NO_LYRIC.to_string()),
        tlyric: track
            .translated_lyrics
            .clone()
            .unwrap_or_else(|| NO_TRANSLATED_LYRIC.to_string()),
    }
}

/// Renders a resolved track for the `resolve` command.
pub fn render(track: &ResolvedTrack, mode: OutputMode) -> Result<String, serde_json::Error> {
    match mode {
        OutputMode::Down => Ok(format!("{DOWNLOAD_URL_MARKER}{}", track.download_url)),
        OutputMode::Text => Ok(format!(
            "Name: {}\nCover: {}\nArtists: {}\nAlbum: {}\nQuality: {}\nSize: {}\nURL: {}",
            track.name,
            track.cover_url,
            track.artist_names,
            track.album_name,
            utils::quality_label(&track.quality_level),
            utils::format_size(track.size),
            track.download_url,
        )),
        OutputMode::Json => serde_json::to_string_pretty(&to_json(track)),
    }
}
