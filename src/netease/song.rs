use rand::Rng;

use crate::{
    types::{LyricResponse, SongDetailResponse, SongUrl, SongUrlPayload, SongUrlResponse},
    utils::Quality,
};

use super::{EapiConfig, NeteaseClient, NeteaseError, check_code};

pub const SONG_URL_ENDPOINT: &str = "/eapi/song/enhance/player/url/v1";
pub const SONG_DETAIL_ENDPOINT: &str = "/api/v3/song/detail";
pub const LYRIC_ENDPOINT: &str = "/api/song/lyric";

const ENCODE_TYPE: &str = "flac";
const SKY_IMMERSE_TYPE: &str = "c51";

/// JSON text of the song-url payload for one track.
///
/// The header sub-object is serialized first and embedded as a string.
/// `sky` requests carry the immersive surround type.
pub fn song_url_payload(
    id: &str,
    quality: Quality,
    config: &EapiConfig,
    request_id: u32,
) -> Result<String, serde_json::Error> {
    let header = serde_json::to_string(&config.header(request_id.to_string()))?;
    let payload = SongUrlPayload {
        ids: vec![id.to_string()],
        level: quality.as_str().to_string(),
        encode_type: ENCODE_TYPE.to_string(),
        header,
        immerse_type: (quality == Quality::Sky).then(|| SKY_IMMERSE_TYPE.to_string()),
    };
    serde_json::to_string(&payload)
}

pub fn random_request_id() -> u32 {
    rand::rng().random_range(20_000_000..30_000_000)
}

impl NeteaseClient {
    /// Signed song-url call; returns the entry for the requested track.
    pub async fn song_url(&self, id: &str, quality: Quality) -> Result<SongUrl, NeteaseError> {
        let json = song_url_payload(id, quality, &self.eapi, random_request_id())?;
        let response: SongUrlResponse = self.eapi_request(SONG_URL_ENDPOINT, &json).await?;
        check_code(response.code)?;

        response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| NeteaseError::Unavailable(format!("no url entry for {id}")))
    }

    pub async fn song_detail(&self, id: u64) -> Result<SongDetailResponse, NeteaseError> {
        let c = serde_json::json!([{ "id": id, "v": 0 }]).to_string();
        let response: SongDetailResponse = self
            .api_request(SONG_DETAIL_ENDPOINT, &[("c", c)], false)
            .await?;
        check_code(response.code)?;
        Ok(response)
    }

    pub async fn lyric(&self, id: u64) -> Result<LyricResponse, NeteaseError> {
        let mut form = vec![("id", id.to_string()), ("cp", "false".to_string())];
        for key in ["tv", "lv", "rv", "kv", "yv", "ytv", "yrv"] {
            form.push((key, "0".to_string()));
        }
        self.api_request(LYRIC_ENDPOINT, &form, true).await
    }
}
