use std::path::Path;

use crate::{
    audio::download,
    netease::NeteaseClient,
    types::SearchResult,
    utils::Quality,
};

use super::{MigrateError, TrackSource};

/// [`TrackSource`] backed by the NetEase Cloud Music API.
pub struct NeteaseSource {
    client: NeteaseClient,
}

impl NeteaseSource {
    pub fn new(client: NeteaseClient) -> Self {
        Self { client }
    }
}

impl TrackSource for NeteaseSource {
    async fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<SearchResult>, MigrateError> {
        self.client
            .search(title, artist)
            .await
            .map_err(|e| MigrateError::SearchFailure(e.to_string()))
    }

    async fn resolve_url(&self, track_id: u64, quality: Quality) -> Result<String, MigrateError> {
        let song = self
            .client
            .song_url(&track_id.to_string(), quality)
            .await
            .map_err(|e| MigrateError::ResolveFailure(e.to_string()))?;

        song.url.ok_or_else(|| {
            MigrateError::ResolveFailure(format!("no {quality} url for song {track_id}"))
        })
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<(), MigrateError> {
        download::download_to(self.client.http(), url, dest)
            .await
            .map(|_| ())
            .map_err(|e| MigrateError::DownloadFailure(e.to_string()))
    }
}
