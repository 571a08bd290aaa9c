use std::path::Path;

use id3::{Tag, TagLike, Version};

use crate::types::TrackTags;

use super::AudioError;

/// Writes title, artist and album frames, keeping any other existing frames.
pub fn write_tags(path: &Path, tags: &TrackTags) -> Result<(), AudioError> {
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Tag::new(),
        Err(e) => return Err(e.into()),
    };

    tag.set_title(tags.title.as_str());
    tag.set_artist(tags.artist.as_str());
    match &tags.album {
        Some(album) => tag.set_album(album.as_str()),
        None => tag.remove_album(),
    }

    tag.write_to_path(path, Version::Id3v24)?;
    Ok(())
}

pub fn read_tags(path: &Path) -> Result<TrackTags, AudioError> {
    let tag = Tag::read_from_path(path)?;
    Ok(TrackTags {
        title: tag.title().unwrap_or_default().to_string(),
        artist: tag.artist().unwrap_or_default().to_string(),
        album: tag.album().map(str::to_string),
    })
}
