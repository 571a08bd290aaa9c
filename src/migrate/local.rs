use std::{path::Path, time::Duration};

use crate::{
    audio::{duration, tags},
    types::TrackTags,
};

use super::{AudioTagger, MigrateError};

/// [`AudioTagger`] that probes with lofty and writes ID3v2.4 frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3Tagger;

impl AudioTagger for Id3Tagger {
    fn duration(&self, path: &Path) -> Result<Duration, MigrateError> {
        duration::probe_duration(path).map_err(|e| MigrateError::InvalidAudio(e.to_string()))
    }

    fn write_tags(&self, path: &Path, track: &TrackTags) -> Result<(), MigrateError> {
        tags::write_tags(path, track).map_err(|e| MigrateError::TagFailure(e.to_string()))
    }
}
