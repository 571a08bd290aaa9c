use std::{path::Path, time::Duration};

use lofty::{file::AudioFile, probe::Probe};

use super::AudioError;

/// Playback duration of an audio file.
///
/// The container is detected from the content, so a FLAC stream saved under
/// an `.mp3` name is still read correctly.
pub fn probe_duration(path: &Path) -> Result<Duration, AudioError> {
    let tagged = Probe::open(path)?.guess_file_type()?.read()?;
    Ok(tagged.properties().duration())
}
