//! Local audio file handling: streaming downloads, duration probing and ID3
//! tagging.

pub mod download;
pub mod duration;
pub mod tags;

use std::{fmt, io::Error};

use reqwest::StatusCode;

#[derive(Debug)]
pub enum AudioError {
    IoError(Error),
    HttpError(reqwest::Error),
    StatusError(StatusCode),
    ProbeError(lofty::error::LoftyError),
    TagError(id3::Error),
}

impl From<Error> for AudioError {
    fn from(err: Error) -> Self {
        AudioError::IoError(err)
    }
}

impl From<reqwest::Error> for AudioError {
    fn from(err: reqwest::Error) -> Self {
        AudioError::HttpError(err)
    }
}

impl From<lofty::error::LoftyError> for AudioError {
    fn from(err: lofty::error::LoftyError) -> Self {
        AudioError::ProbeError(err)
    }
}

impl From<id3::Error> for AudioError {
    fn from(err: id3::Error) -> Self {
        AudioError::TagError(err)
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::IoError(e) => write!(f, "{e}"),
            AudioError::HttpError(e) => write!(f, "download failed: {e}"),
            AudioError::StatusError(s) => write!(f, "download failed with HTTP status {s}"),
            AudioError::ProbeError(e) => write!(f, "unreadable audio: {e}"),
            AudioError::TagError(e) => write!(f, "cannot write tags: {e}"),
        }
    }
}

impl std::error::Error for AudioError {}
