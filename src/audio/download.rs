use std::{io::ErrorKind, path::Path};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::warning;

use super::AudioError;

/// Streams `url` into `dest` and returns the number of bytes written.
///
/// A non-2xx status fails before anything is written. If the transfer breaks
/// off midway the partial file is removed.
pub async fn download_to(client: &Client, url: &str, dest: &Path) -> Result<u64, AudioError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AudioError::StatusError(status));
    }

    let pb = match response.content_length() {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.blue} [{bar:30.blue}] {bytes}/{total_bytes} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    if let Some(name) = dest.file_name() {
        pb.set_message(name.to_string_lossy().into_owned());
    }

    let result = write_body(response, dest, &pb).await;
    pb.finish_and_clear();

    if result.is_err() {
        match async_fs::remove_file(dest).await {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                warning!("Cannot remove partial download {}: {}", dest.display(), e)
            }
            _ => {}
        }
    }
    result
}

async fn write_body(
    mut response: reqwest::Response,
    dest: &Path,
    pb: &ProgressBar,
) -> Result<u64, AudioError> {
    let mut file = File::create(dest).await?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        pb.set_position(written);
    }
    file.flush().await?;
    Ok(written)
}
