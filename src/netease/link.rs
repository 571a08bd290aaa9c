use reqwest::{Client, header::LOCATION, redirect::Policy};

use crate::utils;

use super::NeteaseError;

const SHORT_LINK_HOST: &str = "163cn.tv";

/// Turns a song id, song URL or short link into a bare song id.
///
/// Short links are followed exactly one hop by reading the `Location`
/// header of the unfollowed redirect.
pub async fn resolve_link(input: &str) -> Result<String, NeteaseError> {
    let mut target = input.trim().to_string();

    if target.contains(SHORT_LINK_HOST) {
        let client = Client::builder().redirect(Policy::none()).build()?;
        let response = client.get(&target).send().await?;
        target = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| NeteaseError::Link(format!("{target} did not redirect")))?;
    }

    let id = utils::parse_song_id(&target);
    if id.is_empty() {
        return Err(NeteaseError::Link(format!("no song id in {input}")));
    }
    Ok(id)
}
