use reqwest::header::USER_AGENT;

use crate::{
    config,
    types::{SearchResponse, SearchResult},
};

use super::{NeteaseClient, NeteaseError, check_code, read_json};

impl NeteaseClient {
    /// Searches for `"<title> <artist>"` and returns the API's top result.
    ///
    /// `Ok(None)` means the search succeeded but found nothing.
    pub async fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<SearchResult>, NeteaseError> {
        let query = format!("{title} {artist}");
        let response = self
            .http
            .get(&self.search_url)
            .header(USER_AGENT, config::SEARCH_USER_AGENT)
            .query(&[
                ("s", query.as_str()),
                ("type", "1"),
                ("limit", "1"),
                ("offset", "0"),
                ("csrf_token", ""),
            ])
            .send()
            .await?;

        let body: SearchResponse = read_json(response).await?;
        check_code(body.code)?;
        Ok(body.first_match())
    }
}
