//! # NetEase Cloud Music Integration
//!
//! Client for the parts of the NetEase Cloud Music API that songshift needs:
//!
//! ```text
//! Pipeline / CLI
//!      ↓
//! NeteaseClient
//!     ├── search    public search endpoint (first match)
//!     ├── song      signed song-url call, song detail, lyrics
//!     ├── link      short-link and URL id parsing
//!     └── resolver  song-url + detail + lyrics → ResolvedTrack
//!      ↓
//! crypto (EAPI signing)  →  reqwest
//! ```
//!
//! ## EAPI
//!
//! The song-url endpoint lives on the encrypted API surface. Every request is
//! a single `params` form field produced by [`crypto::encrypt_params`] and
//! carries the request-context cookies from [`EapiConfig`] merged with the
//! user's session cookies. The key and the client identity are plain
//! configuration values owned by the client, never globals.
//!
//! ## Errors
//!
//! Transport errors, non-2xx statuses, bodies that are not JSON and API
//! `code` values other than 200 all become a [`NeteaseError`]. Callers in the
//! migration pipeline turn these into a per-row resolution failure.

pub mod crypto;
pub mod link;
pub mod resolver;
pub mod search;
pub mod song;

use std::fmt;

use reqwest::{
    Client, Response, StatusCode,
    header::{COOKIE, REFERER, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::{config, management::CookieManager, types::EapiHeader};

/// Client identity and key used for EAPI requests.
#[derive(Debug, Clone)]
pub struct EapiConfig {
    pub key: [u8; 16],
    pub os: String,
    pub appver: String,
    pub osver: String,
    pub device_id: String,
    pub user_agent: String,
}

impl Default for EapiConfig {
    fn default() -> Self {
        Self {
            key: *crypto::EAPI_KEY,
            os: "pc".to_string(),
            appver: String::new(),
            osver: String::new(),
            device_id: "pyncm!".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Safari/537.36 Chrome/91.0.4472.164 NeteaseMusicDesktop/2.10.2.200154".to_string(),
        }
    }
}

impl EapiConfig {
    pub fn header(&self, request_id: String) -> EapiHeader {
        EapiHeader {
            os: self.os.clone(),
            appver: self.appver.clone(),
            osver: self.osver.clone(),
            device_id: self.device_id.clone(),
            request_id,
        }
    }

    /// Request-context cookies sent with every EAPI call.
    pub fn base_cookies(&self) -> Vec<(String, String)> {
        vec![
            ("os".to_string(), self.os.clone()),
            ("appver".to_string(), self.appver.clone()),
            ("osver".to_string(), self.osver.clone()),
            ("deviceId".to_string(), self.device_id.clone()),
        ]
    }
}

#[derive(Debug)]
pub enum NeteaseError {
    Http(reqwest::Error),
    Status(StatusCode),
    Json(serde_json::Error),
    Api(i64),
    Link(String),
    Unavailable(String),
}

impl From<reqwest::Error> for NeteaseError {
    fn from(err: reqwest::Error) -> Self {
        NeteaseError::Http(err)
    }
}

impl From<serde_json::Error> for NeteaseError {
    fn from(err: serde_json::Error) -> Self {
        NeteaseError::Json(err)
    }
}

impl fmt::Display for NeteaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeteaseError::Http(e) => write!(f, "request failed: {e}"),
            NeteaseError::Status(s) => write!(f, "unexpected HTTP status {s}"),
            NeteaseError::Json(e) => write!(f, "invalid JSON response: {e}"),
            NeteaseError::Api(code) => write!(f, "API returned code {code}"),
            NeteaseError::Link(msg) => write!(f, "cannot resolve link: {msg}"),
            NeteaseError::Unavailable(msg) => write!(f, "track unavailable: {msg}"),
        }
    }
}

impl std::error::Error for NeteaseError {}

pub struct NeteaseClient {
    http: Client,
    eapi: EapiConfig,
    cookies: CookieManager,
    api_url: String,
    search_url: String,
}

impl NeteaseClient {
    /// Creates a client with endpoints taken from the configuration.
    pub fn new(eapi: EapiConfig, cookies: CookieManager) -> Self {
        Self::with_endpoints(eapi, cookies, config::api_url(), config::search_url())
    }

    pub fn with_endpoints(
        eapi: EapiConfig,
        cookies: CookieManager,
        api_url: String,
        search_url: String,
    ) -> Self {
        Self {
            http: Client::new(),
            eapi,
            cookies,
            api_url,
            search_url,
        }
    }

    /// Replaces the underlying HTTP client.
    pub fn with_http(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    fn cookie_header(&self) -> String {
        self.cookies.header_with(&self.eapi.base_cookies())
    }

    /// Sends a signed request to an `/eapi/...` endpoint.
    async fn eapi_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        json: &str,
    ) -> Result<T, NeteaseError> {
        let url = format!("{}{}", self.api_url, endpoint);
        let params = crypto::encrypt_params(&crypto::eapi_path(&url), json, &self.eapi.key);

        let response = self
            .http
            .post(&url)
            .header(USER_AGENT, &self.eapi.user_agent)
            .header(REFERER, "")
            .header(COOKIE, self.cookie_header())
            .form(&[("params", params)])
            .send()
            .await?;

        read_json(response).await
    }

    /// Sends a plain form request to an `/api/...` endpoint.
    async fn api_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
        with_cookies: bool,
    ) -> Result<T, NeteaseError> {
        let url = format!("{}{}", self.api_url, endpoint);
        let mut request = self.http.post(&url).form(form);
        if with_cookies {
            request = request.header(COOKIE, self.cookie_header());
        }

        read_json(request.send().await?).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, NeteaseError> {
    let status = response.status();
    if !status.is_success() {
        return Err(NeteaseError::Status(status));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn check_code(code: Option<i64>) -> Result<(), NeteaseError> {
    match code {
        Some(code) if code != 200 => Err(NeteaseError::Api(code)),
        _ => Ok(()),
    }
}
