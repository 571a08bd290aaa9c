use std::{fmt, io::Error, path::Path};

#[derive(Debug)]
pub enum CookieError {
    IoError(Error),
}

impl From<Error> for CookieError {
    fn from(err: Error) -> Self {
        CookieError::IoError(err)
    }
}

impl fmt::Display for CookieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieError::IoError(e) => write!(f, "cannot read cookie file: {e}"),
        }
    }
}

impl std::error::Error for CookieError {}

/// Session cookies from the credential file.
///
/// The file holds `key=value` pairs separated by `;`. Later keys override
/// earlier ones; insertion order is kept for the header.
#[derive(Debug, Clone, Default)]
pub struct CookieManager {
    cookies: Vec<(String, String)>,
}

impl CookieManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Self {
        let mut manager = Self::new();
        for item in text.trim().split(';') {
            let Some((key, value)) = item.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            manager.insert(key, value.trim());
        }
        manager
    }

    pub async fn load(path: &Path) -> Result<Self, CookieError> {
        let content = async_fs::read_to_string(path).await?;
        Ok(Self::parse(&content))
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        match self.cookies.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.cookies.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// `Cookie` header value: `defaults` first, overridden by the stored cookies.
    pub fn header_with(&self, defaults: &[(String, String)]) -> String {
        let mut merged = Self {
            cookies: defaults.to_vec(),
        };
        for (key, value) in &self.cookies {
            merged.insert(key, value);
        }
        merged
            .cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
