use std::{error::Error, fmt::Display};

use log::debug;
use reqwest::Client;

use crate::warn_with_log;

/// Retrieves the raw text of a playlist.
///
/// Failures never cross this boundary: they are logged and come back as `None`,
/// so one unreachable source cannot take the others down with it.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Option<String>> + Send;
}

pub struct HttpFetcher {
    http_client: Client,
}

impl HttpFetcher {
    pub fn new(http_client: Client) -> Self {
        HttpFetcher { http_client }
    }

    pub async fn try_fetch(&self, url: impl AsRef<str>) -> Result<String, FetchError> {
        let response = self.http_client.get(url.as_ref()).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::RequestNotSuccess(response.status().as_u16()));
        }

        let text = response.text().await?;
        debug!("Fetched {} bytes from {}", text.len(), url.as_ref());
        Ok(text)
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.try_fetch(url)
            .await
            .map_err(warn_with_log!(format!("Error fetching {}", url)))
            .ok()
    }
}

#[derive(Debug)]
pub enum FetchError {
    RequestError(reqwest::Error),
    RequestNotSuccess(u16),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestError(e) => e.fmt(f),
            Self::RequestNotSuccess(status_code) => {
                write!(f, "Server respond with status code {}", status_code)
            }
        }
    }
}

impl Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::RequestError(value)
    }
}
