//! HTTP downloader implementation
//!
//! The reqwest-backed [`Downloader`] used by the CLI. Non-2xx statuses and
//! transport errors become per-URL [`DownloadError`]s; a successful fetch of
//! a non-HTML body is still a downloaded page, it just has no links.

use crate::crawler::parser::extract_links;
use crate::crawler::traits::{Document, Downloader};
use crate::DownloadError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with the crawler's defaults
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header value to send
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Downloader backed by a shared reqwest [`Client`]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Creates a downloader with a freshly built client
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }

    /// Creates a downloader around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<Box<dyn Document>, DownloadError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            DownloadError::Network {
                url: url.to_string(),
                message,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/html"))
            .unwrap_or(false);

        // Resolve discovered links against the post-redirect URL.
        let final_url = response.url().clone();

        let body = if is_html {
            Some(
                response
                    .text()
                    .await
                    .map_err(|e| DownloadError::Network {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?,
            )
        } else {
            None
        };

        Ok(Box::new(HtmlDocument {
            url: final_url,
            body,
        }))
    }
}

/// A fetched page: its final URL plus the HTML body, if it had one
pub struct HtmlDocument {
    url: Url,
    body: Option<String>,
}

impl HtmlDocument {
    /// Creates a document from already-fetched HTML (mostly for tests)
    pub fn from_html(url: Url, body: String) -> Self {
        Self {
            url,
            body: Some(body),
        }
    }
}

#[async_trait]
impl Document for HtmlDocument {
    async fn extract_links(self: Box<Self>) -> Result<Vec<String>, DownloadError> {
        match self.body {
            Some(body) => Ok(extract_links(&body, &self.url)),
            // Not HTML: downloaded fine, nothing to follow.
            None => Ok(Vec::new()),
        }
    }
}
