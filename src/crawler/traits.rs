//! Capability traits consumed by the crawl engine
//!
//! The engine never talks to the network directly: it is handed a
//! [`Downloader`] and works with the [`Document`]s it produces. Tests inject
//! scripted implementations; production wires in the reqwest-backed
//! [`super::HttpDownloader`].

use crate::DownloadError;
use async_trait::async_trait;

/// Fetches one page and yields a document
///
/// A single downloader is shared by every download task of a crawl, so
/// implementations must be `Send + Sync` and safe to call concurrently.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Downloads `url`, returning the page as a [`Document`]
    ///
    /// Failures are keyed by URL when recorded, so implementations should
    /// include the URL in the returned error.
    async fn download(&self, url: &str) -> Result<Box<dyn Document>, DownloadError>;
}

/// A downloaded page whose outbound links can be extracted once
///
/// Extraction consumes the document: it moves from the download task that
/// produced it to the extraction task that drains it.
#[async_trait]
pub trait Document: Send {
    /// Extracts the outbound links of this page as absolute URL strings
    async fn extract_links(self: Box<Self>) -> Result<Vec<String>, DownloadError>;
}
