//! Crawler facade: public entry point wiring the crawl core together
//!
//! The facade owns the two worker pools (download and extraction) and the
//! downloader; everything else — visited set, throttle, barrier, result
//! collections — is constructed fresh for each `download()` call, so
//! concurrent calls on one `Crawler` never cross-contaminate.

use crate::config::CrawlConfig;
use crate::crawler::engine::CrawlEngine;
use crate::crawler::traits::Downloader;
use crate::crawler::CrawlResult;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Depth-bounded concurrent web crawler
///
/// ```no_run
/// use fathom::config::CrawlConfig;
/// use fathom::crawler::{Crawler, HttpDownloader};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let downloader = Arc::new(HttpDownloader::new("fathom/0.1")?);
/// let crawler = Crawler::new(downloader, CrawlConfig::default());
/// let result = crawler.download("https://example.com/", 2).await;
/// println!("downloaded {} pages", result.downloaded.len());
/// crawler.close();
/// # Ok(())
/// # }
/// ```
pub struct Crawler {
    downloader: Arc<dyn Downloader>,
    download_slots: Arc<Semaphore>,
    extract_slots: Arc<Semaphore>,
    per_host: usize,
}

impl Crawler {
    /// Creates a crawler with pools sized by `config`
    pub fn new(downloader: Arc<dyn Downloader>, config: CrawlConfig) -> Self {
        Self {
            downloader,
            download_slots: Arc::new(Semaphore::new(config.downloaders)),
            extract_slots: Arc::new(Semaphore::new(config.extractors)),
            per_host: config.per_host,
        }
    }

    /// Crawls from `seed_url`, following links up to `depth` hops
    ///
    /// `depth` is inclusive of the seed page: `depth == 1` downloads the
    /// seed and follows nothing. A `depth` of zero accepts no work and
    /// returns an empty result. The call blocks until the entire transitive
    /// work graph has finished.
    pub async fn download(&self, seed_url: &str, depth: usize) -> CrawlResult {
        if depth == 0 {
            tracing::debug!(seed_url, "depth 0 requested, nothing to crawl");
            return CrawlResult::default();
        }

        tracing::info!(seed_url, depth, "starting crawl");

        let engine = Arc::new(CrawlEngine::new(
            Arc::clone(&self.downloader),
            Arc::clone(&self.download_slots),
            Arc::clone(&self.extract_slots),
            self.per_host,
        ));

        engine.claim(seed_url);
        engine.visit(seed_url.to_string(), depth);
        engine.wait_idle().await;

        let result = engine.take_result();
        tracing::info!(
            seed_url,
            downloaded = result.downloaded.len(),
            errors = result.errors.len(),
            "crawl finished"
        );
        result
    }

    /// Shuts the crawler down hard
    ///
    /// Both pools stop admitting work immediately. Tasks already performing
    /// a capability call run to completion of that call; everything queued
    /// behind them is discarded. A `download()` call in flight across
    /// `close()` still returns, but its result is undefined and must not be
    /// relied on.
    pub fn close(&self) {
        tracing::info!("closing crawler");
        self.download_slots.close();
        self.extract_slots.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::traits::Document;
    use crate::DownloadError;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Downloader that serves an endless tree: every page links to two
    /// children, with a small delay per download.
    struct EndlessDownloader;

    struct EndlessDocument {
        url: String,
    }

    #[async_trait]
    impl Downloader for EndlessDownloader {
        async fn download(&self, url: &str) -> Result<Box<dyn Document>, DownloadError> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(Box::new(EndlessDocument {
                url: url.to_string(),
            }))
        }
    }

    #[async_trait]
    impl Document for EndlessDocument {
        async fn extract_links(self: Box<Self>) -> Result<Vec<String>, DownloadError> {
            let base = self.url.trim_end_matches('/');
            Ok(vec![format!("{}/0/", base), format!("{}/1/", base)])
        }
    }

    #[tokio::test]
    async fn test_depth_zero_is_empty() {
        let crawler = Crawler::new(Arc::new(EndlessDownloader), CrawlConfig::default());
        let result = crawler.download("http://a/", 0).await;
        assert!(result.downloaded.is_empty());
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_download_after_close_accepts_nothing() {
        let crawler = Crawler::new(Arc::new(EndlessDownloader), CrawlConfig::default());
        crawler.close();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            crawler.download("http://a/", 3),
        )
        .await
        .expect("download did not return after close");

        // The seed task was admitted but the closed pool dropped it.
        assert!(result.downloaded.is_empty());
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_close_unblocks_in_flight_crawl() {
        let crawler = Arc::new(Crawler::new(
            Arc::new(EndlessDownloader),
            CrawlConfig {
                downloaders: 2,
                extractors: 2,
                per_host: 2,
            },
        ));

        let in_flight = {
            let crawler = Arc::clone(&crawler);
            // Unbounded depth over an endless tree: only close() can end it.
            tokio::spawn(async move { crawler.download("http://a/", usize::MAX).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        crawler.close();

        let result = tokio::time::timeout(Duration::from_secs(5), in_flight)
            .await
            .expect("crawl did not unwind after close")
            .expect("crawl task panicked");

        // Partial and explicitly undefined; it only has to have returned.
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_sequential_downloads_use_fresh_state() {
        let crawler = Crawler::new(Arc::new(EndlessDownloader), CrawlConfig::default());

        let first = crawler.download("http://a/", 1).await;
        let second = crawler.download("http://a/", 1).await;

        // The visited set is per-call: the same seed is downloaded again.
        assert_eq!(first.downloaded.len(), 1);
        assert_eq!(second.downloaded.len(), 1);
    }
}
