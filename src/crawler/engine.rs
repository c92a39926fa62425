//! Recursive visit state machine
//!
//! One engine instance exists per crawl invocation and owns that crawl's
//! visited set, result collections, throttle, and barrier. Recursion never
//! happens on the call stack: `visit` registers work and submits a download
//! task, the download task spawns an extraction task, and the extraction
//! task re-enters `visit` for each newly claimed link. With pools as small
//! as one worker each, no task ever blocks waiting on a sibling of its own
//! pool, so the crawl cannot starve itself.

use crate::crawler::barrier::CompletionBarrier;
use crate::crawler::throttle::HostThrottle;
use crate::crawler::traits::{Document, Downloader};
use crate::crawler::CrawlResult;
use crate::url::origin_host;
use crate::DownloadError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Per-crawl engine: shared by every task of one `download()` call
pub(crate) struct CrawlEngine {
    downloader: Arc<dyn Downloader>,
    download_slots: Arc<Semaphore>,
    extract_slots: Arc<Semaphore>,
    throttle: HostThrottle,
    barrier: CompletionBarrier,
    visited: Mutex<HashSet<String>>,
    downloaded: Mutex<HashSet<String>>,
    errors: Mutex<HashMap<String, DownloadError>>,
}

impl CrawlEngine {
    pub(crate) fn new(
        downloader: Arc<dyn Downloader>,
        download_slots: Arc<Semaphore>,
        extract_slots: Arc<Semaphore>,
        per_host: usize,
    ) -> Self {
        Self {
            downloader,
            download_slots,
            extract_slots,
            throttle: HostThrottle::new(per_host),
            barrier: CompletionBarrier::new(),
            visited: Mutex::new(HashSet::new()),
            downloaded: Mutex::new(HashSet::new()),
            errors: Mutex::new(HashMap::new()),
        }
    }

    /// Claims `url` in the visited set; returns false if it was already taken
    pub(crate) fn claim(&self, url: &str) -> bool {
        self.visited.lock().unwrap().insert(url.to_string())
    }

    /// Blocks until every registered unit of work has finished
    pub(crate) async fn wait_idle(&self) {
        self.barrier.wait_zero().await;
    }

    /// Drains the accumulated result collections
    ///
    /// Only meaningful after [`wait_idle`](Self::wait_idle) returned; every
    /// completion happens-before that point, so no task is still writing.
    pub(crate) fn take_result(&self) -> CrawlResult {
        CrawlResult {
            downloaded: std::mem::take(&mut *self.downloaded.lock().unwrap()),
            errors: std::mem::take(&mut *self.errors.lock().unwrap()),
        }
    }

    /// Accepts `url` for crawling with `remaining_depth` hops left
    ///
    /// Synchronous on purpose: the barrier registration and the throttle
    /// submission both happen on the caller's stack, before the download
    /// task can possibly run, so the barrier can never observe a spurious
    /// zero. `remaining_depth == 1` means download without following links.
    pub(crate) fn visit(self: &Arc<Self>, url: String, remaining_depth: usize) {
        let host = match origin_host(&url) {
            Ok(host) => host,
            Err(e) => {
                // Never admitted: no throttle slot, no barrier registration.
                self.errors
                    .lock()
                    .unwrap()
                    .insert(url, DownloadError::Malformed(e.to_string()));
                return;
            }
        };

        self.barrier.register();
        let engine = Arc::clone(self);
        let task_host = host.clone();
        self.throttle.submit(
            &host,
            Box::pin(async move {
                engine.run_download(url, task_host, remaining_depth).await;
            }),
        );
    }

    /// Body of one download task
    async fn run_download(self: Arc<Self>, url: String, host: String, remaining_depth: usize) {
        // Releases the throttle slot and completes the barrier unit on every
        // exit path, in that order.
        let _unit = DownloadUnit {
            engine: &self,
            host: &host,
        };

        let permit = match self.download_slots.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                // Pool closed: the crawl is being torn down.
                tracing::debug!(%url, "download pool closed, dropping task");
                return;
            }
        };

        match self.downloader.download(&url).await {
            Ok(document) => {
                drop(permit);
                self.downloaded.lock().unwrap().insert(url.clone());
                tracing::debug!(%url, "downloaded");

                if remaining_depth != 1 {
                    // Register the extraction unit before the task exists.
                    self.barrier.register();
                    let engine = Arc::clone(&self);
                    tokio::spawn(async move {
                        engine.run_extraction(url, document, remaining_depth).await;
                    });
                }
            }
            Err(error) => {
                drop(permit);
                tracing::debug!(%url, %error, "download failed");
                self.errors.lock().unwrap().insert(url, error);
            }
        }
    }

    /// Body of one extraction task
    async fn run_extraction(
        self: Arc<Self>,
        url: String,
        document: Box<dyn Document>,
        remaining_depth: usize,
    ) {
        // Completes the barrier unit on every exit path.
        let _unit = ExtractionUnit { engine: &self };

        let _permit = match self.extract_slots.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                tracing::debug!(%url, "extraction pool closed, dropping task");
                return;
            }
        };

        match document.extract_links().await {
            Ok(links) => {
                for link in links {
                    if self.claim(&link) {
                        self.visit(link, remaining_depth - 1);
                    }
                }
            }
            Err(error) => {
                // Side-channel only: the page itself already counts as
                // downloaded, and the failure has no single URL to blame.
                tracing::warn!(%url, %error, "link extraction failed");
            }
        }
    }
}

/// Drop guard for a download unit: release the throttle slot, then complete
/// the barrier registration
struct DownloadUnit<'a> {
    engine: &'a CrawlEngine,
    host: &'a str,
}

impl Drop for DownloadUnit<'_> {
    fn drop(&mut self) {
        self.engine.throttle.release(self.host);
        self.engine.barrier.complete();
    }
}

/// Drop guard for an extraction unit
struct ExtractionUnit<'a> {
    engine: &'a CrawlEngine,
}

impl Drop for ExtractionUnit<'_> {
    fn drop(&mut self) {
        self.engine.barrier.complete();
    }
}
