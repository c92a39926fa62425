//! Crawler module: the concurrent, depth-bounded crawl core
//!
//! The crawl core is built from three injectable pieces plus a facade:
//! - [`HostThrottle`] caps concurrent downloads per origin host and queues
//!   the overflow FIFO.
//! - [`CompletionBarrier`] tracks a dynamically growing graph of download and
//!   extraction tasks and lets one waiter block until all of them finish.
//! - `CrawlEngine` (crate-private) runs the recursive visit state machine,
//!   re-entering through task submission rather than the call stack.
//! - [`Crawler`] wires the above to a [`Downloader`] and exposes
//!   `download`/`close`.

mod barrier;
mod coordinator;
mod engine;
mod fetcher;
mod parser;
mod throttle;
mod traits;

pub use barrier::CompletionBarrier;
pub use coordinator::Crawler;
pub use fetcher::{build_http_client, HtmlDocument, HttpDownloader};
pub use parser::extract_links;
pub use throttle::{HostThrottle, ThrottledTask};
pub use traits::{Document, Downloader};

use crate::DownloadError;
use std::collections::{HashMap, HashSet};

/// Aggregated outcome of one crawl invocation
///
/// Every URL accepted for crawling ends up in exactly one of the two
/// collections: `downloaded` on success, `errors` keyed by URL on failure.
/// Extraction failures are logged rather than recorded here, so a page whose
/// links could not be extracted still appears in `downloaded`.
#[derive(Debug, Default)]
pub struct CrawlResult {
    /// URLs that were successfully downloaded
    pub downloaded: HashSet<String>,

    /// Per-URL download failures
    pub errors: HashMap<String, DownloadError>,
}

impl CrawlResult {
    /// Total number of URLs the crawl accepted (succeeded or failed)
    pub fn total(&self) -> usize {
        self.downloaded.len() + self.errors.len()
    }
}
