//! Output module for reporting crawl results
//!
//! The final [`CrawlResult`](crate::crawler::CrawlResult) is the sole
//! error-reporting surface of a crawl; this module turns it into a stable,
//! human-readable report.

mod report;

pub use report::{print_report, CrawlReport};
