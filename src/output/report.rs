use crate::crawler::CrawlResult;

/// Sorted, display-ready view of a [`CrawlResult`]
#[derive(Debug)]
pub struct CrawlReport {
    /// Successfully downloaded URLs, sorted
    pub downloaded: Vec<String>,

    /// `(url, error message)` pairs, sorted by URL
    pub failed: Vec<(String, String)>,
}

impl CrawlReport {
    /// Builds a report from a crawl result
    pub fn from_result(result: &CrawlResult) -> Self {
        let mut downloaded: Vec<String> = result.downloaded.iter().cloned().collect();
        downloaded.sort();

        let mut failed: Vec<(String, String)> = result
            .errors
            .iter()
            .map(|(url, error)| (url.clone(), error.to_string()))
            .collect();
        failed.sort();

        Self { downloaded, failed }
    }
}

/// Prints a report to stdout
pub fn print_report(report: &CrawlReport) {
    println!(
        "Downloaded {} page(s), {} error(s)",
        report.downloaded.len(),
        report.failed.len()
    );

    if !report.downloaded.is_empty() {
        println!("\nDownloaded:");
        for url in &report.downloaded {
            println!("  {}", url);
        }
    }

    if !report.failed.is_empty() {
        println!("\nErrors:");
        for (url, message) in &report.failed {
            println!("  {}: {}", url, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DownloadError;

    #[test]
    fn test_report_is_sorted() {
        let mut result = CrawlResult::default();
        result.downloaded.insert("http://b/".to_string());
        result.downloaded.insert("http://a/".to_string());
        result.errors.insert(
            "http://z/".to_string(),
            DownloadError::Http {
                url: "http://z/".to_string(),
                status: 404,
            },
        );
        result.errors.insert(
            "http://c/".to_string(),
            DownloadError::Network {
                url: "http://c/".to_string(),
                message: "connection failed".to_string(),
            },
        );

        let report = CrawlReport::from_result(&result);
        assert_eq!(report.downloaded, vec!["http://a/", "http://b/"]);
        assert_eq!(report.failed[0].0, "http://c/");
        assert_eq!(report.failed[1].0, "http://z/");
    }

    #[test]
    fn test_error_messages_are_rendered() {
        let mut result = CrawlResult::default();
        result.errors.insert(
            "http://x/".to_string(),
            DownloadError::Http {
                url: "http://x/".to_string(),
                status: 500,
            },
        );

        let report = CrawlReport::from_result(&result);
        assert_eq!(report.failed[0].1, "HTTP 500 for http://x/");
    }
}
