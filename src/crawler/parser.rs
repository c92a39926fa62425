//! HTML link extraction
//!
//! Pulls the follow-worthy outbound links out of a page: `<a href>` targets,
//! resolved against the page URL, restricted to http/https.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from HTML content
///
/// Skipped: `javascript:`, `mailto:`, `tel:`, and `data:` targets,
/// fragment-only anchors, empty hrefs, and anchors carrying a `download`
/// attribute. `rel="nofollow"` links are followed.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, for resolving relative hrefs
///
/// # Returns
///
/// Absolute http/https URLs in document order (duplicates included; the
/// caller's visited set deduplicates)
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_href(href, base_url) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves one href against the base URL, filtering out non-followable
/// targets
fn resolve_href(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    for scheme in ["javascript:", "mailto:", "tel:", "data:"] {
        if href.starts_with(scheme) {
            return None;
        }
    }

    let absolute = base_url.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/dir/page").unwrap()
    }

    #[test]
    fn test_absolute_link() {
        let html = r#"<a href="https://other.com/x">x</a>"#;
        assert_eq!(extract_links(html, &base()), vec!["https://other.com/x"]);
    }

    #[test]
    fn test_root_relative_link() {
        let html = r#"<a href="/top">x</a>"#;
        assert_eq!(extract_links(html, &base()), vec!["https://example.com/top"]);
    }

    #[test]
    fn test_relative_link() {
        let html = r#"<a href="sibling">x</a>"#;
        assert_eq!(
            extract_links(html, &base()),
            vec!["https://example.com/dir/sibling"]
        );
    }

    #[test]
    fn test_skips_special_schemes() {
        let html = r#"
            <a href="javascript:void(0)">a</a>
            <a href="mailto:x@example.com">b</a>
            <a href="tel:+123">c</a>
            <a href="data:text/plain,x">d</a>
        "#;
        assert!(extract_links(html, &base()).is_empty());
    }

    #[test]
    fn test_skips_fragment_and_empty() {
        let html = r##"<a href="#top">a</a><a href="  ">b</a>"##;
        assert!(extract_links(html, &base()).is_empty());
    }

    #[test]
    fn test_skips_download_attribute() {
        let html = r#"<a href="/file.iso" download>get</a>"#;
        assert!(extract_links(html, &base()).is_empty());
    }

    #[test]
    fn test_follows_nofollow() {
        let html = r#"<a href="/page" rel="nofollow">x</a>"#;
        assert_eq!(
            extract_links(html, &base()),
            vec!["https://example.com/page"]
        );
    }

    #[test]
    fn test_skips_non_http_scheme_after_resolution() {
        let html = r#"<a href="ftp://example.com/f">x</a>"#;
        assert!(extract_links(html, &base()).is_empty());
    }

    #[test]
    fn test_duplicates_preserved() {
        let html = r#"<a href="/a">1</a><a href="/a">2</a>"#;
        assert_eq!(extract_links(html, &base()).len(), 2);
    }
}
