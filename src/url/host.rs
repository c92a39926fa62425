use crate::UrlError;
use url::Url;

/// Extracts the origin host from a URL string
///
/// The host is lowercased so that `http://A/` and `http://a/` share one
/// throttling key. The port is not part of the key.
///
/// # Arguments
///
/// * `url` - The URL to extract the host from
///
/// # Returns
///
/// * `Ok(String)` - The lowercase host
/// * `Err(UrlError)` - The URL is unparsable or has no host
///
/// # Examples
///
/// ```
/// use fathom::url::origin_host;
///
/// assert_eq!(origin_host("https://Example.COM/path").unwrap(), "example.com");
/// assert!(origin_host("not a url").is_err());
/// ```
pub fn origin_host(url: &str) -> Result<String, UrlError> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;
    parsed
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or(UrlError::MissingHost)
}
