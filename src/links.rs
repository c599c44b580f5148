//! Permalink resolution
//!
//! Cards link to their detail page with a site-relative path
//! (`/chart/BTCUSD/AbC123-breakout/`). Items always carry the absolute form.

use url::Url;

/// Resolves a card's link href to an absolute HTTP(S) URL
///
/// Returns None if the link should be discarded:
/// - empty or fragment-only hrefs
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - hrefs that do not resolve against `base_url`
/// - non-HTTP(S) URLs after resolution
///
/// # Example
///
/// ```
/// use ideas_harvester::links::resolve_permalink;
/// use url::Url;
///
/// let base = Url::parse("https://www.tradingview.com").unwrap();
/// let url = resolve_permalink("/chart/ABC123", &base).unwrap();
/// assert_eq!(url.as_str(), "https://www.tradingview.com/chart/ABC123");
/// ```
pub fn resolve_permalink(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://www.tradingview.com").unwrap()
    }

    #[test]
    fn test_relative_path() {
        let url = resolve_permalink("/chart/ABC123", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://www.tradingview.com/chart/ABC123");
    }

    #[test]
    fn test_relative_path_with_whitespace() {
        let url = resolve_permalink("  /chart/EURUSD/xYz-range/ \n", &base_url()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.tradingview.com/chart/EURUSD/xYz-range/"
        );
    }

    #[test]
    fn test_absolute_link_kept() {
        let url = resolve_permalink("https://uk.tradingview.com/chart/X/", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://uk.tradingview.com/chart/X/");
    }

    #[test]
    fn test_protocol_relative_link() {
        let url = resolve_permalink("//www.tradingview.com/chart/Y/", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://www.tradingview.com/chart/Y/");
    }

    #[test]
    fn test_rejected_links() {
        assert_eq!(resolve_permalink("", &base_url()), None);
        assert_eq!(resolve_permalink("#comments", &base_url()), None);
        assert_eq!(resolve_permalink("javascript:void(0)", &base_url()), None);
        assert_eq!(resolve_permalink("mailto:x@example.com", &base_url()), None);
        assert_eq!(resolve_permalink("ftp://example.com/file", &base_url()), None);
    }
}
