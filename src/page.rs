//! The page the floating widget is "watching"
//!
//! The dashboard has no browser, so the current page comes from config or
//! `--page`. Blocking and the sleeping state are judged against it.

use url::Url;

/// Host and full URL of the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    url: String,
    host: String,
}

impl PageContext {
    /// Build from user input
    ///
    /// Accepts bare hosts (`example.com/docs`) by assuming https. Input that
    /// still does not parse is kept verbatim as both URL and host so the
    /// block lists keep working on whatever the user typed.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let parsed = Url::parse(trimmed)
            .ok()
            .filter(|u| u.host_str().is_some())
            .or_else(|| Url::parse(&format!("https://{}", trimmed)).ok());

        match parsed.as_ref().and_then(|u| u.host_str().map(|h| (u, h))) {
            Some((url, host)) => Self {
                url: url.to_string(),
                host: host.to_ascii_lowercase(),
            },
            None => {
                tracing::warn!(page = trimmed, "Could not parse page URL, using it verbatim");
                Self {
                    url: trimmed.to_string(),
                    host: trimmed.to_ascii_lowercase(),
                }
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_url() {
        let page = PageContext::parse("https://Example.com/a/b?q=1");
        assert_eq!(page.host(), "example.com");
        assert_eq!(page.url(), "https://example.com/a/b?q=1");
    }

    #[test]
    fn bare_host_gets_scheme() {
        let page = PageContext::parse("news.ycombinator.com/item");
        assert_eq!(page.host(), "news.ycombinator.com");
        assert_eq!(page.url(), "https://news.ycombinator.com/item");
    }

    #[test]
    fn unparseable_input_is_kept() {
        let page = PageContext::parse("not a url");
        assert_eq!(page.url(), "not a url");
    }
}
