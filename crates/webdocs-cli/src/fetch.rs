//! A minimal HTTP fetcher with conditional-request support, plus a trivial
//! HTML-to-text extractor. The organizer core never calls this directly —
//! this is the reference adapter that calls `ingest` on its behalf, per the
//! fetcher contract: hand `ingest` a record with a non-null `content` mapping.

use reqwest::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};
use webdocs_core::{Error, Result};

/// Outcome of a conditional fetch.
pub enum FetchResult {
    /// The server returned fresh content.
    Fetched {
        html: String,
        etag: Option<String>,
        last_modified: Option<String>,
    },
    /// The server reported 304 Not Modified; no body was transferred.
    NotModified,
}

/// HTTP client used to retrieve a page's raw HTML before extraction.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// A fetcher with a 30-second request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// A fetcher with a caller-supplied request timeout (for tests).
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("webdocs/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(|e| Error::ExternalUnavailable(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch `url`, sending `If-None-Match`/`If-Modified-Since` when the
    /// caller already has a cached `etag`/`last_modified` pair.
    pub async fn fetch(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> Result<FetchResult> {
        let mut request = self.client.get(url);
        if let Some(tag) = etag {
            request = request.header(IF_NONE_MATCH, tag);
        }
        if let Some(lm) = last_modified {
            request = request.header(IF_MODIFIED_SINCE, lm);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::ExternalUnavailable(e.to_string()))?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            info!(url, "resource not modified");
            return Ok(FetchResult::NotModified);
        }

        if !status.is_success() {
            return Err(Error::ExternalUnavailable(format!(
                "fetching {url} returned status {status}"
            )));
        }

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let html = response
            .text()
            .await
            .map_err(|e| Error::ExternalUnavailable(e.to_string()))?;
        debug!(url, bytes = html.len(), "fetched body");

        Ok(FetchResult::Fetched {
            html,
            etag,
            last_modified,
        })
    }
}

/// Strip tags and collapse whitespace. Not a full HTML parser; good enough to
/// turn a page into searchable prose for ingest.
#[must_use]
pub fn extract_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut in_script_or_style = false;
    let lower = html.to_ascii_lowercase();
    for (i, c) in html.char_indices() {
        if c == '<' {
            if lower[i..].starts_with("<script") || lower[i..].starts_with("<style") {
                in_script_or_style = true;
            } else if lower[i..].starts_with("</script") || lower[i..].starts_with("</style") {
                in_script_or_style = false;
            }
            in_tag = true;
        } else if c == '>' {
            in_tag = false;
        } else if !in_tag && !in_script_or_style {
            out.push(c);
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract a page `<title>`, if present.
#[must_use]
pub fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let start = lower.find("<title")?;
    let open_end = lower[start..].find('>')? + start + 1;
    let close = lower[open_end..].find("</title>")? + open_end;
    Some(html[open_end..close].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_strips_tags_and_collapses_whitespace() {
        let html = "<html><body><h1>Hello</h1>\n<p>World   there</p></body></html>";
        assert_eq!(extract_text(html), "Hello World there");
    }

    #[test]
    fn extract_text_drops_script_and_style_content() {
        let html = "<p>Keep</p><script>var x = 1;</script><style>.a{}</style><p>This</p>";
        assert_eq!(extract_text(html), "Keep This");
    }

    #[test]
    fn extract_title_finds_title_tag() {
        let html = "<html><head><title>My Page</title></head><body></body></html>";
        assert_eq!(extract_title(html), Some("My Page".to_string()));
    }

    #[test]
    fn extract_title_absent_returns_none() {
        assert_eq!(extract_title("<html><body>no title</body></html>"), None);
    }

    #[test]
    fn extract_text_preserves_multibyte_characters() {
        let html = "<p>café</p><p>日本語</p>";
        assert_eq!(extract_text(html), "café 日本語");
    }
}
