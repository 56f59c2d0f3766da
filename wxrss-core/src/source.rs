use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::FeedResult;
use crate::model::FeedStatus;

/// External HTTP collaborator: one blocking GET returning the raw body.
///
/// Retry and timeout policy belong to the implementation, not to
/// [`FeedSource`].
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient {
    fn get(&self, url: &str) -> FeedResult<Vec<u8>>;
}

/// Default [`HttpClient`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestHttp {
    client: reqwest::blocking::Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
        }
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttp {
    fn get(&self, url: &str) -> FeedResult<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

/// Retrieval state owned by a [`FeedSource`]: the raw feed bytes, if any,
/// and the coarse status.
#[derive(Debug, Default)]
struct FeedState {
    raw_content: Option<Vec<u8>>,
    status: FeedStatus,
}

/// Supplies raw feed content from a cache file or a live fetch.
///
/// A `FeedSource` serves a single location; callers fetching several
/// locations concurrently must use one instance per location. Status starts
/// as [`FeedStatus::Unavailable`] and only changes via a successful
/// [`fetch`](FeedSource::fetch) or via [`set_status`](FeedSource::set_status)
/// when the caller applies an extraction outcome.
#[derive(Debug)]
pub struct FeedSource<H = ReqwestHttp> {
    http: H,
    state: FeedState,
}

impl FeedSource<ReqwestHttp> {
    pub fn new() -> Self {
        Self::with_http(ReqwestHttp::new())
    }
}

impl Default for FeedSource<ReqwestHttp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HttpClient> FeedSource<H> {
    pub fn with_http(http: H) -> Self {
        Self {
            http,
            state: FeedState::default(),
        }
    }

    /// Issues a blocking GET and stores the body as the raw content.
    ///
    /// Transport failures propagate unchanged; the state is untouched on
    /// error.
    pub fn fetch(&mut self, url: &str) -> FeedResult<()> {
        debug!("fetching feed from {url}");
        let body = self.http.get(url)?;
        self.state.raw_content = Some(body);
        self.state.status = FeedStatus::Fetched;
        Ok(())
    }

    /// Reads the whole cache file into the raw content. No parsing is
    /// performed and the status is left unchanged.
    pub fn load_from_cache(&mut self, path: &Path) -> FeedResult<()> {
        let content = fs::read(path)?;
        debug!("loaded {} bytes from {}", content.len(), path.display());
        self.state.raw_content = Some(content);
        Ok(())
    }

    /// Overwrites the cache file with `content`. The file handle is released
    /// on all exit paths, including write failure.
    pub fn save_to_cache(&self, path: &Path, content: &[u8]) -> FeedResult<()> {
        fs::write(path, content)?;
        Ok(())
    }

    pub fn raw_content(&self) -> Option<&[u8]> {
        self.state.raw_content.as_deref()
    }

    pub fn status(&self) -> FeedStatus {
        self.state.status
    }

    /// Applies an extraction outcome reported back by the caller.
    pub fn set_status(&mut self, status: FeedStatus) {
        self.state.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;

    #[test]
    fn fetch_stores_body_and_marks_fetched() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .withf(|url| url == "http://example.test/feed")
            .returning(|_| Ok(b"<rss></rss>".to_vec()));

        let mut source = FeedSource::with_http(http);
        assert_eq!(source.status(), FeedStatus::Unavailable);

        source.fetch("http://example.test/feed").expect("fetch succeeds");
        assert_eq!(source.status(), FeedStatus::Fetched);
        assert_eq!(source.raw_content(), Some(b"<rss></rss>".as_slice()));
    }

    #[test]
    fn fetch_failure_propagates_and_leaves_state_untouched() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .returning(|_| Err(FeedError::Io(std::io::Error::other("connection reset"))));

        let mut source = FeedSource::with_http(http);
        let err = source.fetch("http://example.test/feed").unwrap_err();

        assert!(err.to_string().contains("connection reset"));
        assert_eq!(source.status(), FeedStatus::Unavailable);
        assert!(source.raw_content().is_none());
    }

    #[test]
    fn cache_round_trip_is_byte_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ls13.rss");
        let content = b"<rss><channel><item/></channel></rss>";

        let mut source = FeedSource::new();
        source.save_to_cache(&path, content).expect("save succeeds");
        source.load_from_cache(&path).expect("load succeeds");

        assert_eq!(source.raw_content(), Some(content.as_slice()));
        // Loading from cache does not mark the feed as fetched.
        assert_eq!(source.status(), FeedStatus::Unavailable);
    }

    #[test]
    fn load_from_missing_cache_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut source = FeedSource::new();

        let err = source.load_from_cache(&dir.path().join("absent.rss")).unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
        assert!(source.raw_content().is_none());
    }

    #[test]
    fn caller_applies_extraction_outcome() {
        let mut source = FeedSource::new();
        source.set_status(FeedStatus::ParseError);
        assert_eq!(source.status(), FeedStatus::ParseError);

        source.set_status(FeedStatus::Ok);
        assert_eq!(source.status(), FeedStatus::Ok);
    }
}
