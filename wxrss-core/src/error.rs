use thiserror::Error;

/// Errors surfaced by feed retrieval and caching.
///
/// Structural parse failures are deliberately not represented here: a feed
/// that is present but malformed is reported through
/// [`FeedStatus::ParseError`](crate::model::FeedStatus), so callers can show
/// a diagnostic without treating it as a hard failure.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;
