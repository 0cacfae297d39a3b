use thiserror::Error;

/// A page could not be retrieved.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read body of {url}: {reason}")]
    Body { url: String, reason: String },
}

impl NetworkError {
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout {
                url: url.to_string(),
            }
        } else {
            NetworkError::Request {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

/// Input that cannot be turned into a page context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("ticker must not be empty")]
    EmptyTicker,

    #[error("invalid page url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Why a company was skipped during a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
