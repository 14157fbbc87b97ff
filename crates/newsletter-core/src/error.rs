use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} for URL: {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure category, for callers that only need to branch on where a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    HttpStatus,
    Parse,
    Config,
    Output,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::HttpStatus { .. } => ErrorKind::HttpStatus,
            Error::FeedParse(_) => ErrorKind::Parse,
            Error::Config(_) | Error::UrlParse(_) => ErrorKind::Config,
            Error::Io(_) | Error::Json(_) => ErrorKind::Output,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message() {
        let err = Error::HttpStatus {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            url: "https://example.com/feed".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::HttpStatus);
        assert_eq!(
            err.to_string(),
            "HTTP 500 Internal Server Error for URL: https://example.com/feed"
        );
    }

    #[test]
    fn test_parse_kind() {
        let err = Error::FeedParse("unexpected end".to_string());
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
