use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScholarError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid {field} marker \"{selector}\": {reason}")]
    InvalidMarker {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("profile extraction aborted: {0}")]
    ExtractionAborted(String),
}
