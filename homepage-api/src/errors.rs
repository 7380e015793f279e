use thiserror::Error;

/// Failures of a blog API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("server reported success without a response body")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, ApiError>;
