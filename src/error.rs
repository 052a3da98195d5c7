//! Errors raised while talking to the banking backend

/// Failure of a single backend call
///
/// Every variant collapses into one banner message through `Display`; the
/// console does not distinguish validation, authorization or server faults.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout...)
    #[error("Request failed: {0}")]
    Request(String),
    /// The backend answered with a non-2xx status
    #[error("Request failed with status code {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected shape
    #[error("Could not read server response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
