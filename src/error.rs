use reqwest::StatusCode;
use thiserror::Error;

/// Failures from calls to the remote catalog API.
///
/// These never crash a screen: each one is logged and shown as a status
/// notice, and the submission state machine returns to idle.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, TLS, decode).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server rejected the request ({0})")]
    Rejected(StatusCode),
}
