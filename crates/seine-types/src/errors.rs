//! Error types shared across the workspace boundary.

use thiserror::Error;

/// Failure of a single page retrieval.
///
/// The crawler treats every variant the same way (log, skip, continue), but
/// keeping them distinct makes fetch-layer tests and logs precise.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connect or read deadline exceeded.
    #[error("request timed out")]
    Timeout,

    /// The origin answered with a non-2xx status after redirects.
    #[error("unexpected status {code}")]
    Status { code: u16 },

    /// Connection-level or protocol failure (DNS, TLS, too many redirects,
    /// body decoding).
    #[error("transport error: {message}")]
    Transport { message: String },
}
