use reqwest::StatusCode;

/// All failure modes of a collection run.
///
/// Nothing is recovered locally: every variant propagates to `main`, which
/// logs it and exits non-zero. The two upstream array fields (`hours`,
/// `data`) are deliberately *not* represented here; when one is missing the
/// extraction yields an empty sequence instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Process configuration is unusable, detected at startup before any
    /// request is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never produced an HTTP status (connect failure, timeout).
    #[error("request to {endpoint} failed: {source}")]
    UpstreamTransport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream endpoint answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    UpstreamRequest {
        endpoint: &'static str,
        status: StatusCode,
    },

    /// The response body is not valid JSON.
    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to write output document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize output document: {0}")]
    Serialize(#[from] serde_json::Error),
}
