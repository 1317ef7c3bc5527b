use thiserror::Error;

/// Unified error type for the covary workspace.
///
/// Wraps upstream fetch failures, malformed-payload conditions, insufficient
/// series overlap, and argument validation errors. Statistics functions never
/// produce an error; they return NaN sentinels for undefined results.
#[derive(Debug, Error)]
pub enum CovaryError {
    /// An upstream request did not succeed, or the response could not be read.
    #[error("{provider} fetch failed: {msg}")]
    Fetch {
        /// Stable provider identifier (e.g. "pageviews", "earthquakes").
        provider: &'static str,
        /// HTTP status code when the upstream answered with a non-success status.
        status: Option<u16>,
        /// Human-readable failure description.
        msg: String,
    },

    /// The response decoded, but a required field was missing or invalid.
    #[error("data issue: {0}")]
    Data(String),

    /// Two fetched series share fewer overlapping time keys than the aligner
    /// requires. Reported per pair, exactly like a fetch failure.
    #[error("insufficient overlap: {found} shared keys (minimum 3)")]
    InsufficientOverlap {
        /// Number of time keys present in both series.
        found: usize,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl CovaryError {
    /// Helper: build a `Fetch` error for a transport-level failure (no status).
    pub fn fetch(provider: &'static str, msg: impl Into<String>) -> Self {
        Self::Fetch {
            provider,
            status: None,
            msg: msg.into(),
        }
    }

    /// Helper: build a `Fetch` error for a non-success HTTP status.
    #[must_use]
    pub fn http_status(provider: &'static str, status: u16) -> Self {
        Self::Fetch {
            provider,
            status: Some(status),
            msg: format!("HTTP {status}"),
        }
    }

    /// Helper: build a `Data` error for a malformed or incomplete payload.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }
}
