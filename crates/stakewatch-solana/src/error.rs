//! Error types for RPC calls and balance resolution.

use thiserror::Error;

/// Errors from a single JSON-RPC exchange or from decoding its result.
#[derive(Debug, Error)]
pub enum SolanaRpcError {
    #[error("JSON serialization error: {0}")]
    Serialization(String),
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("deadline exceeded")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
    #[error("unexpected HTTP status code: {status}, response: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("JSON parsing error: {context}, response: {body}")]
    ProtocolParse { context: String, body: String },
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("error parsing stake value {value:?}: {reason}")]
    ValueParse { value: String, reason: String },
}

impl SolanaRpcError {
    /// True for connection failures, timeouts and cancellation.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout | Self::Cancelled)
    }

    pub(crate) fn protocol(context: impl ToString, body: impl Into<String>) -> Self {
        Self::ProtocolParse {
            context: context.to_string(),
            body: body.into(),
        }
    }
}

/// A failed balance lookup, tagged with the RPC method that failed.
#[derive(Debug, Error)]
#[error("{method} failed: {source}")]
pub struct ResolveError {
    /// The JSON-RPC method whose call or result caused the failure.
    pub method: &'static str,
    #[source]
    pub source: SolanaRpcError,
}

impl ResolveError {
    pub(crate) fn new(method: &'static str, source: SolanaRpcError) -> Self {
        Self { method, source }
    }

    /// The underlying RPC error.
    pub fn kind(&self) -> &SolanaRpcError {
        &self.source
    }
}
