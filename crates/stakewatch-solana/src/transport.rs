//! JSON-RPC transport.
//!
//! Sends one JSON-RPC 2.0 request per call over HTTP POST and hands back the
//! envelope's `result` member undecoded. Consumers decode it themselves via
//! [`RawResult::decode`]. There are no retries.

use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use stakewatch_core::Endpoint;
use tracing::{debug, warn};

use crate::error::SolanaRpcError;
use crate::scope::CallScope;

/// Protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id. Calls are never pipelined, so one fixed id is enough.
pub const REQUEST_ID: u64 = 1;

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, SolanaRpcError>;

/// Outgoing JSON-RPC request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a, P: ?Sized> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a P,
}

impl<'a, P: ?Sized> RpcRequest<'a, P> {
    pub fn new(method: &'a str, params: &'a P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: REQUEST_ID,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Box<RawValue>>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    #[serde(default)]
    message: String,
}

/// The undecoded `result` member of a successful response.
#[derive(Debug, Clone)]
pub struct RawResult(Box<RawValue>);

impl RawResult {
    /// Wraps a JSON text. Fails if `json` is not valid JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        RawValue::from_string(json.to_owned())
            .map(Self)
            .map_err(|e| SolanaRpcError::protocol(e, json))
    }

    /// The raw JSON text.
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Decodes the payload into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(self.0.get()).map_err(|e| SolanaRpcError::protocol(e, self.0.get()))
    }
}

/// Something that can perform a JSON-RPC call within a [`CallScope`].
pub trait RpcSend {
    /// Sends `method` with `params` (which must serialize to a JSON array)
    /// and returns the raw `result`.
    fn send<P>(
        &self,
        method: &str,
        params: &P,
        scope: &CallScope,
    ) -> impl Future<Output = Result<RawResult>> + Send
    where
        P: Serialize + Sync + ?Sized;
}

/// HTTP JSON-RPC transport bound to an [`Endpoint`].
#[derive(Clone)]
pub struct RpcTransport {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl std::fmt::Debug for RpcTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcTransport")
            .field("rpc_url", &self.endpoint.get())
            .finish()
    }
}

impl RpcTransport {
    /// Creates a transport for the given endpoint with a default HTTP client.
    pub fn new(endpoint: Endpoint) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Creates a transport that reuses an existing HTTP client.
    pub fn with_client(client: reqwest::Client, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    /// The endpoint handle. Calling [`Endpoint::set`] on it retargets this
    /// transport for subsequent calls.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn exchange(&self, url: &str, body: Vec<u8>) -> Result<(StatusCode, String)> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }
}

impl RpcSend for RpcTransport {
    async fn send<P>(&self, method: &str, params: &P, scope: &CallScope) -> Result<RawResult>
    where
        P: Serialize + Sync + ?Sized,
    {
        if method.is_empty() {
            return Err(SolanaRpcError::Serialization(
                "method name must not be empty".into(),
            ));
        }
        let body = serde_json::to_vec(&RpcRequest::new(method, params))
            .map_err(|e| SolanaRpcError::Serialization(e.to_string()))?;

        let url = self.endpoint.get();
        debug!(method, %url, "sending JSON-RPC request");

        // Dropping the exchange future aborts the HTTP request.
        let (status, text) = tokio::select! {
            biased;
            _ = scope.cancelled() => {
                warn!(method, "JSON-RPC request cancelled");
                return Err(SolanaRpcError::Cancelled);
            }
            _ = tokio::time::sleep_until(scope.deadline()) => {
                warn!(method, "JSON-RPC request exceeded deadline");
                return Err(SolanaRpcError::Timeout);
            }
            exchange = self.exchange(&url, body) => exchange?,
        };

        debug!(method, status = status.as_u16(), "received JSON-RPC response");
        decode_envelope(status, text)
    }
}

/// Checks the status and extracts `result` from a response body.
pub(crate) fn decode_envelope(status: StatusCode, body: String) -> Result<RawResult> {
    if status != StatusCode::OK {
        return Err(SolanaRpcError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    let envelope: RpcEnvelope = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) => return Err(SolanaRpcError::protocol(e, body)),
    };

    if let Some(error) = envelope.error {
        return Err(SolanaRpcError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    envelope
        .result
        .map(RawResult)
        .ok_or_else(|| SolanaRpcError::protocol("missing result field", body))
}
