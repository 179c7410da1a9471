//! Mock Solana JSON-RPC server for integration tests.
//!
//! Binds an axum router on `127.0.0.1:0`, answers each method with a scripted
//! reply and records every request body it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A 44-character address used throughout the tests.
pub const ADDRESS: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

pub const ACCOUNT_INFO_ONE_SOL: &str = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1234},"value":{"data":["","base64"],"executable":false,"lamports":1000000000,"owner":"11111111111111111111111111111111","rentEpoch":0}},"id":1}"#;

pub const NO_PROGRAM_ACCOUNTS: &str = r#"{"jsonrpc":"2.0","result":[],"id":1}"#;

pub const ONE_DELEGATED_HALF_SOL: &str = r#"{"jsonrpc":"2.0","result":[{"account":{"data":{"parsed":{"info":{"meta":{"authorized":{"staker":"Stake11111111111111111111111111111111111111","withdrawer":"Stake11111111111111111111111111111111111111"},"lockup":{"custodian":"11111111111111111111111111111111","epoch":0,"unixTimestamp":0},"rentExemptReserve":"2282880"},"stake":{"creditsObserved":1234,"delegation":{"activationEpoch":"123","deactivationEpoch":"18446744073709551615","stake":"500000000","voter":"Vote111111111111111111111111111111111111111"}}},"type":"delegated"},"program":"stake","space":200},"executable":false,"lamports":500000000,"owner":"Stake11111111111111111111111111111111111111","rentEpoch":0},"pubkey":"TESTPUBKEY"}],"id":1}"#;

pub const DELEGATED_AND_INITIALIZED: &str = r#"{"jsonrpc":"2.0","result":[{"account":{"data":{"parsed":{"info":{"meta":{"rentExemptReserve":"2282880"},"stake":{"creditsObserved":1,"delegation":{"activationEpoch":"10","deactivationEpoch":"18446744073709551615","stake":"300000000","voter":"Vote111111111111111111111111111111111111111"}}},"type":"delegated"},"program":"stake","space":200},"lamports":302282880},"pubkey":"DELEGATED"},{"account":{"data":{"parsed":{"info":{"meta":{"rentExemptReserve":"2282880"}},"type":"initialized"},"program":"stake","space":200},"lamports":2282880},"pubkey":"INITIALIZED"}],"id":1}"#;

#[derive(Debug, Clone)]
struct MockReply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Default)]
struct MockRpc {
    replies: Mutex<HashMap<String, MockReply>>,
    requests: Mutex<Vec<Value>>,
}

/// A running mock server. Aborted on drop.
pub struct MockServer {
    pub url: String,
    state: Arc<MockRpc>,
    handle: JoinHandle<()>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockRpc::default());
        let app = Router::new()
            .route("/", post(handle_rpc))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let addr = listener.local_addr().expect("no local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server failed");
        });

        Self {
            url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Answers `method` with HTTP 200 and `body`.
    pub fn reply(&self, method: &str, body: &str) {
        self.reply_with(method, StatusCode::OK, body, Duration::ZERO);
    }

    /// Answers `method` with `status` and `body` after `delay`.
    pub fn reply_with(&self, method: &str, status: StatusCode, body: &str, delay: Duration) {
        self.state.replies.lock().unwrap().insert(
            method.to_string(),
            MockReply {
                status,
                body: body.to_string(),
                delay,
            },
        );
    }

    /// Request bodies received so far, in arrival order.
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn handle_rpc(State(mock): State<Arc<MockRpc>>, Json(request): Json<Value>) -> impl IntoResponse {
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    mock.requests.lock().unwrap().push(request);

    let reply = mock.replies.lock().unwrap().get(&method).cloned();
    match reply {
        Some(reply) => {
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            (
                reply.status,
                [(header::CONTENT_TYPE, "application/json")],
                reply.body,
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            format!("no reply scripted for {method}"),
        ),
    }
}
