//! Transport layer for RPC communication

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use antenna_types::SealedAction;

use crate::SdkError;

/// Remote method names
pub mod methods {
    /// Account metadata, including the pending nonce
    pub const GET_ACCOUNT: &str = "getAccount";
    /// Gas estimate for a sealed draft action
    pub const ESTIMATE_ACTION_GAS: &str = "estimateActionGas";
    /// Suggested gas price
    pub const SUGGEST_GAS_PRICE: &str = "suggestGasPrice";
    /// Submit a sealed action
    pub const SEND_ACTION: &str = "sendAction";
    /// Receipt lookup by action hash
    pub const GET_RECEIPT_BY_ACTION: &str = "getReceiptByAction";
    /// Read-only contract call
    pub const READ_CONTRACT: &str = "readContract";
    /// Log query
    pub const GET_LOGS: &str = "getLogs";
}

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request and get JSON response
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError>;
}

/// One request seen by a [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Method name
    pub method: String,
    /// Parameters as sent
    pub params: Vec<Value>,
}

enum Canned {
    Value(Value),
    Error { code: i64, message: String },
}

/// Mock transport for testing.
///
/// Answers every ledger method with a plausible default, lets tests override
/// single methods with a value or an error, and records each request in order.
/// `sendAction` answers with the hash of the action it was given.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Canned>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a mock response for a specific method
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread panicked while holding the lock).
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), Canned::Value(response));
    }

    /// Make a method fail with an RPC error
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_error(&self, method: &str, code: i64, message: &str) {
        self.responses.lock().expect("MockTransport mutex poisoned").insert(
            method.to_string(),
            Canned::Error {
                code,
                message: message.to_string(),
            },
        );
    }

    /// Clear custom responses
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
    }

    /// Every request so far, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("MockTransport mutex poisoned").clone()
    }

    /// Method names of every request so far, oldest first
    pub fn methods_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    /// How many times `method` was requested
    pub fn call_count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }

    fn default_response(method: &str, params: &[Value]) -> Result<Value, SdkError> {
        let first = params.first().and_then(Value::as_str).unwrap_or_default();
        let response = match method {
            methods::GET_ACCOUNT => json!({
                "address": first,
                "balance": "1000000000000000000",
                "nonce": 0,
                "pendingNonce": 1,
            }),
            methods::ESTIMATE_ACTION_GAS => json!({ "gas": 10000 }),
            methods::SUGGEST_GAS_PRICE => json!({ "gasPrice": 1_000_000_000_000u64 }),
            methods::SEND_ACTION => {
                let bytes = hex::decode(first)?;
                let sealed = SealedAction::from_bytes(&bytes)?;
                json!({ "actionHash": sealed.hash().encode_hex() })
            }
            methods::GET_RECEIPT_BY_ACTION => json!({
                "receipt": {
                    "status": 1,
                    "blkHeight": 1,
                    "actHash": first,
                    "gasConsumed": 10000,
                    "contractAddress": "",
                    "logs": [],
                }
            }),
            methods::READ_CONTRACT => json!({ "data": "" }),
            methods::GET_LOGS => json!({ "logs": [] }),
            _ => {
                return Err(SdkError::Rpc {
                    code: -32601,
                    message: format!("Method not found: {}", method),
                })
            }
        };
        Ok(response)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        self.calls
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .push(RecordedCall {
                method: method.to_string(),
                params: params.clone(),
            });

        // Check custom responses first
        let custom = {
            let responses = self
                .responses
                .lock()
                .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?;
            match responses.get(method) {
                Some(Canned::Value(v)) => Some(Ok(v.clone())),
                Some(Canned::Error { code, message }) => Some(Err(SdkError::Rpc {
                    code: *code,
                    message: message.clone(),
                })),
                None => None,
            }
        };

        match custom {
            Some(response) => response,
            None => Self::default_response(method, &params),
        }
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create a transport whose requests give up after `timeout`
    pub fn with_timeout(url: &str, timeout: std::time::Duration) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Config(e.to_string()))?;
        Ok(Self::with_client(client, url))
    }

    fn with_client(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        let id = self.next_id();
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::trace!(method, id, "rpc request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
