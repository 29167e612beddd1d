//! Blocking JSON-RPC wallet gateway
//!
//! Production implementation of [`WalletGateway`] against a Dogecoin-style
//! wallet node: JSON-RPC 1.0 over HTTP POST with basic auth. This crate is
//! the live HTTP adapter, so the client is the blocking one - the bridge is
//! single-threaded and every call is synchronous with respect to the sync
//! cycle.

use crate::core::WalletGateway;
use crate::types::{BridgeError, WalletTransaction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Maximum entries requested from `listtransactions`
///
/// Comfortably above the dataset capacity; the windowing policy in the
/// script builder handles anything beyond it.
const LIST_FETCH_LIMIT: u32 = 10_000;

/// Connection parameters for the wallet node
///
/// Supplied by the external caller and treated as opaque credentials.
#[derive(Debug, Clone)]
pub struct RpcCredentials {
    /// Wallet node hostname
    pub host: String,
    /// Wallet RPC port
    pub port: u16,
    /// RPC username
    pub user: String,
    /// RPC password
    pub password: String,
}

/// JSON-RPC 1.0 request body
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'a str,
    params: serde_json::Value,
}

/// Error object inside a JSON-RPC response
#[derive(Debug, Deserialize)]
struct RpcFault {
    code: i64,
    message: String,
}

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    error: Option<RpcFault>,
}

/// Wallet gateway over blocking HTTP
pub struct JsonRpcWallet {
    credentials: RpcCredentials,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl JsonRpcWallet {
    /// Create a gateway for one wallet node
    pub fn new(credentials: RpcCredentials) -> Self {
        let endpoint = format!("http://{}:{}/", credentials.host, credentials.port);
        JsonRpcWallet {
            credentials,
            endpoint,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Perform one RPC call and decode the `result` field
    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, BridgeError> {
        let body = RpcRequest {
            jsonrpc: "1.0",
            id: "doge-vsam-bridge",
            method,
            params,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .json(&body)
            .send()
            .map_err(|e| BridgeError::rpc(method, e.to_string()))?;

        // Wallet nodes answer application errors with a non-2xx status and
        // an error object in the body, so decode before checking status.
        let envelope: RpcEnvelope = response
            .json()
            .map_err(|e| BridgeError::rpc(method, e.to_string()))?;

        if let Some(fault) = envelope.error {
            return Err(BridgeError::rpc_rejected(method, fault.code, fault.message));
        }

        serde_json::from_value(envelope.result).map_err(|e| BridgeError::rpc(method, e.to_string()))
    }
}

impl WalletGateway for JsonRpcWallet {
    fn confirmed_balance(&self) -> Result<Decimal, BridgeError> {
        self.call("getbalance", json!([]))
    }

    fn unconfirmed_balance(&self) -> Result<Decimal, BridgeError> {
        self.call("getunconfirmedbalance", json!([]))
    }

    fn list_transactions(&self) -> Result<Vec<WalletTransaction>, BridgeError> {
        self.call("listtransactions", json!(["*", LIST_FETCH_LIMIT]))
    }

    fn send_to_address(&self, address: &str, amount: Decimal) -> Result<String, BridgeError> {
        // The wire format carries the amount as a JSON number.
        let value = amount
            .to_f64()
            .ok_or_else(|| BridgeError::unrepresentable_amount(amount.to_string()))?;
        self.call("sendtoaddress", json!([address, value]))
    }
}
