//! Error types for the Doge VSAM Bridge
//!
//! This module defines all error types that can occur during a sync cycle.
//! Errors are designed to be descriptive and user-friendly for log output.
//!
//! # Error Categories
//!
//! - **RPC Errors**: wallet node unreachable, malformed response, or an
//!   error object returned by the node
//! - **Transport Errors**: connect/send/receive failures on the
//!   job-submission or printer channels
//! - **I/O Errors**: state-file read/write failures in the binary
//!
//! Malformed printer frames and over-capacity record sets are *not* errors:
//! the former are silently skipped, the latter are handled by the
//! deterministic windowing policy.

use thiserror::Error;

/// Main error type for the bridge
///
/// This enum represents all possible failures of a sync cycle. Each variant
/// includes enough context to diagnose the failing collaborator from the
/// log line alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Wallet RPC call failed at the transport or decoding level
    ///
    /// Connectivity failures are fatal for the cycle: no partial snapshot
    /// is emitted and the caller decides whether to retry on the next tick.
    #[error("wallet RPC {method} failed: {message}")]
    Rpc {
        /// RPC method that failed
        method: String,
        /// Description of the failure
        message: String,
    },

    /// Wallet node answered with an error object
    #[error("wallet RPC {method} rejected (code {code}): {message}")]
    RpcRejected {
        /// RPC method that was rejected
        method: String,
        /// Numeric error code from the node
        code: i64,
        /// Error message from the node
        message: String,
    },

    /// Socket-channel failure while submitting a job or opening the printer
    ///
    /// Surfaced to the caller as-is; the core performs no retry.
    #[error("{channel} transport failure: {message}")]
    Transport {
        /// Which channel failed (`job-submission` or `printer-output`)
        channel: &'static str,
        /// Description of the failure
        message: String,
    },

    /// Amount cannot be represented in the wire format of the RPC call
    #[error("amount '{amount}' cannot be represented for RPC transfer")]
    UnrepresentableAmount {
        /// The offending amount, as text
        amount: String,
    },

    /// I/O error occurred while reading or writing the state file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to BridgeError
impl From<std::io::Error> for BridgeError {
    fn from(error: std::io::Error) -> Self {
        BridgeError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BridgeError {
    /// Create an Rpc error
    pub fn rpc(method: &str, message: impl Into<String>) -> Self {
        BridgeError::Rpc {
            method: method.to_string(),
            message: message.into(),
        }
    }

    /// Create an RpcRejected error
    pub fn rpc_rejected(method: &str, code: i64, message: impl Into<String>) -> Self {
        BridgeError::RpcRejected {
            method: method.to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a Transport error
    pub fn transport(channel: &'static str, message: impl Into<String>) -> Self {
        BridgeError::Transport {
            channel,
            message: message.into(),
        }
    }

    /// Create an UnrepresentableAmount error
    pub fn unrepresentable_amount(amount: impl Into<String>) -> Self {
        BridgeError::UnrepresentableAmount {
            amount: amount.into(),
        }
    }
}
