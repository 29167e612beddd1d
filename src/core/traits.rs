//! Core traits for the wallet gateway and socket transports
//!
//! This module defines the capability seams of the bridge. Every external
//! collaborator - the wallet node, the job-submission channel, the printer
//! channel and the wall clock - is modeled as a trait so the core logic can
//! be driven by in-memory fakes, scripted byte sources and a deterministic
//! clock in tests.

use crate::types::{BridgeError, PaymentCommand, WalletTransaction};
use rust_decimal::Decimal;
use std::io::Read;
use std::time::Duration;

/// The wallet node's RPC surface, as consumed by the bridge
///
/// Four logical calls; authentication and transport details belong to the
/// implementation. The production implementation is
/// [`crate::rpc::JsonRpcWallet`]; tests substitute an in-memory fake.
pub trait WalletGateway {
    /// Confirmed wallet balance
    fn confirmed_balance(&self) -> Result<Decimal, BridgeError>;

    /// Unconfirmed (pending) wallet balance
    fn unconfirmed_balance(&self) -> Result<Decimal, BridgeError>;

    /// Wallet transaction history
    fn list_transactions(&self) -> Result<Vec<WalletTransaction>, BridgeError>;

    /// Send an outbound payment; returns the transaction identifier
    fn send_to_address(&self, address: &str, amount: Decimal) -> Result<String, BridgeError>;
}

/// Delivery of a generated job script to the mainframe
///
/// One connection, one complete send, unconditional close - no retries.
pub trait ScriptSubmitter {
    /// Submit the complete script text
    fn submit(&self, script: &str) -> Result<(), BridgeError>;
}

/// A bounded poll of the printer channel for payment commands
pub trait CommandSource {
    /// Poll for commands until drained or `timeout` elapses
    fn poll(&self, timeout: Duration) -> Result<Vec<PaymentCommand>, BridgeError>;
}

/// Monotonic clock capability
///
/// The poller's timeout is enforced by wall-clock comparison, not by a
/// platform socket timeout, so the clock is injectable: production uses
/// [`crate::net::SystemClock`], tests use a scripted clock.
pub trait Clock {
    /// A reading on a monotonic timeline (origin is implementation-defined)
    fn monotonic(&self) -> Duration;

    /// Yield between receive attempts while the channel is idle
    fn pause(&self, duration: Duration);
}

/// Chunk-wise byte source, the receive half of a socket
///
/// Blanket-implemented for every [`std::io::Read`], which covers
/// `TcpStream` in production and scripted in-memory sources in tests.
pub trait ChunkRead {
    /// Read up to `buf.len()` bytes; `Ok(0)` means end of stream
    fn read_chunk(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
}

impl<T: Read> ChunkRead for T {
    fn read_chunk(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.read(buf)
    }
}
