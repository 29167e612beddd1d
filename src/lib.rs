//! Doge VSAM Bridge Library
//! # Overview
//!
//! This library bridges a Dogecoin-style wallet node (JSON-RPC) with a batch
//! mainframe environment that consumes a 75-byte fixed-width keyed dataset
//! and communicates over two raw socket channels: a job-submission channel
//! (card reader) and a printer-output channel.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (DatasetRecord, Snapshot, PaymentCommand, etc.)
//! - [`codec`] - Fixed-width record encoding and printer command extraction
//! - [`core`] - Business logic components:
//!   - [`core::script`] - IDCAMS job generation and record-count windowing
//!   - [`core::change`] - Whole-snapshot change gate
//!   - [`core::engine`] - Per-cycle orchestration (fetch, gate, build, submit, relay)
//! - [`net`] - Socket transports for job submission and printer polling
//! - [`rpc`] - Blocking JSON-RPC wallet gateway
//! - [`cli`] - CLI arguments parsing
//!
//! # Sync Cycle
//!
//! Each cycle performs, strictly in order:
//!
//! 1. Fetch wallet state (balances plus transaction list) over JSON-RPC
//! 2. Encode the state into an ordered snapshot of fixed-width records
//! 3. Compare against the previously persisted snapshot text
//! 4. If changed, generate the dataset-rebuild job and submit it
//! 5. Independently, poll the printer channel and relay any payment
//!    commands back to the wallet
//!
//! The bridge is single-threaded and purely sequential; all network I/O is
//! blocking and every transport resource is acquired and released within a
//! single cycle.

// Module declarations
pub mod cli;
pub mod codec;
pub mod core;
pub mod net;
pub mod rpc;
pub mod types;

pub use crate::core::{
    has_new_records, BridgeEngine, CommandSource, DatasetScriptBuilder, ScriptSubmitter,
    SyncOutcome, WalletGateway, MAX_RECORDS,
};
pub use codec::{decode_commands, encode_balance, encode_control, encode_transaction};
pub use net::{CommandPoller, JobSubmission, SystemClock};
pub use types::{
    BalanceSlot, BridgeError, DatasetRecord, PaymentCommand, Snapshot, WalletTransaction,
    RECORD_LEN,
};
