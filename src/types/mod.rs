//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Fixed-width dataset record and snapshot types
//! - `command`: Payment commands parsed from printer output
//! - `error`: Error types for the bridge

pub mod command;
pub mod error;
pub mod record;

pub use command::PaymentCommand;
pub use error::BridgeError;
pub use record::{
    BalanceSlot, DatasetRecord, Snapshot, WalletTransaction, AVAILABLE_KEY, CONTROL_KEY,
    PENDING_KEY, RECORD_LEN,
};
