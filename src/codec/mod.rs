//! Record codec module
//!
//! Handles the two presentation-format concerns of the bridge:
//!
//! - `record_format` - encoding logical records into the 75-character
//!   fixed-width layout the dataset access method expects
//! - `command_scan` - extracting payment command frames out of the
//!   unstructured, line-oriented printer output
//!
//! All functions are pure (no I/O) for easy testing.

pub mod command_scan;
pub mod record_format;

pub use command_scan::{decode_commands, COMMAND_MARKER};
pub use record_format::{encode_balance, encode_control, encode_transaction};
