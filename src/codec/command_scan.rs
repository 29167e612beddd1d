//! Printer-output command extraction
//!
//! The printer channel carries arbitrary job output; payment commands are
//! the only frames the bridge cares about. A frame is a logical line
//! containing the marker token followed by a wallet address and a decimal
//! amount:
//!
//! ```text
//! DOGECICS99 nYLEKeZtqNSCAhMNKTFpFgZcnvf1DbFiSu 500.00
//! ```
//!
//! Everything else is noise. Malformed or partial frames (marker present
//! but fields missing, or an amount that does not parse) are skipped, never
//! raised: the poller may hand over a buffer whose final frame was split
//! across reads.

use crate::types::PaymentCommand;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Marker token that opens a payment command frame
pub const COMMAND_MARKER: &str = "DOGECICS99";

/// Scan accumulated printer text for payment command frames
///
/// Returns every well-formed command in discovery order: at most one
/// command per marker occurrence, scanning line by line. The scan is
/// tolerant by design - a marker with missing or malformed fields yields
/// nothing and the scan continues.
///
/// # Examples
///
/// ```
/// use doge_vsam_bridge::decode_commands;
///
/// let commands = decode_commands("noise\nDOGECICS99 nABC123 250.75\nnoise");
/// assert_eq!(commands.len(), 1);
/// assert_eq!(commands[0].address, "nABC123");
/// ```
pub fn decode_commands(text: &str) -> Vec<PaymentCommand> {
    let mut commands = Vec::new();

    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            if token != COMMAND_MARKER {
                continue;
            }
            let Some(address) = tokens.next() else {
                // Marker at end of line: partial frame, skip
                break;
            };
            let Some(amount_token) = tokens.next() else {
                break;
            };
            match Decimal::from_str(amount_token) {
                Ok(amount) => commands.push(PaymentCommand::new(address, amount)),
                // Non-decimal amount token: malformed frame, skip
                Err(_) => continue,
            }
        }
    }

    commands
}
