//! Payment commands parsed from printer output
//!
//! The mainframe side requests outbound payments by printing a marker line
//! on its printer channel. The poller extracts these into [`PaymentCommand`]
//! values, which live only for the duration of one poll-and-relay pass.

use rust_decimal::Decimal;

/// One outbound payment request extracted from printer text
///
/// Parsed from a frame of the form `DOGECICS99 <address> <amount>`.
/// Ephemeral: relayed to the wallet node and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCommand {
    /// Destination wallet address, exactly as printed
    pub address: String,

    /// Requested amount, parsed from the decimal token
    pub amount: Decimal,
}

impl PaymentCommand {
    /// Create a payment command
    pub fn new(address: impl Into<String>, amount: Decimal) -> Self {
        PaymentCommand {
            address: address.into(),
            amount,
        }
    }
}
