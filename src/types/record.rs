//! Dataset record and snapshot types
//!
//! The mainframe-side dataset is keyed, fixed-width and 75 bytes per record.
//! A [`DatasetRecord`] wraps one encoded line and guarantees the length
//! invariant; a [`Snapshot`] is the full ordered record set representing
//! wallet state at one sync cycle.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

/// Exact length of every dataset record, in characters
///
/// The define-cluster step advertises `RECORDSIZE(75 75)`, so any deviation
/// makes the repopulate step fail on the mainframe side.
pub const RECORD_LEN: usize = 75;

/// Reserved key of the confirmed-balance record (always the first record)
pub const AVAILABLE_KEY: &str = "0000000001";

/// Reserved key of the unconfirmed-balance record (always the second record)
pub const PENDING_KEY: &str = "0000000002";

/// Reserved key of the control record (always the last logical record)
pub const CONTROL_KEY: &str = "9999999999";

/// The two reserved balance slots at the head of every snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSlot {
    /// Confirmed balance, key `0000000001`, label `Available`
    Available,
    /// Unconfirmed balance, key `0000000002`, label `Pending`
    Pending,
}

impl BalanceSlot {
    /// The reserved dataset key for this slot
    pub fn key(&self) -> &'static str {
        match self {
            BalanceSlot::Available => AVAILABLE_KEY,
            BalanceSlot::Pending => PENDING_KEY,
        }
    }

    /// The label embedded in the record for this slot
    pub fn label(&self) -> &'static str {
        match self {
            BalanceSlot::Available => "Available",
            BalanceSlot::Pending => "Pending",
        }
    }
}

/// One encoded 75-character dataset record
///
/// Constructed only by the codec, which enforces the fixed-column layout:
/// key (10), address (34), label (10), sign (1) and amount (17), separated
/// by single blanks. The wrapped text is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord(String);

impl DatasetRecord {
    /// Wrap an already-formatted line
    ///
    /// Callers outside the codec should go through the `encode_*` functions;
    /// this constructor only asserts the length invariant in debug builds.
    pub(crate) fn from_line(line: String) -> Self {
        debug_assert_eq!(line.chars().count(), RECORD_LEN);
        DatasetRecord(line)
    }

    /// The full 75-character record text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 10-character key column
    pub fn key(&self) -> &str {
        &self.0[..10]
    }

    /// Whether this is the control record (key `9999999999`)
    pub fn is_control(&self) -> bool {
        self.key() == CONTROL_KEY
    }
}

impl fmt::Display for DatasetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The full ordered record set for one sync cycle
///
/// Ordering is part of the contract: [Available, Pending, transaction
/// records in timestamp order, Control]. A snapshot is produced fresh each
/// cycle and never mutated in place - it is only serialized, compared
/// against the previous cycle's text, or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<DatasetRecord>,
}

impl Snapshot {
    /// Create a snapshot from an ordered record set
    pub fn new(records: Vec<DatasetRecord>) -> Self {
        Snapshot { records }
    }

    /// The ordered records
    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    /// Number of records in the snapshot
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newline-joined record text
    ///
    /// This is the persisted sync-state format: the external caller stores
    /// this text and passes it back for comparison on the next cycle.
    pub fn serialize(&self) -> String {
        let lines: Vec<&str> = self.records.iter().map(|r| r.as_str()).collect();
        lines.join("\n")
    }
}

/// One wallet transaction as reported by `listtransactions`
///
/// The signed amount carries direction: negative amounts are outbound
/// payments, positive amounts are received funds. The `label` is free-text
/// and may be absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WalletTransaction {
    /// Unix timestamp the wallet received the transaction
    #[serde(rename = "timereceived", default)]
    pub timestamp: i64,

    /// Destination or origin wallet address
    ///
    /// Generated coinbase entries may omit the address; those encode with
    /// an empty (blank-padded) address column.
    #[serde(default)]
    pub address: String,

    /// Signed transaction amount (negative = outbound)
    pub amount: Decimal,

    /// Optional free-text memo
    #[serde(default)]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_slot_keys_and_labels() {
        assert_eq!(BalanceSlot::Available.key(), "0000000001");
        assert_eq!(BalanceSlot::Pending.key(), "0000000002");
        assert_eq!(BalanceSlot::Available.label(), "Available");
        assert_eq!(BalanceSlot::Pending.label(), "Pending");
    }

    #[test]
    fn test_record_key_and_control_detection() {
        let line = format!("{:<75}", "9999999999 rest");
        let record = DatasetRecord::from_line(line);
        assert_eq!(record.key(), "9999999999");
        assert!(record.is_control());

        let line = format!("{:<75}", "0000000003 rest");
        let record = DatasetRecord::from_line(line);
        assert!(!record.is_control());
    }

    #[test]
    fn test_snapshot_serialize_joins_with_newlines() {
        let records = vec![
            DatasetRecord::from_line(format!("{:<75}", "0000000001 a")),
            DatasetRecord::from_line(format!("{:<75}", "0000000002 b")),
        ];
        let snapshot = Snapshot::new(records);
        let text = snapshot.serialize();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.len() == RECORD_LEN));
    }

    #[test]
    fn test_empty_snapshot_serializes_to_empty_text() {
        let snapshot = Snapshot::new(Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.serialize(), "");
    }

    #[test]
    fn test_wallet_transaction_deserializes_rpc_shape() {
        let json = r#"{
            "timereceived": 1234567890,
            "address": "nYLEKeZtqNSCAhMNKTFpFgZcnvf1DbFiSu",
            "amount": -100.5,
            "label": "rent"
        }"#;
        let tx: WalletTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.timestamp, 1234567890);
        assert_eq!(tx.address, "nYLEKeZtqNSCAhMNKTFpFgZcnvf1DbFiSu");
        assert!(tx.amount.is_sign_negative());
        assert_eq!(tx.label.as_deref(), Some("rent"));
    }

    #[test]
    fn test_wallet_transaction_tolerates_missing_optional_fields() {
        let tx: WalletTransaction = serde_json::from_str(r#"{"amount": 12.0}"#).unwrap();
        assert_eq!(tx.timestamp, 0);
        assert_eq!(tx.address, "");
        assert_eq!(tx.label, None);
    }
}
