//! Per-cycle orchestration
//!
//! This module provides the BridgeEngine that runs one sync cycle:
//! fetch wallet state, encode it into a snapshot, gate on the previous
//! snapshot text, and when warranted build and submit the dataset-rebuild
//! job. The poll-and-relay pass over the printer channel is independent
//! and exposed separately.
//!
//! The engine owns no transport resources and holds no state across
//! cycles; the previously persisted snapshot text is supplied by the
//! caller and the new text is handed back for persistence.

use crate::codec::{encode_balance, encode_control, encode_transaction};
use crate::core::change::has_new_records;
use crate::core::script::DatasetScriptBuilder;
use crate::core::traits::{CommandSource, ScriptSubmitter, WalletGateway};
use crate::types::{BalanceSlot, BridgeError, Snapshot};
use std::time::Duration;
use tracing::{debug, info};

/// First sequence key for transaction records
///
/// Keys `0000000001` and `0000000002` are the reserved balance slots.
const FIRST_TRANSACTION_SEQUENCE: u64 = 3;

/// Result of one sync cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Serialized snapshot text, to be persisted by the caller
    pub serialized: String,

    /// Whether a rebuild job was actually submitted this cycle
    pub submitted: bool,
}

/// Orchestrates the sync cycle against injected collaborators
///
/// Generic over the wallet gateway and script submitter so the full cycle
/// is testable with in-memory fakes.
pub struct BridgeEngine<'a, G, S>
where
    G: WalletGateway,
    S: ScriptSubmitter,
{
    gateway: &'a G,
    submitter: &'a S,
    builder: DatasetScriptBuilder,
}

impl<'a, G, S> BridgeEngine<'a, G, S>
where
    G: WalletGateway,
    S: ScriptSubmitter,
{
    /// Create an engine for one dataset
    pub fn new(gateway: &'a G, submitter: &'a S, builder: DatasetScriptBuilder) -> Self {
        BridgeEngine {
            gateway,
            submitter,
            builder,
        }
    }

    /// Run one sync cycle
    ///
    /// `previous` is the serialized snapshot text persisted after the last
    /// successful submission (empty on first run). Returns the new
    /// serialized text and whether a job was submitted; the caller persists
    /// the text when `submitted` is true.
    ///
    /// # Errors
    ///
    /// Fatal for the cycle: any wallet RPC failure while fetching state, or
    /// a transport failure while submitting the job. No partial snapshot is
    /// emitted in either case.
    pub fn run_cycle(&self, previous: &str) -> Result<SyncOutcome, BridgeError> {
        let snapshot = self.fetch_snapshot()?;
        let serialized = snapshot.serialize();

        if !has_new_records(previous, &serialized) {
            debug!(records = snapshot.len(), "wallet state unchanged, skipping rebuild");
            return Ok(SyncOutcome {
                serialized,
                submitted: false,
            });
        }

        let script = self.builder.build(snapshot.records(), false);
        self.submitter.submit(&script)?;
        info!(records = snapshot.len(), "dataset rebuild job submitted");

        Ok(SyncOutcome {
            serialized,
            submitted: true,
        })
    }

    /// Poll the printer channel once and relay every command to the wallet
    ///
    /// Returns the transaction identifiers of the relayed payments, in
    /// command order.
    ///
    /// # Errors
    ///
    /// Transport failures from the poller and RPC failures from
    /// `sendtoaddress` are surfaced; commands already relayed before the
    /// failure are not retried.
    pub fn relay_commands<P: CommandSource>(
        &self,
        source: &P,
        timeout: Duration,
    ) -> Result<Vec<String>, BridgeError> {
        let commands = source.poll(timeout)?;
        let mut txids = Vec::with_capacity(commands.len());

        for command in commands {
            let txid = self
                .gateway
                .send_to_address(&command.address, command.amount)?;
            info!(address = %command.address, amount = %command.amount, txid = %txid,
                "relayed payment command");
            txids.push(txid);
        }

        Ok(txids)
    }

    /// Fetch wallet state and encode it as an ordered snapshot
    ///
    /// Snapshot order: Available balance, Pending balance, transactions in
    /// timestamp order keyed from `0000000003` upward, Control record last.
    fn fetch_snapshot(&self) -> Result<Snapshot, BridgeError> {
        let confirmed = self.gateway.confirmed_balance()?;
        let pending = self.gateway.unconfirmed_balance()?;
        let mut transactions = self.gateway.list_transactions()?;
        transactions.sort_by_key(|t| t.timestamp);

        let mut records = Vec::with_capacity(transactions.len() + 3);
        records.push(encode_balance(confirmed, BalanceSlot::Available));
        records.push(encode_balance(pending, BalanceSlot::Pending));
        for (index, tx) in transactions.iter().enumerate() {
            records.push(encode_transaction(
                index as u64 + FIRST_TRANSACTION_SEQUENCE,
                &tx.address,
                tx.label.as_deref().unwrap_or(""),
                tx.amount,
            ));
        }
        records.push(encode_control());

        Ok(Snapshot::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentCommand, WalletTransaction, RECORD_LEN};
    use rust_decimal::Decimal;
    use std::cell::RefCell;
    use std::str::FromStr;

    struct FakeWallet {
        confirmed: Decimal,
        pending: Decimal,
        transactions: Vec<WalletTransaction>,
        sent: RefCell<Vec<(String, Decimal)>>,
    }

    impl FakeWallet {
        fn new(confirmed: &str, pending: &str) -> Self {
            FakeWallet {
                confirmed: Decimal::from_str(confirmed).unwrap(),
                pending: Decimal::from_str(pending).unwrap(),
                transactions: Vec::new(),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn with_transaction(mut self, timestamp: i64, address: &str, amount: &str) -> Self {
            self.transactions.push(WalletTransaction {
                timestamp,
                address: address.to_string(),
                amount: Decimal::from_str(amount).unwrap(),
                label: None,
            });
            self
        }
    }

    impl WalletGateway for FakeWallet {
        fn confirmed_balance(&self) -> Result<Decimal, BridgeError> {
            Ok(self.confirmed)
        }

        fn unconfirmed_balance(&self) -> Result<Decimal, BridgeError> {
            Ok(self.pending)
        }

        fn list_transactions(&self) -> Result<Vec<WalletTransaction>, BridgeError> {
            Ok(self.transactions.clone())
        }

        fn send_to_address(&self, address: &str, amount: Decimal) -> Result<String, BridgeError> {
            self.sent.borrow_mut().push((address.to_string(), amount));
            Ok(format!("txid-{}", self.sent.borrow().len()))
        }
    }

    struct CapturingSubmitter {
        scripts: RefCell<Vec<String>>,
    }

    impl CapturingSubmitter {
        fn new() -> Self {
            CapturingSubmitter {
                scripts: RefCell::new(Vec::new()),
            }
        }
    }

    impl ScriptSubmitter for CapturingSubmitter {
        fn submit(&self, script: &str) -> Result<(), BridgeError> {
            self.scripts.borrow_mut().push(script.to_string());
            Ok(())
        }
    }

    struct FailingSubmitter;

    impl ScriptSubmitter for FailingSubmitter {
        fn submit(&self, _script: &str) -> Result<(), BridgeError> {
            Err(BridgeError::transport("job-submission", "connection refused"))
        }
    }

    struct ScriptedSource {
        commands: Vec<PaymentCommand>,
    }

    impl CommandSource for ScriptedSource {
        fn poll(&self, _timeout: Duration) -> Result<Vec<PaymentCommand>, BridgeError> {
            Ok(self.commands.clone())
        }
    }

    fn builder() -> DatasetScriptBuilder {
        DatasetScriptBuilder::new("herc01", "cul8tr", "doge.coins", "pub001")
    }

    #[test]
    fn test_first_cycle_submits_and_returns_snapshot_text() {
        let wallet = FakeWallet::new("1000.5", "50")
            .with_transaction(100, "nAAA", "10")
            .with_transaction(200, "nBBB", "-2.5");
        let submitter = CapturingSubmitter::new();
        let engine = BridgeEngine::new(&wallet, &submitter, builder());

        let outcome = engine.run_cycle("").unwrap();

        assert!(outcome.submitted);
        // 2 balance + 2 transactions + control
        assert_eq!(outcome.serialized.lines().count(), 5);
        assert!(outcome.serialized.lines().all(|l| l.len() == RECORD_LEN));

        let scripts = submitter.scripts.borrow();
        assert_eq!(scripts.len(), 1);
        for line in outcome.serialized.lines() {
            assert!(scripts[0].contains(line));
        }
    }

    #[test]
    fn test_unchanged_state_skips_submission() {
        let wallet = FakeWallet::new("1000.5", "50").with_transaction(100, "nAAA", "10");
        let submitter = CapturingSubmitter::new();
        let engine = BridgeEngine::new(&wallet, &submitter, builder());

        let first = engine.run_cycle("").unwrap();
        assert!(first.submitted);

        let second = engine.run_cycle(&first.serialized).unwrap();
        assert!(!second.submitted);
        assert_eq!(second.serialized, first.serialized);
        assert_eq!(submitter.scripts.borrow().len(), 1);
    }

    #[test]
    fn test_transactions_are_ordered_by_timestamp() {
        let wallet = FakeWallet::new("0", "0")
            .with_transaction(300, "nLATE", "3")
            .with_transaction(100, "nEARLY", "1");
        let submitter = CapturingSubmitter::new();
        let engine = BridgeEngine::new(&wallet, &submitter, builder());

        let outcome = engine.run_cycle("").unwrap();
        let lines: Vec<&str> = outcome.serialized.lines().collect();

        // Sequence 3 goes to the earliest transaction.
        assert!(lines[2].starts_with("0000000003"));
        assert!(lines[2].contains("nEARLY"));
        assert!(lines[3].starts_with("0000000004"));
        assert!(lines[3].contains("nLATE"));
    }

    #[test]
    fn test_snapshot_ends_with_control_record() {
        let wallet = FakeWallet::new("1", "0");
        let submitter = CapturingSubmitter::new();
        let engine = BridgeEngine::new(&wallet, &submitter, builder());

        let outcome = engine.run_cycle("").unwrap();
        assert!(outcome.serialized.lines().last().unwrap().starts_with("9999999999"));
    }

    #[test]
    fn test_submit_failure_surfaces_as_transport_error() {
        let wallet = FakeWallet::new("1", "0");
        let engine = BridgeEngine::new(&wallet, &FailingSubmitter, builder());

        let error = engine.run_cycle("").unwrap_err();
        assert!(matches!(error, BridgeError::Transport { channel: "job-submission", .. }));
    }

    #[test]
    fn test_relay_sends_each_command_in_order() {
        let wallet = FakeWallet::new("1", "0");
        let submitter = CapturingSubmitter::new();
        let engine = BridgeEngine::new(&wallet, &submitter, builder());
        let source = ScriptedSource {
            commands: vec![
                PaymentCommand::new("nABC", Decimal::from_str("250.75").unwrap()),
                PaymentCommand::new("nDEF", Decimal::from_str("1").unwrap()),
            ],
        };

        let txids = engine.relay_commands(&source, Duration::from_secs(2)).unwrap();

        assert_eq!(txids, vec!["txid-1", "txid-2"]);
        let sent = wallet.sent.borrow();
        assert_eq!(sent[0].0, "nABC");
        assert_eq!(sent[1].0, "nDEF");
    }

    #[test]
    fn test_relay_with_no_commands_sends_nothing() {
        let wallet = FakeWallet::new("1", "0");
        let submitter = CapturingSubmitter::new();
        let engine = BridgeEngine::new(&wallet, &submitter, builder());
        let source = ScriptedSource { commands: vec![] };

        let txids = engine.relay_commands(&source, Duration::from_secs(2)).unwrap();
        assert!(txids.is_empty());
        assert!(wallet.sent.borrow().is_empty());
    }
}
