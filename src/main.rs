//! Doge VSAM Bridge CLI
//!
//! Binary entry point: owns everything the core treats as external - the
//! sync-cycle scheduling loop, the persisted snapshot file, credentials and
//! logging setup.
//!
//! # Usage
//!
//! ```bash
//! doge-vsam-bridge \
//!     --wallet-user rpcuser --wallet-password rpcpass \
//!     --mainframe-user herc01 --mainframe-password cul8tr
//! ```
//!
//! Runs a sync cycle every `--interval` seconds: fetch wallet state, rebuild
//! the dataset when it changed, then poll the printer channel and relay any
//! payment commands. `--once` runs a single cycle and exits.
//!
//! # Exit Codes
//!
//! - 0: Success (with `--once`) or interrupted loop
//! - 1: Cycle failure in `--once` mode

use doge_vsam_bridge::cli;
use doge_vsam_bridge::rpc::{JsonRpcWallet, RpcCredentials};
use doge_vsam_bridge::{BridgeEngine, BridgeError, CommandPoller, DatasetScriptBuilder, JobSubmission};
use std::fs;
use std::process;
use std::thread;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = cli::parse_args();

    let gateway = JsonRpcWallet::new(RpcCredentials {
        host: args.wallet_host.clone(),
        port: args.wallet_port,
        user: args.wallet_user.clone(),
        password: args.wallet_password.clone(),
    });
    let submitter = JobSubmission::new(args.mainframe_host.clone(), args.reader_port);
    let poller = CommandPoller::new(args.mainframe_host.clone(), args.printer_port);
    let builder = DatasetScriptBuilder::new(
        &args.mainframe_user,
        &args.mainframe_password,
        &args.dataset,
        &args.volume,
    );
    let engine = BridgeEngine::new(&gateway, &submitter, builder);

    info!(dataset = %args.dataset, interval = args.interval_secs, "bridge started");

    loop {
        if let Err(e) = run_once(&engine, &poller, &args) {
            error!(error = %e, "sync cycle failed");
            if args.once {
                process::exit(1);
            }
        }

        if args.once {
            break;
        }
        thread::sleep(args.interval());
    }
}

/// One full pass: sync cycle, state persistence, poll-and-relay
fn run_once(
    engine: &BridgeEngine<'_, JsonRpcWallet, JobSubmission>,
    poller: &CommandPoller,
    args: &cli::CliArgs,
) -> Result<(), BridgeError> {
    // The previous snapshot text; absent file means first run.
    let previous = fs::read_to_string(&args.state_file).unwrap_or_default();

    let outcome = engine.run_cycle(&previous)?;
    if outcome.submitted {
        fs::write(&args.state_file, &outcome.serialized)?;
    }

    let txids = engine.relay_commands(poller, args.poll_timeout())?;
    if !txids.is_empty() {
        info!(count = txids.len(), "relayed outbound payments");
    }

    Ok(())
}
