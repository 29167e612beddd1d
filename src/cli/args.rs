use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Sync a wallet node with a mainframe-side keyed dataset
#[derive(Parser, Debug)]
#[command(name = "doge-vsam-bridge")]
#[command(about = "Bridge a Dogecoin wallet node to a mainframe VSAM dataset", long_about = None)]
pub struct CliArgs {
    /// Wallet node hostname
    #[arg(long = "wallet-host", value_name = "HOST", default_value = "127.0.0.1")]
    pub wallet_host: String,

    /// Wallet RPC port
    #[arg(long = "wallet-port", value_name = "PORT", default_value_t = 22555)]
    pub wallet_port: u16,

    /// Wallet RPC username
    #[arg(long = "wallet-user", value_name = "USER")]
    pub wallet_user: String,

    /// Wallet RPC password
    #[arg(long = "wallet-password", value_name = "PASSWORD")]
    pub wallet_password: String,

    /// Mainframe hostname (reader and printer channels)
    #[arg(long = "mainframe-host", value_name = "HOST", default_value = "127.0.0.1")]
    pub mainframe_host: String,

    /// Job-submission (card reader) port
    #[arg(long = "reader-port", value_name = "PORT", default_value_t = 3505)]
    pub reader_port: u16,

    /// Printer-output port
    #[arg(long = "printer-port", value_name = "PORT", default_value_t = 3506)]
    pub printer_port: u16,

    /// Mainframe user embedded in the job card
    #[arg(long = "mainframe-user", value_name = "USER")]
    pub mainframe_user: String,

    /// Mainframe password embedded in the job card
    #[arg(long = "mainframe-password", value_name = "PASSWORD")]
    pub mainframe_password: String,

    /// Target dataset name
    #[arg(long = "dataset", value_name = "DSN", default_value = "DOGE.COINS")]
    pub dataset: String,

    /// Volume the dataset is defined on
    #[arg(long = "volume", value_name = "VOL", default_value = "PUB001")]
    pub volume: String,

    /// File holding the previously synced snapshot text
    #[arg(long = "state-file", value_name = "PATH", default_value = "doge.tmp")]
    pub state_file: PathBuf,

    /// Seconds between sync cycles
    #[arg(long = "interval", value_name = "SECONDS", default_value_t = 30)]
    pub interval_secs: u64,

    /// Poll window on the printer channel, in seconds
    #[arg(long = "poll-timeout", value_name = "SECONDS", default_value_t = 5)]
    pub poll_timeout_secs: u64,

    /// Run a single sync cycle and exit
    #[arg(long = "once")]
    pub once: bool,
}

impl CliArgs {
    /// Poll window as a Duration
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    /// Cycle interval as a Duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
