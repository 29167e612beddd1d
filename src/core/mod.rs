//! Core business logic module
//!
//! This module contains the bridging logic proper:
//! - `traits` - Capability seams for the wallet gateway and the two
//!   socket transports, so every collaborator is substitutable in tests
//! - `change` - Whole-snapshot change gate
//! - `script` - Dataset-rebuild job generation and capacity windowing
//! - `engine` - Per-cycle orchestration

pub mod change;
pub mod engine;
pub mod script;
pub mod traits;

pub use change::has_new_records;
pub use engine::{BridgeEngine, SyncOutcome};
pub use script::{DatasetScriptBuilder, MAX_RECORDS};
pub use traits::{ChunkRead, Clock, CommandSource, ScriptSubmitter, WalletGateway};
