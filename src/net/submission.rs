//! Job-submission transport
//!
//! The mainframe's card-reader port accepts a batch job as a plain byte
//! stream: connect, send everything, close. Closing the connection is what
//! signals end-of-job to the reader, so the socket must never be leaked.

use crate::core::ScriptSubmitter;
use crate::types::BridgeError;
use std::io::Write;
use std::net::TcpStream;

/// Channel name used in transport errors
const CHANNEL: &str = "job-submission";

/// One-shot script delivery to the reader port
///
/// Each [`submit`](ScriptSubmitter::submit) call opens a fresh connection,
/// writes the complete script and closes the connection on every exit path
/// (the stream is dropped whether the send succeeds or fails). No retry is
/// performed here; retry policy belongs to the caller's scheduler.
#[derive(Debug, Clone)]
pub struct JobSubmission {
    hostname: String,
    port: u16,
}

impl JobSubmission {
    /// Create a transport for one reader endpoint
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        JobSubmission {
            hostname: hostname.into(),
            port,
        }
    }
}

impl ScriptSubmitter for JobSubmission {
    fn submit(&self, script: &str) -> Result<(), BridgeError> {
        let mut stream = TcpStream::connect((self.hostname.as_str(), self.port))
            .map_err(|e| BridgeError::transport(CHANNEL, e.to_string()))?;

        stream
            .write_all(script.as_bytes())
            .map_err(|e| BridgeError::transport(CHANNEL, e.to_string()))?;

        tracing::debug!(bytes = script.len(), port = self.port, "job script submitted");
        Ok(())
        // stream dropped here: connection closed on success and failure alike
    }
}
