//! Printer-output command poller
//!
//! The mainframe emulator writes job output to its printer port as an
//! unstructured byte stream and may stall or close the connection once
//! output is exhausted. The poller runs a bounded window over that stream:
//!
//! ```text
//! CONNECTING -> LISTENING -> (DRAINED | TIMED_OUT) -> CLOSED
//! ```
//!
//! While LISTENING, every received chunk is appended to an accumulation
//! buffer; elapsed wall-clock time is checked before every receive attempt.
//! A receive error (connection reset, read failure) is treated as end of
//! stream, not as a failure - the emulator closing the printer is the
//! normal way a drain ends. On either exit the accumulated text is scanned
//! once, in full, for command frames.

use crate::codec::decode_commands;
use crate::core::{ChunkRead, Clock, CommandSource};
use crate::net::SystemClock;
use crate::types::{BridgeError, PaymentCommand};
use std::io::ErrorKind;
use std::net::TcpStream;
use std::time::Duration;

/// Channel name used in transport errors
const CHANNEL: &str = "printer-output";

/// Receive buffer size per attempt
const RECV_CHUNK: usize = 4096;

/// Idle wait between receive attempts when no data is pending
const IDLE_WAIT: Duration = Duration::from_millis(50);

/// How a poll window ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollEnd {
    /// The peer closed or broke the connection
    Drained,
    /// The timeout budget elapsed first
    TimedOut,
}

/// Bounded poller for the printer port
///
/// Each [`poll`](CommandSource::poll) call is a single window: connect,
/// accumulate until drained or timed out, scan, close. No retries across
/// invocations. The clock is injectable so the timeout state machine can be
/// driven deterministically in tests.
#[derive(Debug)]
pub struct CommandPoller<C: Clock = SystemClock> {
    hostname: String,
    port: u16,
    clock: C,
}

impl CommandPoller<SystemClock> {
    /// Create a poller for one printer endpoint with the system clock
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        CommandPoller {
            hostname: hostname.into(),
            port,
            clock: SystemClock::new(),
        }
    }
}

impl<C: Clock> CommandPoller<C> {
    /// Create a poller with an injected clock
    pub fn with_clock(hostname: impl Into<String>, port: u16, clock: C) -> Self {
        CommandPoller {
            hostname: hostname.into(),
            port,
            clock,
        }
    }

    /// LISTENING phase: accumulate chunks until end-of-stream or timeout
    ///
    /// Pure with respect to the socket: works on any [`ChunkRead`], so tests
    /// drive it with scripted byte sources and a scripted clock.
    fn drain<S: ChunkRead>(clock: &C, stream: &mut S, timeout: Duration) -> (String, PollEnd) {
        let started = clock.monotonic();
        let mut buffer: Vec<u8> = Vec::new();
        let mut chunk = [0u8; RECV_CHUNK];

        let end = loop {
            // Budget check comes before every receive attempt.
            if clock.monotonic().saturating_sub(started) >= timeout {
                break PollEnd::TimedOut;
            }

            match stream.read_chunk(&mut chunk) {
                Ok(0) => break PollEnd::Drained,
                Ok(n) => buffer.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::WouldBlock => clock.pause(IDLE_WAIT),
                // Reset or read error: the emulator dropped the printer.
                Err(_) => break PollEnd::Drained,
            }
        };

        (String::from_utf8_lossy(&buffer).into_owned(), end)
    }
}

impl<C: Clock> CommandSource for CommandPoller<C> {
    fn poll(&self, timeout: Duration) -> Result<Vec<PaymentCommand>, BridgeError> {
        tracing::debug!(port = self.port, "printer poll connecting");
        let mut stream = TcpStream::connect((self.hostname.as_str(), self.port))
            .map_err(|e| BridgeError::transport(CHANNEL, e.to_string()))?;

        // Receive must return control periodically for the wall-clock
        // check; the timeout itself is never delegated to the socket.
        stream
            .set_nonblocking(true)
            .map_err(|e| BridgeError::transport(CHANNEL, e.to_string()))?;

        let (text, end) = Self::drain(&self.clock, &mut stream, timeout);
        let commands = decode_commands(&text);
        tracing::debug!(
            bytes = text.len(),
            commands = commands.len(),
            end = ?end,
            "printer poll closed"
        );

        Ok(commands)
        // stream dropped here: CLOSED on every path, including errors
        // raised before LISTENING was reached
    }
}
