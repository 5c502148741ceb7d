//! A hosting session: one chaincode, one in-memory ledger, a stream of
//! invocations.
//!
//! Input is JSON lines, one [`Invocation`] per line. Blank lines are
//! skipped. Output is JSON lines, one [`ResponseLine`] per invocation:
//!
//! ```text
//! in:  {"txId":"tx1","function":"makeStatement","args":["hello"],"timestamp":{"seconds":1000}}
//! out: {"txId":"tx1","status":200,"message":"","payload":"{\"eventTime\":...}"}
//! ```
//!
//! A line that does not parse is answered with status 400 and the session
//! continues.

use std::io::{BufRead, Write};

use serde::Serialize;
use statement_shim::response::ERROR_THRESHOLD;
use statement_shim::{Chaincode, Invocation, MockStub, Response};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::HostError;

/// Status for input lines that are not a valid invocation.
pub const BAD_REQUEST: i32 = 400;

/// One response written back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseLine {
    /// Transaction the response belongs to; empty for unparseable input.
    pub tx_id: String,
    /// Response status.
    pub status: i32,
    /// Error message; empty on success.
    pub message: String,
    /// Payload decoded as UTF-8 (lossy).
    pub payload: String,
}

impl ResponseLine {
    fn from_response(tx_id: String, response: &Response) -> Self {
        Self {
            tx_id,
            status: response.status,
            message: response.message.clone(),
            payload: String::from_utf8_lossy(&response.payload).into_owned(),
        }
    }
}

/// One committed key/value pair written by [`Session::dump_state`].
#[derive(Debug, Serialize)]
struct StateLine<'a> {
    key: &'a str,
    value: String,
}

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines that produced a response.
    pub invocations: u64,
    /// Invocations whose write set was committed.
    pub committed: u64,
    /// Invocations answered with an error status.
    pub failed: u64,
}

/// A chaincode bound to an in-memory ledger.
#[derive(Debug)]
pub struct Session<C> {
    chaincode: C,
    ledger: MockStub,
}

impl<C: Chaincode> Session<C> {
    /// Bind `chaincode` to `ledger`.
    pub const fn new(chaincode: C, ledger: MockStub) -> Self {
        Self { chaincode, ledger }
    }

    /// The ledger the session writes to.
    pub const fn ledger(&self) -> &MockStub {
        &self.ledger
    }

    /// Run the chaincode's `init` hook as its own transaction.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Init`] if `init` answers with an error status.
    pub fn start(&mut self) -> Result<(), HostError> {
        let invocation = Invocation::new(new_tx_id(), "init", Vec::new());
        let response = self.ledger.mock_init(&self.chaincode, &invocation);
        if !response.is_ok() {
            return Err(HostError::Init {
                status: response.status,
                message: response.message,
            });
        }
        info!(chaincode = self.ledger.name(), "chaincode instantiated");
        Ok(())
    }

    /// Execute every invocation in `input`, writing one response line per
    /// invocation to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Io`] if reading or writing fails, or
    /// [`HostError::Serde`] if a response cannot be encoded.
    pub fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<SessionSummary, HostError>
    where
        R: BufRead,
        W: Write,
    {
        let mut summary = SessionSummary::default();

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line);
            summary.invocations = summary.invocations.saturating_add(1);
            if response.status < ERROR_THRESHOLD {
                summary.committed = summary.committed.saturating_add(1);
            } else {
                summary.failed = summary.failed.saturating_add(1);
            }

            serde_json::to_writer(&mut *output, &response)?;
            output.write_all(b"\n")?;
        }

        output.flush()?;
        Ok(summary)
    }

    /// Write every committed key/value pair as a JSON line, in key order.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Io`] or [`HostError::Serde`] if writing fails.
    pub fn dump_state<W: Write>(&self, output: &mut W) -> Result<(), HostError> {
        for (key, value) in self.ledger.entries() {
            let line = StateLine {
                key,
                value: String::from_utf8_lossy(value).into_owned(),
            };
            serde_json::to_writer(&mut *output, &line)?;
            output.write_all(b"\n")?;
        }
        output.flush()?;
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> ResponseLine {
        let mut invocation: Invocation = match serde_json::from_str(line) {
            Ok(invocation) => invocation,
            Err(e) => {
                warn!(error = %e, "skipping malformed invocation");
                return ResponseLine {
                    tx_id: String::new(),
                    status: BAD_REQUEST,
                    message: format!("invalid invocation: {e}"),
                    payload: String::new(),
                };
            }
        };

        if invocation.tx_id.is_empty() {
            invocation.tx_id = new_tx_id();
        }

        debug!(
            tx_id = invocation.tx_id,
            function = invocation.function,
            args = invocation.args.len(),
            "executing invocation"
        );
        let response = self.ledger.mock_invoke(&self.chaincode, &invocation);
        ResponseLine::from_response(invocation.tx_id, &response)
    }
}

/// Generate a transaction ID the way a client would: random and unique.
fn new_tx_id() -> String {
    Uuid::new_v4().simple().to_string()
}
