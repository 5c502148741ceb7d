//! The statement chaincode: an event recorder for a permissioned ledger.
//!
//! A client submits `makeStatement` with one free-text argument. The
//! recorder stamps it with the consensus transaction time, wraps it with
//! the transaction ID into an [`Event`], writes the JSON encoding to
//! ledger state under that transaction ID, and returns the same bytes.
//!
//! # Dispatch
//!
//! | Function | Arguments | Outcome |
//! |----------|-----------|---------|
//! | `makeStatement` | exactly 1 | event written, payload returned |
//! | `makeStatement` | 0 or 2+ | [`RecorderError::InvalidArgumentCount`] |
//! | anything else | any | [`RecorderError::UnknownFunction`] |
//!
//! Runtime failures (missing timestamp, unencodable event, refused write)
//! are surfaced as error responses. Nothing is committed on any error.
//!
//! # Usage
//!
//! ```
//! use statement_chaincode::EventRecorder;
//! use statement_shim::{Invocation, MockStub, TxTimestamp};
//!
//! let recorder = EventRecorder::default();
//! let mut ledger = MockStub::new("statement_chaincode");
//!
//! let call = Invocation::new("tx1", "makeStatement", vec!["hello".to_owned()])
//!     .at(TxTimestamp::new(1000, 0));
//! let response = ledger.mock_invoke(&recorder, &call);
//!
//! assert!(response.is_ok());
//! assert_eq!(ledger.state("tx1"), Some(response.payload.as_slice()));
//! ```
//!
//! [`Event`]: statement_types::Event

pub mod recorder;

pub use recorder::EventRecorder;

use statement_shim::StubError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while recording a statement.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    /// `makeStatement` did not receive exactly one argument.
    #[error("Incorrect number of arguments. Expecting {expected}, got {got}")]
    InvalidArgumentCount {
        /// Number of arguments the function takes.
        expected: usize,
        /// Number of arguments supplied.
        got: usize,
    },

    /// The function name is not one this chaincode serves.
    #[error("Received unknown function invocation: {0}")]
    UnknownFunction(String),

    /// The runtime supplied no usable transaction timestamp.
    #[error("transaction timestamp unavailable: {0}")]
    TimestampUnavailable(#[source] StubError),

    /// The event could not be encoded.
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The runtime refused the state write.
    #[error("failed to write event to ledger state: {0}")]
    StateWrite(#[source] StubError),
}
