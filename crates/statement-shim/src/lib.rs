//! Contract between chaincode and the ledger runtime.
//!
//! The ledger runtime owns consensus, ordering, endorsement and storage.
//! Chaincode only sees a narrow surface of it, modelled here:
//!
//! - [`stub`] -- The [`ChaincodeStub`] a transaction executes against, and
//!   the [`Chaincode`] lifecycle hooks (`init` / `invoke`) a contract exposes.
//! - [`timestamp`] -- The consensus-agreed [`TxTimestamp`].
//! - [`response`] -- The [`Response`] returned to the runtime.
//! - [`invocation`] -- The [`Invocation`] a host hands to a stub.
//! - [`mock`] -- [`MockStub`], an in-memory ledger for tests and local hosting.
//!
//! # Transaction model
//!
//! ```text
//! Invocation --> MockStub::mock_invoke --> Chaincode::invoke(&mut stub) --> Response
//!                      |                                                        |
//!                      +-- write set committed only if Response::is_ok() <------+
//! ```
//!
//! Writes made through [`ChaincodeStub::put_state`] are staged in the
//! transaction's write set. Reads through [`ChaincodeStub::get_state`] see
//! committed state only, never the transaction's own pending writes.

pub mod invocation;
pub mod mock;
pub mod response;
pub mod stub;
pub mod timestamp;

pub use invocation::Invocation;
pub use mock::MockStub;
pub use response::Response;
pub use stub::{Chaincode, ChaincodeStub};
pub use timestamp::TxTimestamp;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors returned by calls into the ledger runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StubError {
    /// The transaction carries no timestamp.
    #[error("transaction timestamp unavailable")]
    TimestampUnavailable,

    /// The timestamp cannot be represented as a UTC instant.
    #[error("invalid transaction timestamp: seconds={seconds}, nanos={nanos}")]
    InvalidTimestamp {
        /// Seconds since the Unix epoch.
        seconds: i64,
        /// Nanosecond offset within the second.
        nanos: i32,
    },

    /// State keys must be non-empty.
    #[error("state key must not be empty")]
    EmptyKey,

    /// The runtime refused the state write.
    #[error("failed to write state for key {key}: {reason}")]
    StateWrite {
        /// The key being written.
        key: String,
        /// Why the runtime refused.
        reason: String,
    },
}
