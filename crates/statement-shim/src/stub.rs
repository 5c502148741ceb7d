//! The chaincode stub and lifecycle hooks.
//!
//! A [`ChaincodeStub`] is the chaincode's only window into the ledger
//! runtime for the duration of one transaction. A [`Chaincode`] is what
//! the runtime calls: `init` once at instantiation or upgrade, and
//! `invoke` once per transaction.

use crate::response::Response;
use crate::timestamp::TxTimestamp;
use crate::StubError;

/// Runtime services available to chaincode during one transaction.
///
/// Every method is synchronous from the chaincode's point of view.
/// Implementations must be deterministic for a given transaction: every
/// endorsing peer has to observe the same function, arguments, ID and
/// timestamp.
pub trait ChaincodeStub {
    /// The invoked function name and its ordered string arguments.
    fn function_and_parameters(&self) -> (String, Vec<String>);

    /// The consensus timestamp from the transaction header.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::TimestampUnavailable`] if the transaction
    /// carries no timestamp.
    fn tx_timestamp(&self) -> Result<TxTimestamp, StubError>;

    /// The runtime-assigned transaction ID.
    fn tx_id(&self) -> &str;

    /// Stage a write of `value` under `key` in the transaction's write set.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::EmptyKey`] for an empty key, or
    /// [`StubError::StateWrite`] if the runtime refuses the write.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StubError>;

    /// Read the committed value under `key`.
    ///
    /// Pending writes from the current transaction are not visible.
    ///
    /// # Errors
    ///
    /// Returns [`StubError`] if the runtime cannot serve the read.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError>;
}

/// Lifecycle hooks a contract exposes to the runtime.
pub trait Chaincode {
    /// Called once when the chaincode is instantiated or upgraded.
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response;

    /// Called once per transaction.
    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response;
}
