//! In-memory ledger for tests and local hosting.
//!
//! [`MockStub`] holds committed world state in a [`BTreeMap`] so that
//! iteration order, and anything derived from it, is deterministic. Each
//! call to [`MockStub::mock_invoke`] runs one transaction against a fresh
//! [`TxStub`] whose write set is committed only if the chaincode answers
//! with a success status.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::invocation::Invocation;
use crate::response::Response;
use crate::stub::{Chaincode, ChaincodeStub};
use crate::timestamp::TxTimestamp;
use crate::StubError;

// ---------------------------------------------------------------------------
// MockStub
// ---------------------------------------------------------------------------

/// An in-memory ledger that executes one transaction at a time.
#[derive(Debug, Default)]
pub struct MockStub {
    /// Chaincode name, for log context.
    name: String,
    /// Committed world state.
    state: BTreeMap<String, Vec<u8>>,
    /// When set, every `put_state` fails with this reason.
    write_failure: Option<String>,
}

impl MockStub {
    /// Create an empty ledger for the named chaincode.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: BTreeMap::new(),
            write_failure: None,
        }
    }

    /// The chaincode name this ledger was created for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Make every subsequent state write fail with `reason`.
    pub fn fail_writes(&mut self, reason: impl Into<String>) {
        self.write_failure = Some(reason.into());
    }

    /// Let state writes succeed again.
    pub fn clear_write_failure(&mut self) {
        self.write_failure = None;
    }

    /// Run `chaincode.init` as one transaction.
    pub fn mock_init<C>(&mut self, chaincode: &C, invocation: &Invocation) -> Response
    where
        C: Chaincode + ?Sized,
    {
        self.execute(invocation, |stub| chaincode.init(stub))
    }

    /// Run `chaincode.invoke` as one transaction.
    pub fn mock_invoke<C>(&mut self, chaincode: &C, invocation: &Invocation) -> Response
    where
        C: Chaincode + ?Sized,
    {
        self.execute(invocation, |stub| chaincode.invoke(stub))
    }

    /// Committed value under `key`.
    pub fn state(&self, key: &str) -> Option<&[u8]> {
        self.state.get(key).map(Vec::as_slice)
    }

    /// Committed keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    /// Committed key/value pairs in ascending key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.state
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether no key has been committed.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    fn execute<F>(&mut self, invocation: &Invocation, call: F) -> Response
    where
        F: FnOnce(&mut dyn ChaincodeStub) -> Response,
    {
        let mut stub = TxStub::new(&self.state, invocation, self.write_failure.as_deref());
        let response = call(&mut stub);
        let writes = stub.into_write_set();

        if response.is_ok() {
            debug!(
                chaincode = self.name,
                tx_id = invocation.tx_id,
                keys = writes.len(),
                "committing write set"
            );
            self.state.extend(writes);
        } else if !writes.is_empty() {
            warn!(
                chaincode = self.name,
                tx_id = invocation.tx_id,
                status = response.status,
                keys = writes.len(),
                "discarding write set of failed transaction"
            );
        }

        response
    }
}

// ---------------------------------------------------------------------------
// TxStub
// ---------------------------------------------------------------------------

/// The stub handed to chaincode for a single transaction.
#[derive(Debug)]
pub struct TxStub<'a> {
    committed: &'a BTreeMap<String, Vec<u8>>,
    invocation: &'a Invocation,
    write_failure: Option<&'a str>,
    writes: BTreeMap<String, Vec<u8>>,
}

impl<'a> TxStub<'a> {
    const fn new(
        committed: &'a BTreeMap<String, Vec<u8>>,
        invocation: &'a Invocation,
        write_failure: Option<&'a str>,
    ) -> Self {
        Self {
            committed,
            invocation,
            write_failure,
            writes: BTreeMap::new(),
        }
    }

    /// Writes staged so far, keyed by state key.
    #[cfg(test)]
    const fn write_set(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.writes
    }

    fn into_write_set(self) -> BTreeMap<String, Vec<u8>> {
        self.writes
    }
}

impl ChaincodeStub for TxStub<'_> {
    fn function_and_parameters(&self) -> (String, Vec<String>) {
        (
            self.invocation.function.clone(),
            self.invocation.args.clone(),
        )
    }

    fn tx_timestamp(&self) -> Result<TxTimestamp, StubError> {
        self.invocation
            .timestamp
            .ok_or(StubError::TimestampUnavailable)
    }

    fn tx_id(&self) -> &str {
        &self.invocation.tx_id
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StubError> {
        if key.is_empty() {
            return Err(StubError::EmptyKey);
        }
        if let Some(reason) = self.write_failure {
            return Err(StubError::StateWrite {
                key: key.to_owned(),
                reason: reason.to_owned(),
            });
        }
        self.writes.insert(key.to_owned(), value);
        Ok(())
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError> {
        Ok(self.committed.get(key).cloned())
    }
}
