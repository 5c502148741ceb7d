//! Transaction proposals as seen by a stub.

use serde::Deserialize;

use crate::timestamp::TxTimestamp;

/// One transaction proposal: who it is, what it calls, and when.
///
/// Deserializes from `camelCase` JSON:
///
/// ```json
/// {"txId":"tx1","function":"makeStatement","args":["hello"],"timestamp":{"seconds":1000,"nanos":0}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    /// Transaction ID. Hosts fill an empty ID before execution.
    #[serde(default)]
    pub tx_id: String,
    /// Function name to dispatch on.
    #[serde(default)]
    pub function: String,
    /// Ordered string arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Consensus timestamp; `None` models a header without one.
    #[serde(default)]
    pub timestamp: Option<TxTimestamp>,
}

impl Invocation {
    /// Create an invocation with no timestamp.
    pub fn new(tx_id: impl Into<String>, function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            function: function.into(),
            args,
            timestamp: None,
        }
    }

    /// Attach a consensus timestamp.
    #[must_use]
    pub const fn at(mut self, timestamp: TxTimestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
