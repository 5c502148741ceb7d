//! The event record persisted by the statement chaincode.
//!
//! One [`Event`] is created per successful `makeStatement` invocation and
//! written to ledger state under its own transaction ID. Records are
//! immutable once written; no operation updates or deletes them.
//!
//! # Wire format
//!
//! Fields are serialized in declaration order, which keeps the encoding
//! byte-identical across peers:
//!
//! ```json
//! {"eventTime":"1970-01-01T00:16:40Z","txID":"tx1","statement":"hello"}
//! ```
//!
//! Strings are escaped the way Go's `encoding/json` escapes them, so `<`,
//! `>`, `&`, U+2028 and U+2029 appear as `\u003c`, `\u003e`, `\u0026`,
//! `\u2028` and `\u2029`. See [`crate::escape`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A timestamped statement bound to the transaction that recorded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Consensus transaction time, never the executing peer's clock.
    #[serde(rename = "eventTime", with = "crate::event_time")]
    #[ts(type = "string")]
    pub event_time: DateTime<Utc>,

    /// ID of the transaction that wrote the event. Also the state key.
    #[serde(rename = "txID")]
    pub tx_id: String,

    /// Caller-supplied text, stored verbatim.
    pub statement: String,
}

impl Event {
    /// Create an event from its three parts.
    pub const fn new(event_time: DateTime<Utc>, tx_id: String, statement: String) -> Self {
        Self {
            event_time,
            tx_id,
            statement,
        }
    }

    /// Encode the event as compact, HTML-safe JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the event time cannot be written
    /// as RFC 3339 (year outside `0..=9999`).
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        crate::escape::to_vec(self)
    }

    /// Decode an event from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the bytes are not a valid event.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
