//! Shared type definitions for the statement chaincode.
//!
//! The chaincode persists exactly one kind of record, the [`Event`]. Its
//! JSON encoding is both the ledger value and the invocation payload, so
//! the byte layout is part of the contract between endorsing peers: every
//! peer must produce identical bytes for the same transaction.
//!
//! # Modules
//!
//! - [`event`] -- The [`Event`] record written under the transaction ID
//! - [`event_time`] -- RFC 3339 encoding of the event timestamp
//! - [`escape`] -- HTML-safe string escaping for Go-compatible bytes

pub mod escape;
pub mod event;
pub mod event_time;

pub use event::Event;
