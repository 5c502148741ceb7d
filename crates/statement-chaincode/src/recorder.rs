//! The event recorder.
//!
//! [`EventRecorder`] is the [`Chaincode`] the ledger runtime calls. It
//! dispatches on the function name and delegates `makeStatement` to
//! [`record_statement`], which does the actual work against the stub.
//!
//! # Determinism
//!
//! Every endorsing peer executes the same invocation and must produce
//! byte-identical payloads and write sets. The event time therefore comes
//! from the transaction header, never from a local clock, and the event
//! encodes with a fixed field order.

use tracing::{debug, error, info_span, warn, Span};

use statement_shim::{Chaincode, ChaincodeStub, Response, TxTimestamp};
use statement_types::Event;

use crate::RecorderError;

/// Span name used when no span is supplied.
pub const DEFAULT_CHAINCODE_NAME: &str = "statement_chaincode";

/// The statement-recording chaincode.
///
/// Holds no ledger state of its own. The only field is the log span the
/// host supplies at construction, entered for the duration of every
/// `init` and `invoke` call.
#[derive(Debug, Clone)]
pub struct EventRecorder {
    span: Span,
}

impl EventRecorder {
    /// The single function this chaincode serves.
    pub const FUNCTION_MAKE_STATEMENT: &'static str = "makeStatement";

    /// Create a recorder that logs inside `span`.
    pub const fn new(span: Span) -> Self {
        Self { span }
    }
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new(info_span!("chaincode", name = DEFAULT_CHAINCODE_NAME))
    }
}

impl Chaincode for EventRecorder {
    fn init(&self, _stub: &mut dyn ChaincodeStub) -> Response {
        let _entered = self.span.enter();
        debug!("chaincode initialized");
        Response::success(Vec::new())
    }

    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let _entered = self.span.enter();
        let (function, args) = stub.function_and_parameters();

        let result = if function == Self::FUNCTION_MAKE_STATEMENT {
            record_statement(stub, &args)
        } else {
            Err(RecorderError::UnknownFunction(function))
        };

        match result {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                let tx_id = stub.tx_id();
                match &err {
                    RecorderError::UnknownFunction(name) => {
                        error!(tx_id = %tx_id, function = %name, "invoke did not find function");
                    }
                    RecorderError::InvalidArgumentCount { expected, got } => {
                        warn!(
                            tx_id = %tx_id,
                            expected = *expected,
                            got = *got,
                            "rejected invocation"
                        );
                    }
                    RecorderError::TimestampUnavailable(_)
                    | RecorderError::Serialization(_)
                    | RecorderError::StateWrite(_) => {
                        error!(tx_id = %tx_id, error = %err, "failed to record statement");
                    }
                }
                Response::error(err.to_string())
            }
        }
    }
}

/// Record `args[0]` as an [`Event`] keyed by the current transaction ID.
///
/// The argument count is checked before the stub is touched, so a
/// rejected call performs no runtime reads or writes. Returns the JSON
/// bytes that were staged for the write.
///
/// # Errors
///
/// Returns [`RecorderError::InvalidArgumentCount`] unless exactly one
/// argument is given, [`RecorderError::TimestampUnavailable`] if the
/// transaction has no valid timestamp, [`RecorderError::Serialization`]
/// if the event cannot be encoded, and [`RecorderError::StateWrite`] if
/// the stub refuses the write.
pub fn record_statement(
    stub: &mut dyn ChaincodeStub,
    args: &[String],
) -> Result<Vec<u8>, RecorderError> {
    let [statement] = args else {
        return Err(RecorderError::InvalidArgumentCount {
            expected: 1,
            got: args.len(),
        });
    };

    let event_time = stub
        .tx_timestamp()
        .and_then(TxTimestamp::to_datetime)
        .map_err(RecorderError::TimestampUnavailable)?;

    let event = Event::new(event_time, stub.tx_id().to_owned(), statement.clone());
    let bytes = event.to_json_bytes()?;

    stub.put_state(&event.tx_id, bytes.clone())
        .map_err(RecorderError::StateWrite)?;

    debug!(
        tx_id = %event.tx_id,
        event_time = %event.event_time,
        statement_len = event.statement.len(),
        "statement recorded"
    );
    Ok(bytes)
}
