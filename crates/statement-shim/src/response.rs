//! Chaincode responses.
//!
//! Status codes follow HTTP conventions: anything below
//! [`ERROR_THRESHOLD`] is a success and its write set is eligible for
//! commit; anything at or above it is an error and the write set is
//! discarded.

/// Status of a successful response.
pub const OK: i32 = 200;

/// Lowest status treated as an error.
pub const ERROR_THRESHOLD: i32 = 400;

/// Status of an error response.
pub const ERROR: i32 = 500;

/// The result of one `init` or `invoke` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP-style status code.
    pub status: i32,
    /// Human-readable error message; empty on success.
    pub message: String,
    /// Opaque payload returned to the client; empty on error.
    pub payload: Vec<u8>,
}

impl Response {
    /// A successful response carrying `payload`.
    pub const fn success(payload: Vec<u8>) -> Self {
        Self {
            status: OK,
            message: String::new(),
            payload,
        }
    }

    /// An error response carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Whether the status is below [`ERROR_THRESHOLD`].
    pub const fn is_ok(&self) -> bool {
        self.status < ERROR_THRESHOLD
    }
}
