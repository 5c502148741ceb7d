//! Error types for the development host.
//!
//! [`HostError`] wraps every failure mode between startup and the end of
//! the input stream. Invocation-level failures never reach it: those are
//! reported to the caller as error responses.

use crate::config::ConfigError;

/// Top-level error for the host binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The chaincode refused to initialize.
    #[error("chaincode init failed (status {status}): {message}")]
    Init {
        /// Status returned by `init`.
        status: i32,
        /// Message returned by `init`.
        message: String,
    },

    /// Reading invocations or writing responses failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A response line could not be encoded.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
