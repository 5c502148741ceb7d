//! Development host for the statement chaincode.
//!
//! Runs the event recorder against an in-memory ledger, standing in for a
//! peer during local development. Invocations arrive as JSON lines on
//! stdin; responses leave as JSON lines on stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `statement-host.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Build the recorder with its log span and bind it to a fresh ledger
//! 4. Run the chaincode's `init` hook
//! 5. Execute every invocation on stdin
//! 6. Optionally dump committed state

mod config;
mod error;
mod session;

use std::io;

use statement_chaincode::EventRecorder;
use statement_shim::MockStub;
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

use crate::config::{HostConfig, LogFormat, LoggingConfig};
use crate::error::HostError;
use crate::session::Session;

/// Application entry point for the development host.
///
/// # Errors
///
/// Returns an error if configuration, initialization, or stream I/O fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = config::config_path();
    let found = config_path.exists();
    let config = if found {
        HostConfig::from_file(&config_path).map_err(HostError::from)?
    } else {
        HostConfig::from_env().map_err(HostError::from)?
    };

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        path = %config_path.display(),
        found,
        chaincode = config.chaincode.name,
        "statement-host starting"
    );

    // 3. Build the recorder and its ledger.
    let span = info_span!("chaincode", name = %config.chaincode.name);
    let recorder = EventRecorder::new(span);
    let mut session = Session::new(recorder, MockStub::new(config.chaincode.name.clone()));

    // 4. Instantiate.
    session.start()?;

    // 5. Execute invocations.
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = session.run(stdin.lock(), &mut stdout.lock())?;
    info!(
        invocations = summary.invocations,
        committed = summary.committed,
        failed = summary.failed,
        "input exhausted"
    );

    // 6. Dump state.
    if config.host.dump_state {
        session.dump_state(&mut stdout.lock())?;
        info!(keys = session.ledger().len(), "state dumped");
    }

    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
