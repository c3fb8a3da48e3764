// src/error.rs

use std::io;
use thiserror::Error;

/// Errors that can stop a simulation run.
///
/// Empty or full counters are not errors: those show up as
/// `TimedOut`/`Closed` outcomes on the buffer operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration cannot describe a runnable simulation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The OS refused to start an actor thread
    #[error("Failed to spawn {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },

    /// An actor thread panicked before finishing its loop
    #[error("Actor {name} panicked")]
    ActorPanicked { name: String },

    /// Writing the sales log failed
    #[error("Report error: {0}")]
    Report(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
