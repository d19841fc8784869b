//! Error types for gridmirror
//!
//! Only the edges of the engine return errors: wire decoding, configuration
//! loading and task plumbing. The per-tick path never fails; it degrades to
//! hidden elements instead.

use thiserror::Error;

/// Core gridmirror errors
#[derive(Error, Debug)]
pub enum GridError {
    // Wire errors
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    // Configuration errors
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    // Runtime errors
    #[error("Roster channel closed")]
    ChannelClosed,

    #[error("Roster task failed: {0}")]
    TaskFailed(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

/// Result type for gridmirror operations
pub type GridResult<T> = Result<T, GridError>;
