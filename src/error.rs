//! # Error Types
//!
//! This module defines error types used throughout the puente bridge.
//!
//! Every failure of a command invocation is resolved against the
//! caller's response channel as a `{code, message}` record; nothing is
//! thrown silently. [`BridgeError::code`] produces the wire code.

use thiserror::Error;

/// Main error type for bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Session-dependent command issued with no open session
    #[error("open the printer before printing")]
    NotOpen,

    /// Required command argument is absent (or null)
    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    /// Command argument is present but unusable
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument {
        name: &'static str,
        message: String,
    },

    /// `beginPrint` found the driver in its busy state
    #[error("printer reported busy state {0}")]
    PrinterBusy(i32),

    /// A print job is already awaiting its terminal event
    #[error("a print job is already in progress")]
    JobInProgress,

    /// Driver event channel closed without a terminal event
    #[error("print job ended without a terminal event")]
    JobInterrupted,

    /// Error reported by the printer driver, verbatim
    #[error("{message}")]
    Driver { code: i32, message: String },

    /// Command channel transport errors (bind, serve)
    #[error("transport error: {0}")]
    Transport(String),
}

impl BridgeError {
    /// Wire code for the `{code, message}` error record.
    ///
    /// Driver errors carry the vendor's numeric code, stringified, so
    /// the caller sees exactly what the driver reported.
    pub fn code(&self) -> String {
        match self {
            Self::NotOpen => "NOT_OPEN".to_string(),
            Self::MissingArgument(_) => "MISSING_ARGUMENT".to_string(),
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT".to_string(),
            Self::PrinterBusy(_) => "PRINTER_BUSY".to_string(),
            Self::JobInProgress => "JOB_IN_PROGRESS".to_string(),
            Self::JobInterrupted => "JOB_INTERRUPTED".to_string(),
            Self::Driver { code, .. } => code.to_string(),
            Self::Transport(_) => "TRANSPORT".to_string(),
        }
    }
}

/// Result alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
