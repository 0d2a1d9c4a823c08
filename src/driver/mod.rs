//! # Printer Driver Seam
//!
//! The vendor printer SDK is an external collaborator; this module
//! defines the surface the dispatcher drives it through.
//!
//! ## Available Backends
//!
//! - [`sim`]: in-process simulated printer for development and demos
//!
//! A real vendor driver implements [`PrinterDriver`] (typically over
//! FFI to the SDK) and reaches the dispatcher through a
//! [`DriverFactory`](crate::dispatch::DriverFactory).

pub mod line;
pub mod sim;

pub use line::{FontSize, Position, PrintLine, TextLine};
pub use sim::SimulatedDriver;

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::BridgeError;

/// Driver state code for the busy/wedged condition that must never
/// start a print job (vendor-defined).
pub const STATE_BUSY: i32 = 4;

/// An error reported by the printer driver, with its vendor-defined
/// numeric code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for DriverError {}

impl From<DriverError> for BridgeError {
    fn from(err: DriverError) -> Self {
        Self::Driver {
            code: err.code,
            message: err.message,
        }
    }
}

/// Notification from an asynchronous print job.
///
/// Exactly one of [`Finished`](JobEvent::Finished) /
/// [`Failed`](JobEvent::Failed) terminates a job;
/// [`Started`](JobEvent::Started) is informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    Started,
    Finished,
    Failed { code: i32, message: String },
}

/// The surface the vendor printer SDK must expose to the bridge.
///
/// Mirrors the SDK one-to-one: the session lifecycle, state queries,
/// configuration setters, the queue of pending print lines, and the
/// asynchronous print job whose notifications arrive on the returned
/// event channel.
#[async_trait]
pub trait PrinterDriver: Send {
    /// Open the connection to the physical printer.
    async fn open(&mut self) -> Result<(), DriverError>;

    /// Close the connection. Idempotent.
    fn close(&mut self);

    /// Vendor-defined readiness code (see [`STATE_BUSY`]).
    fn state(&self) -> i32;

    /// Paper length fed before the current print head position.
    fn before_printer_length(&self) -> i32;

    /// Total printed length.
    fn printer_length(&self) -> i32;

    /// Advance the paper by the given number of blank lines.
    fn line_wrap(&mut self, lines: i32);

    /// Spacing between printed lines.
    fn set_line_space(&mut self, line: i32);

    /// Font file used for subsequent text lines.
    fn set_print_font(&mut self, path: &str);

    /// Print darkness level.
    fn set_print_gray(&mut self, gray: i32);

    /// Append one item to the driver-owned print queue.
    fn add_print_line(&mut self, line: PrintLine);

    /// Drop all queued print items.
    fn clean_cache(&mut self);

    /// Start the asynchronous print job over the queued items.
    ///
    /// Events arrive on the returned channel; the driver sends at most
    /// one terminal event and then drops the sender.
    async fn begin_print(&mut self) -> mpsc::UnboundedReceiver<JobEvent>;
}
