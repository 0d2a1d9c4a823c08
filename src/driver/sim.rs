//! # Simulated Printer Backend
//!
//! Stands in for the vendor SDK when no hardware is attached: it keeps
//! the print queue and configuration in memory, logs what a real
//! printer would do, and completes every print job immediately with a
//! start and a finish event.
//!
//! Used by `puente serve` and `puente print-test`; real deployments
//! swap in a vendor [`PrinterDriver`] implementation.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::line::PrintLine;
use super::{DriverError, JobEvent, PrinterDriver};

/// In-process printer simulator.
#[derive(Debug, Default)]
pub struct SimulatedDriver {
    open: bool,
    queue: Vec<PrintLine>,
    line_space: i32,
    gray: i32,
    font_path: Option<String>,
    printed_length: i32,
}

impl SimulatedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items currently awaiting a print job.
    pub fn queued(&self) -> &[PrintLine] {
        &self.queue
    }

    /// Whether the simulated connection is open.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[async_trait]
impl PrinterDriver for SimulatedDriver {
    async fn open(&mut self) -> Result<(), DriverError> {
        self.open = true;
        info!("simulated printer opened");
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            info!("simulated printer closed");
        }
        self.open = false;
    }

    fn state(&self) -> i32 {
        // The simulator is always ready.
        0
    }

    fn before_printer_length(&self) -> i32 {
        0
    }

    fn printer_length(&self) -> i32 {
        self.printed_length
    }

    fn line_wrap(&mut self, lines: i32) {
        debug!(lines, "line wrap");
        self.printed_length += lines;
    }

    fn set_line_space(&mut self, line: i32) {
        self.line_space = line;
    }

    fn set_print_font(&mut self, path: &str) {
        self.font_path = Some(path.to_string());
    }

    fn set_print_gray(&mut self, gray: i32) {
        self.gray = gray;
    }

    fn add_print_line(&mut self, line: PrintLine) {
        self.queue.push(line);
    }

    fn clean_cache(&mut self) {
        self.queue.clear();
    }

    async fn begin_print(&mut self) -> mpsc::UnboundedReceiver<JobEvent> {
        let (tx, rx) = mpsc::unbounded_channel();

        info!(lines = self.queue.len(), "simulated print job");
        debug!(
            line_space = self.line_space,
            gray = self.gray,
            font = self.font_path.as_deref().unwrap_or("default"),
            "job configuration"
        );
        for line in &self.queue {
            match line {
                PrintLine::Text(text) => {
                    debug!(content = %text.content, position = ?text.position, "print text")
                }
                PrintLine::Bitmap { image, position } => {
                    debug!(
                        width = image.width(),
                        height = image.height(),
                        position = ?position,
                        "print bitmap"
                    )
                }
            }
        }
        self.printed_length += self.queue.len() as i32;

        // The unbounded channel buffers both events until the job
        // handler starts receiving; dropping the sender afterwards
        // closes the stream.
        let _ = tx.send(JobEvent::Started);
        let _ = tx.send(JobEvent::Finished);
        rx
    }
}
