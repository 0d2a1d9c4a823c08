//! Print-job state machine.
//!
//! `beginPrint` reads the driver state, refuses the busy state code,
//! then starts the asynchronous job and waits for its terminal event.
//! Exactly one of finish/error resolves the original request; the
//! start event is log-only.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error};

use crate::driver::{JobEvent, PrinterDriver, STATE_BUSY};
use crate::error::{BridgeError, BridgeResult};

/// Holder of the single in-flight print-job slot; releases it on drop.
///
/// Claimed before the session lock is taken so an overlapping
/// `beginPrint` is answered immediately instead of queuing behind the
/// running job.
pub(crate) struct JobSlot<'a>(&'a AtomicBool);

impl<'a> JobSlot<'a> {
    /// Claim the slot, or `None` if a job is already in flight.
    pub(crate) fn claim(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for JobSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Run one print job to its terminal event.
///
/// Terminal states close the driver; the session itself stays in place
/// (matching `close`). A finish also clears the driver's print queue.
/// A driver whose event channel closes without a terminal event still
/// resolves the caller, with [`BridgeError::JobInterrupted`].
pub(crate) async fn run(driver: &mut dyn PrinterDriver) -> BridgeResult<()> {
    let state = driver.state();
    if state == STATE_BUSY {
        driver.close();
        return Err(BridgeError::PrinterBusy(state));
    }

    let mut events = driver.begin_print().await;

    loop {
        match events.recv().await {
            Some(JobEvent::Started) => debug!("print job started"),
            Some(JobEvent::Finished) => {
                debug!("print job finished");
                driver.clean_cache();
                driver.close();
                return Ok(());
            }
            Some(JobEvent::Failed { code, message }) => {
                error!(code, %message, "print job failed");
                driver.close();
                return Err(BridgeError::Driver { code, message });
            }
            None => {
                driver.close();
                return Err(BridgeError::JobInterrupted);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_slot_is_exclusive() {
        let flag = AtomicBool::new(false);
        let slot = JobSlot::claim(&flag).unwrap();
        assert!(JobSlot::claim(&flag).is_none());
        drop(slot);
        assert!(JobSlot::claim(&flag).is_some());
    }
}
