//! Printer session lifecycle.

use crate::driver::PrinterDriver;

/// The live connection to the printer driver.
///
/// Created by `open`; the next `open` replaces it. `close` and the
/// print-job terminal states close the driver but leave the session in
/// place, so the handle survives until overwritten. That matches the
/// lifecycle of the vendor SDK's manager object.
pub struct Session {
    driver: Box<dyn PrinterDriver>,
}

impl Session {
    pub fn new(driver: Box<dyn PrinterDriver>) -> Self {
        Self { driver }
    }

    pub fn driver_mut(&mut self) -> &mut dyn PrinterDriver {
        self.driver.as_mut()
    }
}
