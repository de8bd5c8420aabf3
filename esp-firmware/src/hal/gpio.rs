// GPIO Outputs - esp-hal Implementierung von DigitalOutputs

use esp_core::{DigitalOutputs, DriverError, OutputPin};
use esp_hal::gpio::{Level, Output};

/// Feste Tabelle von Output-Pins
///
/// `table[i]` beschreibt `pins[i]`. Die Pins sind beim Erstellen bereits
/// als Push-Pull Output auf Low konfiguriert.
pub struct GpioOutputs<const N: usize> {
    table: [OutputPin; N],
    pins: [Output<'static>; N],
}

impl<const N: usize> GpioOutputs<N> {
    pub fn new(table: [OutputPin; N], pins: [Output<'static>; N]) -> Self {
        Self { table, pins }
    }

    fn index_of(&self, pin: u8) -> Option<usize> {
        self.table.iter().position(|output| output.pin == pin)
    }
}

impl<const N: usize> DigitalOutputs for GpioOutputs<N> {
    fn outputs(&self) -> &[OutputPin] {
        &self.table
    }

    fn write(&mut self, pin: u8, on: bool) -> Result<(), DriverError> {
        let index = self.index_of(pin).ok_or(DriverError::WriteFailed)?;
        self.pins[index].set_level(Level::from(on));
        Ok(())
    }

    fn read(&self, pin: u8) -> Result<bool, DriverError> {
        let index = self.index_of(pin).ok_or(DriverError::ReadFailed)?;
        Ok(self.pins[index].is_set_high())
    }
}
