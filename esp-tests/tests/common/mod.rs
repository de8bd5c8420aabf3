//! Mock-Treiber für die Host-Tests
#![allow(dead_code)]

use std::collections::HashMap;

use esp_core::{DigitalOutputs, DriverError, OutputPin, SmartLedWriter};
use rgb::RGB8;

// ============================================================================
// Mock LED Writer
// ============================================================================

#[derive(Default)]
pub struct MockLedWriter {
    pub last_frame: Vec<RGB8>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockLedWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SmartLedWriter for MockLedWriter {
    fn write<I: Iterator<Item = RGB8>>(&mut self, pixels: I) -> Result<(), DriverError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(DriverError::WriteFailed);
        }

        self.last_frame = pixels.collect();
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock GPIO Outputs
// ============================================================================

pub struct MockOutputs {
    pub table: Vec<OutputPin>,
    pub levels: HashMap<u8, bool>,
    pub write_count: usize,
    pub fail_next_write: bool,
    pub fail_reads: bool,
}

impl MockOutputs {
    /// Alle Pins starten auf Low
    pub fn new(table: &[OutputPin]) -> Self {
        Self {
            table: table.to_vec(),
            levels: table.iter().map(|output| (output.pin, false)).collect(),
            write_count: 0,
            fail_next_write: false,
            fail_reads: false,
        }
    }
}

impl DigitalOutputs for MockOutputs {
    fn outputs(&self) -> &[OutputPin] {
        &self.table
    }

    fn write(&mut self, pin: u8, on: bool) -> Result<(), DriverError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(DriverError::WriteFailed);
        }

        let level = self.levels.get_mut(&pin).ok_or(DriverError::WriteFailed)?;
        *level = on;
        self.write_count += 1;
        Ok(())
    }

    fn read(&self, pin: u8) -> Result<bool, DriverError> {
        if self.fail_reads {
            return Err(DriverError::ReadFailed);
        }
        self.levels.get(&pin).copied().ok_or(DriverError::ReadFailed)
    }
}
